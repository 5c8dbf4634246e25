//! The simulation engine: one cursor, one marker field, one clock.
//!
//! `SimulationEngine` owns all mutable state and a seeded RNG. A host
//! calls [`SimulationEngine::tick`] on a fixed interval and reads
//! [`SimulationEngine::snapshot`] between ticks to draw the board.

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    clock::{Phase, SimulationClock},
    config::Config,
    density::DensityAnalyzer,
    error::SimError,
    field::MarkerField,
    geometry::NeighborGeometry,
    phases::{self, TickReport},
    types::Position,
};

/// Read-only view of the engine state for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub cursor: Position,
    /// Markers in insertion order.
    pub markers: Vec<Position>,
    pub day: u32,
    pub phase: Phase,
}

/// The simulation engine. Owns the field, cursor, clock and RNG.
#[derive(Debug)]
pub struct SimulationEngine {
    cfg: Config,
    field: MarkerField,
    cursor: Position,
    clock: SimulationClock,
    analyzer: DensityAnalyzer,
    rng: ChaCha8Rng,
}

impl SimulationEngine {
    /// Creates an engine with an empty field and the cursor at `initial_cursor`.
    ///
    /// The RNG is seeded from `cfg.seed`, so the same config and cursor
    /// always produce the same run.
    ///
    /// ### Errors
    /// Returns [`SimError::InvalidConfig`] if `cfg` fails [`Config::validate`].
    pub fn new(cfg: Config, initial_cursor: Position) -> Result<Self, SimError> {
        cfg.validate()?;

        Ok(Self {
            cfg,
            field: MarkerField::new(),
            cursor: initial_cursor,
            clock: SimulationClock::new(
                cfg.cycle_period,
                cfg.prune_threshold,
                cfg.reset_after_prune,
            ),
            analyzer: DensityAnalyzer::new(NeighborGeometry::new(cfg.step)),
            rng: ChaCha8Rng::seed_from_u64(cfg.seed),
        })
    }

    /// Creates an engine whose cursor starts at a random in-bounds position.
    pub fn with_random_cursor(cfg: Config) -> Result<Self, SimError> {
        let mut engine = Self::new(cfg, IVec2::ZERO)?;
        engine.cursor = phases::random_position(&engine.field, &engine.cfg, &mut engine.rng);
        Ok(engine)
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// Growth ticks advance the day counter; prune ticks leave it alone
    /// unless `reset_after_prune` is set.
    ///
    /// ### Errors
    /// Only on an internal invariant breach: [`SimError::EmptyCandidateSet`]
    /// or [`SimError::NotFound`].
    pub fn tick(&mut self) -> Result<TickReport, SimError> {
        let report = match self.clock.phase() {
            Phase::Growth => {
                let report = phases::growth_phase(
                    &mut self.field,
                    &mut self.cursor,
                    &self.cfg,
                    &mut self.rng,
                )?;
                self.clock.advance();
                if self.clock.phase() == Phase::Prune {
                    info!(
                        day = self.clock.day(),
                        markers = self.field.count(),
                        "prune phase reached"
                    );
                }
                report
            }
            Phase::Prune => {
                let report = phases::prune_phase(
                    &mut self.field,
                    &mut self.cursor,
                    &self.clock,
                    &self.analyzer,
                )?;
                self.clock.finish_prune();
                report
            }
        };

        debug!(
            phase = ?report.phase,
            day = self.clock.day(),
            markers = self.field.count(),
            placed = report.placed.len(),
            removed = report.removed.len(),
            "tick"
        );
        Ok(report)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor,
            markers: self.field.all().to_vec(),
            day: self.clock.day(),
            phase: self.clock.phase(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    pub fn day(&self) -> u32 {
        self.clock.day()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn field(&self) -> &MarkerField {
        &self.field
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }
}
