//! Per-tick rules for the cursor and marker system.
//!
//! A tick runs exactly one of:
//! 1. [`growth_phase`]: drop a marker at the cursor, step the cursor to
//!    a free lattice neighbour, and try a bonus spawn next to it.
//! 2. [`prune_phase`]: remove the densest marker next to the cursor (or
//!    the nearest one) and then the globally sparsest marker.
//!
//! [`crate::engine::SimulationEngine`] picks the phase from its clock.

use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;
use tracing::{trace, warn};

use crate::{
    clock::{Phase, SimulationClock},
    config::{Config, RelocationPolicy},
    density::DensityAnalyzer,
    error::SimError,
    field::MarkerField,
    geometry::NeighborGeometry,
    types::Position,
};

/// What a single tick changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub phase: Phase,
    /// Markers added this tick, in insertion order.
    pub placed: Vec<Position>,
    /// Markers removed this tick, in removal order.
    pub removed: Vec<Position>,
    /// Whether the cursor jumped to a random position.
    pub relocated: bool,
}

impl TickReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            placed: Vec::new(),
            removed: Vec::new(),
            relocated: false,
        }
    }
}

/// Uniform random pick from `candidates`.
///
/// ### Errors
/// Returns [`SimError::EmptyCandidateSet`] if `candidates` is empty.
/// Callers guard against this, so hitting it means a logic defect.
pub fn choose(candidates: &[Position], rng: &mut impl Rng) -> Result<Position, SimError> {
    candidates
        .choose(rng)
        .copied()
        .ok_or(SimError::EmptyCandidateSet)
}

/// Upper-edge boundary test. Either axis alone triggers it.
pub fn is_near_border(cursor: Position, cfg: &Config) -> bool {
    cursor.x + cfg.marker_size > cfg.board_width || cursor.y + cfg.marker_size > cfg.board_height
}

/// Whether a marker drawn at `p` fits fully on the board.
pub fn in_bounds(p: Position, cfg: &Config) -> bool {
    p.x >= 0
        && p.y >= 0
        && p.x + cfg.marker_size <= cfg.board_width
        && p.y + cfg.marker_size <= cfg.board_height
}

/// Draws a new cursor position in `[spawn_min, board - marker_size]` on
/// each axis, retrying draws that collide with the field according to
/// the configured [`RelocationPolicy`].
///
/// If every attempt collides, the last draw is kept.
pub fn random_position(field: &MarkerField, cfg: &Config, rng: &mut impl Rng) -> Position {
    let attempts = cfg.max_relocation_attempts;
    match cfg.relocation {
        RelocationPolicy::ScalarAxis => {
            let x = random_free_scalar(field, cfg.spawn_min, cfg.spawn_max_x(), attempts, rng);
            let y = random_free_scalar(field, cfg.spawn_min, cfg.spawn_max_y(), attempts, rng);
            Position::new(x, y)
        }
        RelocationPolicy::ExactPair => {
            let mut draw = || {
                Position::new(
                    rng.random_range(cfg.spawn_min..=cfg.spawn_max_x()),
                    rng.random_range(cfg.spawn_min..=cfg.spawn_max_y()),
                )
            };
            let mut p = draw();
            let mut tries = 1;
            while field.contains(p) && tries < attempts {
                p = draw();
                tries += 1;
            }
            if field.contains(p) {
                warn!(x = p.x, y = p.y, attempts, "relocation landed on an existing marker");
            }
            p
        }
    }
}

fn random_free_scalar(
    field: &MarkerField,
    lo: i32,
    hi: i32,
    attempts: u32,
    rng: &mut impl Rng,
) -> i32 {
    let mut v = rng.random_range(lo..=hi);
    let mut tries = 1;
    while field.touches_scalar(v) && tries < attempts {
        v = rng.random_range(lo..=hi);
        tries += 1;
    }
    if field.touches_scalar(v) {
        warn!(value = v, attempts, "relocation coordinate still shared with a marker");
    }
    v
}

/// Runs one growth tick.
///
/// 1. If the cursor fails [`is_near_border`], relocate it and stop; no
///    marker is placed.
/// 2. Otherwise place a marker at the cursor and move the cursor to a
///    random neighbour whose exact coordinates are free. With no free
///    neighbour, relocate instead.
/// 3. If `cfg.bonus_spawn` is set, try [`bonus_spawn`] around the new
///    cursor.
///
/// The day counter is advanced by the caller.
///
/// ### Parameters
/// - `field` - Markers; one or two are appended.
/// - `cursor` - Current cursor, updated in place.
/// - `cfg` - Board size, lattice step and spawn settings.
/// - `rng` - Source of every random choice in the tick.
///
/// ### Returns
/// A [`TickReport`] listing placed markers.
pub fn growth_phase(
    field: &mut MarkerField,
    cursor: &mut Position,
    cfg: &Config,
    rng: &mut impl Rng,
) -> Result<TickReport, SimError> {
    let mut report = TickReport::new(Phase::Growth);

    if is_near_border(*cursor, cfg) {
        *cursor = random_position(field, cfg, rng);
        report.relocated = true;
        trace!(x = cursor.x, y = cursor.y, "cursor relocated from border");
        return Ok(report);
    }

    field.add(*cursor);
    report.placed.push(*cursor);

    let geometry = NeighborGeometry::new(cfg.step);
    let free: Vec<Position> = geometry
        .neighbors_of(*cursor)
        .into_iter()
        .filter(|c| !field.contains(*c))
        .collect();

    if free.is_empty() {
        *cursor = random_position(field, cfg, rng);
        report.relocated = true;
        trace!(x = cursor.x, y = cursor.y, "cursor boxed in, relocated");
    } else {
        *cursor = choose(&free, rng)?;
        trace!(x = cursor.x, y = cursor.y, "cursor stepped");
    }

    if cfg.bonus_spawn
        && let Some(p) = bonus_spawn(field, *cursor, cfg, rng)?
    {
        report.placed.push(p);
    }

    Ok(report)
}

/// Tries to place one extra marker next to `cursor`.
///
/// Candidates are the 8 lattice neighbours of `cursor` minus any that
/// have a marker closer than `marker_size` on both axes. One candidate is
/// picked at random and placed only if it lies [`in_bounds`].
///
/// ### Returns
/// The placed position, or `None` if nothing was placed.
pub fn bonus_spawn(
    field: &mut MarkerField,
    cursor: Position,
    cfg: &Config,
    rng: &mut impl Rng,
) -> Result<Option<Position>, SimError> {
    let geometry = NeighborGeometry::new(cfg.step);
    let open: Vec<Position> = geometry
        .neighbors_of(cursor)
        .into_iter()
        .filter(|c| !field.has_marker_near(*c, cfg.marker_size))
        .collect();

    if open.is_empty() {
        return Ok(None);
    }

    let pick = choose(&open, rng)?;
    if !in_bounds(pick, cfg) {
        return Ok(None);
    }

    field.add(pick);
    trace!(x = pick.x, y = pick.y, "bonus spawn");
    Ok(Some(pick))
}

/// Runs one prune tick.
///
/// 1. If above the prune threshold, remove the densest marker
///    adjacent to the cursor, or the closest marker if none is adjacent,
///    and move the cursor onto its former position.
/// 2. If still above the threshold, remove the sparsest marker on the
///    board. The cursor stays put.
///
/// A prune tick removes at most two markers and never adds any. The day
/// counter is left to the caller.
pub fn prune_phase(
    field: &mut MarkerField,
    cursor: &mut Position,
    clock: &SimulationClock,
    analyzer: &DensityAnalyzer,
) -> Result<TickReport, SimError> {
    let mut report = TickReport::new(Phase::Prune);

    if clock.should_prune(field.count()) {
        let target = analyzer
            .dense_neighbor_of(*cursor, field)
            .or_else(|| analyzer.closest_to(*cursor, field));

        if let Some(id) = target {
            let pos = field.remove(id)?;
            *cursor = pos;
            report.removed.push(pos);
        }
    }

    if clock.should_prune(field.count())
        && let Some(id) = analyzer.sparsest_of(field)
    {
        report.removed.push(field.remove(id)?);
    }

    Ok(report)
}
