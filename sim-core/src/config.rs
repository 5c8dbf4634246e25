use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// How a relocated cursor checks its new coordinates against the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelocationPolicy {
    /// Each axis is drawn on its own and a drawn value `v` is rejected
    /// if any marker has `x == v` or `y == v`.
    #[default]
    ScalarAxis,
    /// The drawn `(x, y)` pair is rejected only if a marker sits exactly there.
    ExactPair,
}

/// Global configuration for the simulation engine.
///
/// Defaults reproduce the reference board: 900x900, 10-unit markers on a
/// 10-unit lattice, a prune phase reached after 16 growth days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_width: i32,
    pub board_height: i32,
    pub marker_size: i32,
    /// Lattice step between neighbouring positions.
    pub step: i32,
    pub cycle_period: u32,
    /// Pruning only removes while the field holds more markers than this.
    pub prune_threshold: usize,
    /// Lowest coordinate a random relocation may produce. The highest is
    /// `board - marker_size` on each axis.
    pub spawn_min: i32,
    pub seed: u64,
    pub bonus_spawn: bool,
    pub relocation: RelocationPolicy,
    /// Start a new growth cycle after each prune tick instead of pruning forever.
    pub reset_after_prune: bool,
    pub max_relocation_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: 900,
            board_height: 900,
            marker_size: 10,
            step: 10,
            cycle_period: 16,
            prune_threshold: 1,
            spawn_min: 20,
            seed: 42,
            bonus_spawn: true,
            relocation: RelocationPolicy::ScalarAxis,
            reset_after_prune: false,
            max_relocation_attempts: 64,
        }
    }
}

impl Config {
    /// Board-sized config with every other value at its default.
    pub fn with_board(board_width: i32, board_height: i32, marker_size: i32) -> Self {
        Self {
            board_width,
            board_height,
            marker_size,
            ..Self::default()
        }
    }

    /// Inclusive upper bound for relocated x coordinates.
    pub fn spawn_max_x(&self) -> i32 {
        self.board_width - self.marker_size
    }

    /// Inclusive upper bound for relocated y coordinates.
    pub fn spawn_max_y(&self) -> i32 {
        self.board_height - self.marker_size
    }

    /// Checks that the values describe a usable board.
    ///
    /// ### Errors
    /// Returns [`SimError::InvalidConfig`] naming the first offending value.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: &str| -> Result<(), SimError> {
            Err(SimError::InvalidConfig {
                reason: reason.to_owned(),
            })
        };

        if self.step <= 0 {
            return invalid("step must be positive");
        }
        if self.marker_size <= 0 {
            return invalid("marker_size must be positive");
        }
        if self.board_width <= self.marker_size || self.board_height <= self.marker_size {
            return invalid("board must be larger than marker_size on both axes");
        }
        if self.spawn_min < 0
            || self.spawn_min > self.spawn_max_x()
            || self.spawn_min > self.spawn_max_y()
        {
            return invalid("spawn_min must lie within [0, board - marker_size]");
        }
        if self.max_relocation_attempts == 0 {
            return invalid("max_relocation_attempts must be at least 1");
        }
        Ok(())
    }
}
