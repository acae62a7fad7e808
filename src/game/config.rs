use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::animation::EasingParams;

/// Configuration for a game session
///
/// Replaces ad-hoc global settings with one immutable struct passed into the
/// engine at construction. Grid coordinates run over `[0, grid_width) x
/// [0, grid_height)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Hard cap on food placement retries before accepting a colliding cell
    pub food_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 27,
            initial_snake_length: 3,
            food_spawn_attempts: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}

/// Difficulty tier, selected once per game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Display name, also the key used in the high-score document
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Resolve the tier's timing and easing parameters.
    ///
    /// Enum-indexed const table; resolved once at session start, immutable
    /// during play.
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                move_interval: 0.14,
                animation_speed: 300.0,
                easing: EasingParams {
                    ramp_start: 0.25,
                    ramp_end: 0.75,
                    accel: 3.5,
                    ramp_gain: 0.65,
                },
            },
            Difficulty::Medium => DifficultyProfile {
                move_interval: 0.11,
                animation_speed: 350.0,
                easing: EasingParams {
                    ramp_start: 0.22,
                    ramp_end: 0.72,
                    accel: 3.8,
                    ramp_gain: 0.70,
                },
            },
            Difficulty::Hard => DifficultyProfile {
                move_interval: 0.08,
                animation_speed: 450.0,
                easing: EasingParams {
                    ramp_start: 0.20,
                    ramp_end: 0.70,
                    accel: 4.2,
                    ramp_gain: 0.75,
                },
            },
        }
    }
}

/// Timing and easing parameters for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Seconds between discrete snake moves
    pub move_interval: f64,
    /// Base animation speed in progress units per second
    pub animation_speed: f32,
    /// Piecewise easing curve applied to animation progress
    pub easing: EasingParams,
}
