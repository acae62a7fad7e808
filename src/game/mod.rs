//! Core game logic
//!
//! Everything in this module is free of I/O and rendering concerns: the
//! discrete movement engine, the animation interpolator, food placement, the
//! fixed-timestep scheduler and the session state machine. The TUI front end
//! consumes it through `GameEngine`.

pub mod action;
pub mod animation;
pub mod config;
pub mod engine;
pub mod food;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use animation::EasingParams;
pub use config::{Difficulty, DifficultyProfile, GameConfig};
pub use engine::{Command, GameEngine, GameEvent, Phase};
pub use food::Food;
pub use scheduler::{FixedTimestep, MoveTimer, LOGIC_STEP};
pub use state::{Position, Snake};
