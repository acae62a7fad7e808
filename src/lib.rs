//! Arcade Snake - a grid snake with smooth animated movement
//!
//! The crate separates the authoritative discrete simulation (grid-aligned
//! snake movement, growth, collision) from a continuous-time animation layer
//! that interpolates each body segment between its previous and current cell.
//! A fixed-timestep scheduler drives logic at a constant rate while rendering
//! runs at the display's own cadence and always reads the latest visual pose.

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
