use rand::Rng;
use tracing::warn;

use super::config::GameConfig;
use super::state::Position;

/// The food: a single grid cell, regenerated on each consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Spawn food on a cell not occupied by the snake
    pub fn spawn(rng: &mut impl Rng, config: &GameConfig, occupied: &[Position]) -> Self {
        let mut food = Self {
            position: random_cell(rng, config),
        };
        food.respawn(rng, config, occupied);
        food
    }

    /// Move the food to a fresh random cell, avoiding `occupied`.
    ///
    /// Rejection sampling with a hard retry cap: when the snake covers nearly
    /// the whole grid the cap can be exhausted, in which case the colliding
    /// sample is accepted rather than looping forever.
    pub fn respawn(&mut self, rng: &mut impl Rng, config: &GameConfig, occupied: &[Position]) {
        let mut candidate = random_cell(rng, config);
        let mut attempts = 0;

        while occupied.contains(&candidate) && attempts < config.food_spawn_attempts {
            candidate = random_cell(rng, config);
            attempts += 1;
        }

        if occupied.contains(&candidate) {
            warn!(attempts, "food placement retries exhausted, accepting occupied cell");
        }

        self.position = candidate;
    }

    /// True iff `position` sits on the food
    pub fn is_at(&self, position: Position) -> bool {
        self.position == position
    }
}

fn random_cell(rng: &mut impl Rng, config: &GameConfig) -> Position {
    Position::new(
        rng.gen_range(0..config.grid_width) as i32,
        rng.gen_range(0..config.grid_height) as i32,
    )
}
