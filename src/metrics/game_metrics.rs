use std::time::{Duration, Instant};
use tracing::warn;

use crate::game::Difficulty;
use crate::persistence::{HighScoreStore, HighScores};

/// Session bookkeeping: run clock, games played, persisted high scores
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    store: HighScoreStore,
    scores: HighScores,
}

impl GameMetrics {
    /// Load persisted scores up front; a missing or corrupt file means zeroes
    pub fn new(store: HighScoreStore) -> Self {
        let scores = store.load();
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            store,
            scores,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished run and persist if the score improved.
    ///
    /// Persistence failures degrade to a warning; they never reach the loop.
    pub fn on_game_over(&mut self, difficulty: Difficulty, final_score: u32) {
        self.games_played += 1;

        if self.scores.record(difficulty.name(), final_score) {
            if let Err(err) = self.store.save(&self.scores) {
                warn!(%err, "failed to persist high scores");
            }
        }
    }

    pub fn high_score(&self, difficulty: Difficulty) -> u32 {
        self.scores.score_for(difficulty.name())
    }

    pub fn legacy_high_score(&self) -> u32 {
        self.scores.high_score
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
