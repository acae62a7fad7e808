//! High-score persistence
//!
//! One small JSON document: a legacy scalar `high_score` plus a map of
//! difficulty name to score. A missing or corrupt file loads as all zeroes;
//! load never errors to the caller, and save failures are the caller's to
//! downgrade to a log line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The persisted document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    /// Legacy single high score, kept for compatibility with older documents
    #[serde(default)]
    pub high_score: u32,
    /// Difficulty name -> best score
    #[serde(default)]
    pub difficulty_scores: HashMap<String, u32>,
}

impl HighScores {
    /// Best score recorded for a difficulty, 0 when absent
    pub fn score_for(&self, difficulty: &str) -> u32 {
        self.difficulty_scores.get(difficulty).copied().unwrap_or(0)
    }

    /// Record a finished run; returns true if anything improved
    pub fn record(&mut self, difficulty: &str, score: u32) -> bool {
        let mut changed = false;

        let entry = self.difficulty_scores.entry(difficulty.to_string()).or_insert(0);
        if score > *entry {
            *entry = score;
            changed = true;
        }

        if score > self.high_score {
            self.high_score = score;
            changed = true;
        }

        changed
    }
}

/// File-backed store for the high-score document
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document; any failure yields the zeroed default
    pub fn load(&self) -> HighScores {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return HighScores::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(scores) => scores,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "corrupt high-score file, starting fresh");
                HighScores::default()
            }
        }
    }

    /// Write the document, creating parent directories if needed
    pub fn save(&self, scores: &HighScores) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {:?}", parent))?;
            }
        }

        let json = serde_json::to_string(scores).context("failed to serialize high scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write high scores to {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_zeroes() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("absent.json"));

        let scores = store.load();
        assert_eq!(scores.high_score, 0);
        assert_eq!(scores.score_for("Medium"), 0);
    }

    #[test]
    fn test_corrupt_file_loads_zeroes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_score.json");
        std::fs::write(&path, "{not json").unwrap();

        let scores = HighScoreStore::new(&path).load();
        assert_eq!(scores, HighScores::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores/high_score.json"));

        let mut scores = HighScores::default();
        scores.record("Easy", 4);
        scores.record("Hard", 11);
        store.save(&scores).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.score_for("Easy"), 4);
        assert_eq!(loaded.score_for("Hard"), 11);
        assert_eq!(loaded.high_score, 11);
    }

    #[test]
    fn test_record_only_improves() {
        let mut scores = HighScores::default();
        assert!(scores.record("Medium", 5));
        assert!(!scores.record("Medium", 3));
        assert_eq!(scores.score_for("Medium"), 5);

        // A different difficulty below the legacy best updates only its own
        // entry.
        assert!(scores.record("Easy", 4));
        assert_eq!(scores.high_score, 5);
    }

    #[test]
    fn test_legacy_only_document_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_score.json");
        std::fs::write(&path, r#"{"high_score": 42}"#).unwrap();

        let scores = HighScoreStore::new(&path).load();
        assert_eq!(scores.high_score, 42);
        assert!(scores.difficulty_scores.is_empty());
    }
}
