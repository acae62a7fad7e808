//! Sound cue surface
//!
//! The game core only ever *names* sounds; there is no audio backend wired
//! in, so cues degrade to no-ops. Load failures disable the missing cue and
//! never interrupt the simulation loop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CUE_EAT: &str = "eat";
pub const CUE_MOVE: &str = "move";
pub const CUE_GAME_OVER: &str = "game_over";

/// Named sound cues, playable only when enabled and successfully loaded
pub struct SoundBank {
    enabled: bool,
    sounds: HashMap<String, PathBuf>,
}

impl SoundBank {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            sounds: HashMap::new(),
        }
    }

    /// Register a sound file under `name`; returns false when the file is
    /// missing (the cue then stays silent)
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !path.is_file() {
            warn!(name, path = %path.display(), "sound file not found, cue disabled");
            return false;
        }

        self.sounds.insert(name.to_string(), path.to_path_buf());
        true
    }

    /// Trigger a cue by name; unknown or disabled cues are no-ops
    pub fn play(&self, name: &str) {
        if !self.enabled || !self.sounds.contains_key(name) {
            return;
        }
        debug!(name, "sound cue");
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
