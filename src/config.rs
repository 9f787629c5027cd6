//! Stage Configuration
//!
//! Everything a stage needs besides its assets, loadable from JSON. Every
//! field has a default, so `{}` is a valid configuration:
//!
//! ```json
//! {
//!   "trail": { "trail_length": 5, "min_opacity": 0.03, "max_opacity": 0.25,
//!              "mode": { "kind": "sampled", "spacing_frames": 3 } },
//!   "music": { "tracks": [{ "url": "music/1.mp3", "fallback": "/music/1.mp3" }] },
//!   "bindings": { "toggle_hud": "H", "pause_and_reset": "Space" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::bindings::KeyBindings;
use crate::audio::TrackSource;
use crate::errors::{AfterimageError, Result};
use crate::trail::TrailConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub tracks: Vec<TrackSource>,
    /// Seconds between saves of the playback position.
    pub persist_interval_secs: f32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            tracks: (1..=3)
                .map(|i| TrackSource::new(format!("music/{i}.mp3")).with_fallback(format!("/music/{i}.mp3")))
                .collect(),
            persist_interval_secs: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub trail: TrailConfig,
    pub music: MusicConfig,
    pub bindings: KeyBindings,
}

impl StageConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.trail.validate()?;
        let interval = self.music.persist_interval_secs;
        if !(interval.is_finite() && interval > 0.0) {
            return Err(AfterimageError::InvalidConfig(format!(
                "persist_interval_secs must be positive, got {interval}"
            )));
        }
        Ok(())
    }
}
