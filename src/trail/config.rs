use serde::{Deserialize, Serialize};

use crate::errors::{AfterimageError, Result};

/// How ghosts obtain their poses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrailMode {
    /// Ghosts replay snapshots sampled from the primary character every
    /// `spacing_frames` rendered frames.
    Sampled { spacing_frames: u32 },
    /// Each ghost is a full animation clone running `(i + 1) * spacing_secs`
    /// behind the primary character.
    Delayed { spacing_secs: f32 },
}

impl Default for TrailMode {
    fn default() -> Self {
        TrailMode::Sampled { spacing_frames: 3 }
    }
}

/// Smallest delayed-mode spacing. Render order buckets delays by hundredths
/// of a second, so anything finer would collapse neighbouring ghosts.
pub const MIN_SPACING_SECS: f32 = 0.01;

/// Ghost trail configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Number of ghosts, which is also the pose history capacity.
    pub trail_length: usize,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub mode: TrailMode,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            trail_length: 4,
            min_opacity: 0.03,
            max_opacity: 0.25,
            mode: TrailMode::default(),
        }
    }
}

impl TrailConfig {
    #[must_use]
    pub fn sampled(trail_length: usize, spacing_frames: u32, min_opacity: f32, max_opacity: f32) -> Self {
        Self {
            trail_length,
            min_opacity,
            max_opacity,
            mode: TrailMode::Sampled { spacing_frames },
        }
    }

    #[must_use]
    pub fn delayed(trail_length: usize, spacing_secs: f32, min_opacity: f32, max_opacity: f32) -> Self {
        Self {
            trail_length,
            min_opacity,
            max_opacity,
            mode: TrailMode::Delayed { spacing_secs },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.trail_length == 0 {
            return Err(AfterimageError::InvalidConfig("trail_length must be at least 1".into()));
        }
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.min_opacity) || !in_unit(self.max_opacity) {
            return Err(AfterimageError::InvalidConfig(format!(
                "opacities must lie in [0, 1], got min {} max {}",
                self.min_opacity, self.max_opacity
            )));
        }
        if self.min_opacity > self.max_opacity {
            return Err(AfterimageError::InvalidConfig(format!(
                "min_opacity {} exceeds max_opacity {}",
                self.min_opacity, self.max_opacity
            )));
        }
        match self.mode {
            TrailMode::Sampled { spacing_frames: 0 } => {
                Err(AfterimageError::InvalidConfig("spacing_frames must be at least 1".into()))
            }
            TrailMode::Delayed { spacing_secs } if !(spacing_secs.is_finite() && spacing_secs >= MIN_SPACING_SECS) => {
                Err(AfterimageError::InvalidConfig(format!(
                    "spacing_secs must be at least {MIN_SPACING_SECS}, got {spacing_secs}"
                )))
            }
            _ => Ok(()),
        }
    }
}
