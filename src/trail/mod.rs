//! Ghost Trail
//!
//! Keeps a short, bounded history of a character's pose and renders several
//! delayed, fading copies of it:
//!
//! - [`PoseSampler`]: records a [`PoseSnapshot`] every N frames unless paused
//! - [`PoseHistory`]: newest-first ring buffer with a fixed capacity
//! - [`GhostTrail`]: owns both and binds history entries to [`GhostSlot`]s
//! - [`VisualBackend`]: the only way the trail touches the rendered scene
//!
//! # Example
//!
//! ```rust,ignore
//! let config = TrailConfig::sampled(5, 3, 0.03, 0.25);
//! let mut trail = GhostTrail::new(config, ghosts, &mut scene)?;
//!
//! // once per frame
//! trail.tick(&mut scene, Some(primary), transport.is_paused());
//! ```

pub mod backend;
pub mod config;
pub mod ghost;
pub mod ghost_trail;
pub mod history;
pub mod pose;
pub mod sampler;

pub use backend::VisualBackend;
pub use config::{TrailConfig, TrailMode};
pub use ghost::{GhostDelay, GhostSlot, ghost_opacities, ghost_opacity};
pub use ghost_trail::GhostTrail;
pub use history::PoseHistory;
pub use pose::{JointPose, PoseSnapshot};
pub use sampler::PoseSampler;
