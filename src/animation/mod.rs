//! Keyframe Animation
//!
//! Clips hold keyframe tracks addressed by node name. The [`Binder`] resolves
//! those names against a character's hierarchy, and an [`AnimationMixer`]
//! advances the resulting actions and writes sampled values into the scene.
//!
//! The mixer also implements [`AnimationClock`], the narrow time interface the
//! transport layer uses for pause, resume and restart.

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::{AnimationClock, AnimationMixer};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
