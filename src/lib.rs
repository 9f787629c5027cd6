#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod errors;
pub mod scene;
pub mod session;
pub mod trail;
pub mod transport;
pub mod utils;

pub use animation::{AnimationAction, AnimationClip, AnimationClock, AnimationMixer, Binder};
pub use app::{Input, InputAction, Key, KeyBindings, Stage, StartGate, init_logging};
pub use assets::{ImageData, load_texture_or_placeholder};
pub use audio::{AudioElement, HeadlessAudio, MusicPlayer, Playlist, TrackSource};
pub use config::{MusicConfig, StageConfig};
pub use errors::{AfterimageError, Result};
pub use scene::{Character, Material, Node, Scene, Skeleton, Transform};
pub use session::{KeyValueStore, MemoryStore, SessionKey, SessionState};
pub use trail::{GhostTrail, PoseHistory, PoseSampler, PoseSnapshot, TrailConfig, TrailMode, VisualBackend};
pub use transport::{PlaybackState, TransportCommand, TransportController, TransportState};
pub use utils::Timer;
