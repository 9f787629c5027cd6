//! Background Music
//!
//! [`MusicPlayer`] is the single audio transport: it follows pause, resume
//! and restart, walks a wrapping [`Playlist`], falls back to an alternate
//! source once per track, and saves its position to the session.
//!
//! Backends implement [`AudioElement`]: [`HeadlessAudio`] everywhere, and a
//! browser `<audio>` element on `wasm32`.

pub mod element;
pub mod headless;
pub mod player;
pub mod playlist;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use element::{AudioElement, AudioEvent, PlaybackError};
pub use headless::HeadlessAudio;
pub use player::{MusicPlayer, SourceState};
pub use playlist::{Playlist, TrackSource};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioElement;
