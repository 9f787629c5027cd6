//! Transport
//!
//! Pause, resume and restart handling shared by the animation clocks, the
//! ghost trail and the music player. [`TransportState`] carries the user's
//! requests; [`TransportController`] turns them into at most one
//! [`TransportCommand`] per tick.

pub mod controller;
pub mod state;

pub use controller::{PlaybackState, TransportCommand, TransportController};
pub use state::TransportState;
