use thiserror::Error;

/// Why a `play()` request did not start playback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Blocked by the autoplay policy; needs a user gesture first.
    #[error("playback not allowed: {0}")]
    NotAllowed(String),

    #[error("playback failed: {0}")]
    Other(String),
}

/// Notifications from an [`AudioElement`], drained once per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// A deferred `play()` request succeeded.
    PlayStarted,
    /// A deferred `play()` request was rejected.
    PlayRejected(PlaybackError),
    /// The current source played to its end.
    Ended,
    /// The current source failed to load or decode.
    Error(String),
}

/// Media-element style playback primitives.
///
/// `play()` is deferred: its outcome arrives later as
/// [`AudioEvent::PlayStarted`] or [`AudioEvent::PlayRejected`].
pub trait AudioElement {
    fn set_src(&mut self, url: &str);

    fn src(&self) -> &str;

    fn play(&mut self);

    fn pause(&mut self);

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, time: f64);

    fn poll_event(&mut self) -> Option<AudioEvent>;
}
