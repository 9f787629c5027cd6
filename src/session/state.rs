use std::fmt;
use std::str::FromStr;

use crate::session::store::KeyValueStore;

/// Keys a stage persists between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Index of the playing music track.
    MusicTrack,
    /// Playback position within that track, in seconds.
    MusicTime,
    /// Set when the user left the stage with the pause key.
    WasPaused,
}

impl SessionKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKey::MusicTrack => "musicTrack",
            SessionKey::MusicTime => "musicTime",
            SessionKey::WasPaused => "waspaused",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change notification delivered to subscribers. `value` is `None` on removal.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionChange {
    pub key: SessionKey,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SessionChange)>;

/// Session state owned by a stage: typed get/set/subscribe over a
/// [`KeyValueStore`].
///
/// Storage failures are logged and otherwise ignored; losing a saved music
/// position is never worth interrupting playback for.
pub struct SessionState {
    store: Box<dyn KeyValueStore>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl SessionState {
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    // ========================================================================
    // Generic access
    // ========================================================================

    /// Reads and parses `key`. Unparseable values are treated as absent.
    #[must_use]
    pub fn get<T: FromStr>(&self, key: SessionKey) -> Option<T> {
        let raw = self.store.get(key.as_str())?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring malformed session value {key}={raw:?}");
                None
            }
        }
    }

    pub fn set<T: ToString>(&mut self, key: SessionKey, value: T) {
        let value = value.to_string();
        if let Err(err) = self.store.set(key.as_str(), &value) {
            log::warn!("Failed to store {key}: {err}");
            return;
        }
        self.notify(&SessionChange { key, value: Some(value) });
    }

    pub fn remove(&mut self, key: SessionKey) {
        if self.store.get(key.as_str()).is_none() {
            return;
        }
        if let Err(err) = self.store.remove(key.as_str()) {
            log::warn!("Failed to remove {key}: {err}");
            return;
        }
        self.notify(&SessionChange { key, value: None });
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: &SessionChange) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(change);
        }
    }

    // ========================================================================
    // Typed helpers
    // ========================================================================

    #[must_use]
    pub fn music_track(&self) -> Option<usize> {
        self.get(SessionKey::MusicTrack)
    }

    #[must_use]
    pub fn music_time(&self) -> Option<f64> {
        self.get::<f64>(SessionKey::MusicTime).filter(|t| t.is_finite() && *t >= 0.0)
    }

    pub fn save_music_progress(&mut self, track: usize, time: f64) {
        self.set(SessionKey::MusicTrack, track);
        self.set(SessionKey::MusicTime, time);
    }

    pub fn clear_music_progress(&mut self) {
        self.remove(SessionKey::MusicTrack);
        self.remove(SessionKey::MusicTime);
    }

    #[must_use]
    pub fn was_paused(&self) -> bool {
        self.get(SessionKey::WasPaused).unwrap_or(false)
    }

    pub fn set_was_paused(&mut self, paused: bool) {
        if paused {
            self.set(SessionKey::WasPaused, true);
        } else {
            self.remove(SessionKey::WasPaused);
        }
    }

    /// Reads and clears the pause flag left by a previous session.
    pub fn take_was_paused(&mut self) -> bool {
        let was_paused = self.was_paused();
        self.remove(SessionKey::WasPaused);
        was_paused
    }
}
