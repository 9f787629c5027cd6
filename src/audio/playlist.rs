use serde::{Deserialize, Serialize};

/// A music track with an optional alternate location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl TrackSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Ordered, wrapping list of tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<TrackSource>,
    current: usize,
}

impl Playlist {
    #[must_use]
    pub fn new(tracks: Vec<TrackSource>) -> Self {
        Self { tracks, current: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Option<&TrackSource> {
        self.tracks.get(self.current)
    }

    /// Selects track `index`. Out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Moves to the next track, wrapping to the first after the last.
    pub fn advance(&mut self) -> usize {
        if !self.tracks.is_empty() {
            self.current = (self.current + 1) % self.tracks.len();
        }
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
