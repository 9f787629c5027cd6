use crate::audio::element::{AudioElement, AudioEvent, PlaybackError};
use crate::audio::playlist::Playlist;
use crate::session::SessionState;

/// Which location of the current track is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Primary,
    Fallback,
    /// Both locations failed; the track stays silent.
    Failed,
}

/// Background music kept in step with the transport.
///
/// Pause and resume never seek; restart goes back to the first track at time
/// zero. Finished tracks advance through the playlist and wrap around. While
/// playing, the position is saved to the session periodically so the next
/// session can pick up mid-track.
pub struct MusicPlayer<A: AudioElement> {
    element: A,
    playlist: Playlist,
    source: SourceState,
    wants_playback: bool,
    is_playing: bool,
    awaiting_gesture: bool,
    pending_seek: Option<f64>,
    persist_interval: f32,
    persist_elapsed: f32,
}

impl<A: AudioElement> MusicPlayer<A> {
    #[must_use]
    pub fn new(element: A, playlist: Playlist, persist_interval: f32) -> Self {
        let mut player = Self {
            element,
            playlist,
            source: SourceState::Primary,
            wants_playback: false,
            is_playing: false,
            awaiting_gesture: true,
            pending_seek: None,
            persist_interval,
            persist_elapsed: 0.0,
        };
        player.load_current();
        player
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn element(&self) -> &A {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut A {
        &mut self.element
    }

    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    #[must_use]
    pub fn current_track_index(&self) -> usize {
        self.playlist.current_index()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// True until a user gesture has been seen, and again after a rejected play.
    #[must_use]
    pub fn is_awaiting_gesture(&self) -> bool {
        self.awaiting_gesture
    }

    #[must_use]
    pub fn source_state(&self) -> SourceState {
        self.source
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// Picks up the track and position saved by a previous session.
    ///
    /// The seek is applied on the first successful play, after which the saved
    /// values are cleared.
    pub fn restore(&mut self, session: &SessionState) {
        let Some(index) = session.music_track() else {
            return;
        };
        if !self.playlist.select(index) {
            log::warn!("Saved music track {index} is out of range, starting from the top");
            return;
        }
        self.load_current();
        self.pending_seek = session.music_time();
        log::info!("Restoring music track {index} at {:?}s", self.pending_seek);
    }

    /// Records that a user gesture happened without requesting playback.
    pub fn unlock(&mut self) {
        self.awaiting_gesture = false;
    }

    /// Starts playback in response to the first user gesture.
    pub fn start(&mut self) {
        self.unlock();
        self.wants_playback = true;
        self.request_play();
    }

    /// Retries a play that was blocked waiting for a user gesture.
    pub fn on_user_gesture(&mut self) {
        if self.awaiting_gesture && self.wants_playback {
            self.awaiting_gesture = false;
            self.request_play();
        }
    }

    pub fn pause(&mut self) {
        self.wants_playback = false;
        if self.is_playing {
            self.element.pause();
            self.is_playing = false;
        }
    }

    /// Continues from the current position.
    pub fn resume(&mut self) {
        self.wants_playback = true;
        if !self.is_playing && !self.awaiting_gesture {
            self.request_play();
        }
    }

    /// Back to the first track at time zero.
    pub fn restart(&mut self) {
        self.playlist.reset();
        self.load_current();
        self.element.set_current_time(0.0);
        self.pending_seek = None;
        self.is_playing = false;
        self.wants_playback = true;
        if !self.awaiting_gesture {
            self.request_play();
        }
    }

    /// Drains element events and saves progress every `persist_interval` seconds.
    pub fn tick(&mut self, dt: f32, session: &mut SessionState) {
        while let Some(event) = self.element.poll_event() {
            self.handle_event(event, session);
        }

        if self.is_playing {
            self.persist_elapsed += dt;
            if self.persist_elapsed >= self.persist_interval {
                self.persist_elapsed -= self.persist_interval;
                // A stall saves once instead of once per missed interval
                if self.persist_elapsed >= self.persist_interval {
                    self.persist_elapsed = 0.0;
                }
                session.save_music_progress(self.playlist.current_index(), self.element.current_time());
            }
        }
    }

    fn handle_event(&mut self, event: AudioEvent, session: &mut SessionState) {
        match event {
            AudioEvent::PlayStarted => {
                if !self.wants_playback {
                    // Paused while the play request was in flight
                    self.element.pause();
                    return;
                }
                self.is_playing = true;
                self.awaiting_gesture = false;
                if let Some(time) = self.pending_seek.take() {
                    self.element.set_current_time(time);
                    session.clear_music_progress();
                    log::info!("Resumed track {} at {time:.2}s", self.playlist.current_index());
                }
                log::info!("Playback started: {}", self.element.src());
            }
            AudioEvent::PlayRejected(err) => {
                self.is_playing = false;
                self.awaiting_gesture = true;
                log::error!("Playback failed: {err}");
                if matches!(err, PlaybackError::NotAllowed(_)) {
                    log::error!("Autoplay was prevented. User interaction is required.");
                }
            }
            AudioEvent::Ended => {
                log::info!("Track ended, loading next.");
                self.is_playing = false;
                self.playlist.advance();
                self.load_current();
                if self.wants_playback {
                    self.request_play();
                }
            }
            AudioEvent::Error(message) => {
                self.is_playing = false;
                log::error!("Audio element error on {}: {message}", self.element.src());
                self.fall_back();
            }
        }
    }

    fn fall_back(&mut self) {
        let fallback = self.playlist.current().and_then(|t| t.fallback.clone());
        match (self.source, fallback) {
            (SourceState::Primary, Some(url)) => {
                log::warn!("Switching to fallback source {url}");
                self.source = SourceState::Fallback;
                self.element.set_src(&url);
                if self.wants_playback && !self.awaiting_gesture {
                    self.request_play();
                }
            }
            (SourceState::Failed, _) => {}
            _ => {
                self.source = SourceState::Failed;
                log::error!("Track {} has no playable source", self.playlist.current_index());
            }
        }
    }

    fn load_current(&mut self) {
        self.source = SourceState::Primary;
        self.persist_elapsed = 0.0;
        match self.playlist.current() {
            Some(track) => {
                self.element.set_src(&track.url);
                log::info!("Set audio source to: {}", track.url);
            }
            None => {
                self.source = SourceState::Failed;
                log::warn!("Playlist is empty, music disabled");
            }
        }
    }

    fn request_play(&mut self) {
        if self.source == SourceState::Failed {
            return;
        }
        log::debug!("Attempting to play: {}", self.element.src());
        self.element.play();
    }
}
