use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::audio::element::{AudioElement, AudioEvent, PlaybackError};

/// Audio element without an output device.
///
/// Playback position only moves when [`advance`](Self::advance) is called,
/// which makes it suitable for headless runs and deterministic tests. Sources
/// marked broken report an error as soon as they are assigned.
#[derive(Debug, Clone)]
pub struct HeadlessAudio {
    src: String,
    time: f64,
    playing: bool,
    autoplay_blocked: bool,
    durations: FxHashMap<String, f64>,
    default_duration: f64,
    broken: FxHashSet<String>,
    events: VecDeque<AudioEvent>,
    play_requests: usize,
}

impl Default for HeadlessAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAudio {
    #[must_use]
    pub fn new() -> Self {
        Self {
            src: String::new(),
            time: 0.0,
            playing: false,
            autoplay_blocked: false,
            durations: FxHashMap::default(),
            default_duration: 180.0,
            broken: FxHashSet::default(),
            events: VecDeque::new(),
            play_requests: 0,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, url: &str, secs: f64) -> Self {
        self.durations.insert(url.to_string(), secs);
        self
    }

    #[must_use]
    pub fn with_default_duration(mut self, secs: f64) -> Self {
        self.default_duration = secs;
        self
    }

    #[must_use]
    pub fn with_broken(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }

    /// Rejects `play()` until [`unlock`](Self::unlock) is called.
    #[must_use]
    pub fn with_autoplay_blocked(mut self) -> Self {
        self.autoplay_blocked = true;
        self
    }

    pub fn unlock(&mut self) {
        self.autoplay_blocked = false;
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn play_requests(&self) -> usize {
        self.play_requests
    }

    fn duration(&self) -> f64 {
        self.durations.get(&self.src).copied().unwrap_or(self.default_duration)
    }

    /// Moves the playback position forward by `dt` seconds if playing.
    pub fn advance(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        self.time += dt;
        let duration = self.duration();
        if self.time >= duration {
            self.time = duration;
            self.playing = false;
            self.events.push_back(AudioEvent::Ended);
        }
    }
}

impl AudioElement for HeadlessAudio {
    fn set_src(&mut self, url: &str) {
        self.src = url.to_string();
        self.time = 0.0;
        self.playing = false;
        if self.broken.contains(url) {
            self.events.push_back(AudioEvent::Error(format!("failed to load {url}")));
        }
    }

    fn src(&self) -> &str {
        &self.src
    }

    fn play(&mut self) {
        self.play_requests += 1;
        if self.broken.contains(&self.src) {
            return;
        }
        if self.autoplay_blocked {
            self.events.push_back(AudioEvent::PlayRejected(PlaybackError::NotAllowed(
                "play() requires a user gesture".into(),
            )));
            return;
        }
        self.playing = true;
        self.events.push_back(AudioEvent::PlayStarted);
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, time: f64) {
        self.time = time.max(0.0);
    }

    fn poll_event(&mut self) -> Option<AudioEvent> {
        self.events.pop_front()
    }
}
