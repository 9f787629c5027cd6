use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::binding::PropertyBinding;
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;

/// A playing instance of an [`AnimationClip`]. Clips always loop.
///
/// A negative `time` is a pre-roll: the action advances towards zero while
/// holding the clip's first frame. Delayed ghost clones rely on this to start
/// "behind" the primary character.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            paused: false,
            enabled: true,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<PropertyBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.clip.name
    }

    pub fn play(&mut self) {
        self.enabled = true;
        self.paused = false;
    }

    /// Disables the action and rewinds it.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.set_time(0.0);
    }

    /// Jumps to `time`; cursors are reset since the jump may go backwards.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
        for cursor in &mut self.track_cursors {
            cursor.reset();
        }
    }

    /// Advances time, wrapping at the clip duration.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        let step = dt * self.time_scale;
        let pre_roll = self.time < 0.0 && step >= 0.0;
        self.time += step;

        if pre_roll && self.time < 0.0 {
            return;
        }

        if self.time >= duration {
            self.time %= duration;
        } else if self.time < 0.0 {
            // Reverse playback wraps to the end
            self.time = duration + (self.time % duration);
        }
    }

    /// Samples track `track_index` at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;
        let time = self.time.max(0.0);

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => t.sample_with_cursor(time, cursor).map(TrackValue::Quaternion),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}
