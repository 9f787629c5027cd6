use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// How far the cursor scans linearly before falling back to a binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last keyframe interval a track was sampled in.
///
/// Playback moves forward a little each frame, so the next lookup almost
/// always lands in the same or the following interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

impl KeyframeCursor {
    pub fn reset(&mut self) {
        self.last_index = 0;
    }
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Time of the last keyframe, or zero for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty() || self.values.is_empty()
    }

    /// Stateless sampling. Times before the first keyframe clamp to it.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let next = self.times.partition_point(|&t| t <= time);
        Some(self.sample_at_frame(next.saturating_sub(1), time))
    }

    /// Samples using `cursor` as a hint, updating it to the interval found.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let len = self.times.len();
        if len == 1 {
            return Some(self.values[0]);
        }

        let index = self
            .scan_from_cursor(time, cursor.last_index.min(len - 1))
            .unwrap_or_else(|| self.times.partition_point(|&t| t <= time).saturating_sub(1));

        cursor.last_index = index;
        Some(self.sample_at_frame(index, time))
    }

    /// Short linear scan around the cached index; `None` on a large jump.
    fn scan_from_cursor(&self, time: f32, start: usize) -> Option<usize> {
        let len = self.times.len();

        if time >= self.times[start] {
            for idx in start..=(start + MAX_SCAN_OFFSET) {
                if idx >= len - 1 {
                    return Some(len - 1);
                }
                if time < self.times[idx + 1] {
                    return Some(idx);
                }
            }
            None
        } else {
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&idx| time >= self.times[idx])
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            return self.values[len - 1];
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => T::interpolate_linear(self.values[index], self.values[next], t),
        }
    }
}
