use crate::trail::backend::VisualBackend;
use crate::trail::history::PoseHistory;

/// Captures the target's pose into a [`PoseHistory`] every `spacing` frames.
#[derive(Debug, Clone)]
pub struct PoseSampler {
    spacing: u32,
    frame_count: u64,
}

impl PoseSampler {
    #[must_use]
    pub fn new(spacing: u32) -> Self {
        Self {
            spacing: spacing.max(1),
            frame_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Frames counted since creation or the last [`reset`](Self::reset).
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn reset(&mut self) {
        self.frame_count = 0;
    }

    /// Runs one frame. Returns `true` if a snapshot was recorded.
    ///
    /// While paused the frame counter is frozen and nothing is recorded. A
    /// missing target makes the tick a no-op.
    pub fn tick<B: VisualBackend>(
        &mut self,
        backend: &B,
        target: Option<B::Handle>,
        paused: bool,
        history: &mut PoseHistory,
    ) -> bool {
        if paused {
            return false;
        }
        let Some(target) = target else {
            return false;
        };

        self.frame_count += 1;
        if self.frame_count % u64::from(self.spacing) != 0 {
            return false;
        }

        match backend.read_pose(target) {
            Some(pose) => {
                history.push(pose);
                true
            }
            None => false,
        }
    }
}
