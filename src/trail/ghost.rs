/// How far behind the primary character a ghost runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostDelay {
    /// Index into the pose history (0 = newest snapshot).
    Samples(usize),
    /// Animation clock offset in seconds.
    Seconds(f32),
}

impl GhostDelay {
    /// Draw order for a ghost with this delay. More delay draws earlier, so
    /// older ghosts end up behind newer ones when blended.
    #[must_use]
    pub fn render_order(self) -> i32 {
        match self {
            GhostDelay::Samples(index) => -(index as i32) - 1,
            GhostDelay::Seconds(secs) => -((secs * 100.0).floor() as i32),
        }
    }

    /// Clock offset in seconds; zero for history-driven ghosts.
    #[must_use]
    pub fn seconds(self) -> f32 {
        match self {
            GhostDelay::Samples(_) => 0.0,
            GhostDelay::Seconds(secs) => secs,
        }
    }
}

/// Opacity of slot `index` out of `count`, fading linearly from `max` (slot 0)
/// to `min` (last slot). A single slot gets `max`.
#[must_use]
pub fn ghost_opacity(index: usize, count: usize, min: f32, max: f32) -> f32 {
    if count < 2 {
        return max;
    }
    let t = index.min(count - 1) as f32 / (count - 1) as f32;
    max + (min - max) * t
}

#[must_use]
pub fn ghost_opacities(count: usize, min: f32, max: f32) -> Vec<f32> {
    (0..count).map(|i| ghost_opacity(i, count, min, max)).collect()
}

/// One rendered ghost.
#[derive(Debug, Clone, Copy)]
pub struct GhostSlot<H> {
    pub index: usize,
    pub delay: GhostDelay,
    pub opacity: f32,
    pub render_order: i32,
    pub visual: H,
    pub(crate) visible: bool,
}

impl<H> GhostSlot<H> {
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
