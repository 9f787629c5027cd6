use crate::errors::{AfterimageError, Result};
use crate::trail::backend::VisualBackend;
use crate::trail::config::{TrailConfig, TrailMode};
use crate::trail::ghost::{GhostDelay, GhostSlot, ghost_opacity};
use crate::trail::history::PoseHistory;
use crate::trail::sampler::PoseSampler;

/// Ghost trail engine: pose sampler, pose history and ghost slot binding.
///
/// In [`TrailMode::Sampled`] ghosts replay the history. In
/// [`TrailMode::Delayed`] every ghost is animated by its own clock (owned by the
/// caller) and the trail only manages opacity, render order and visibility.
#[derive(Debug, Clone)]
pub struct GhostTrail<H> {
    config: TrailConfig,
    history: PoseHistory,
    sampler: PoseSampler,
    slots: Vec<GhostSlot<H>>,
}

impl<H: Copy> GhostTrail<H> {
    /// Configures one slot per handle in `visuals` and pushes the fixed
    /// opacity and render order to the backend.
    pub fn new<B>(config: TrailConfig, visuals: Vec<H>, backend: &mut B) -> Result<Self>
    where
        B: VisualBackend<Handle = H>,
    {
        config.validate()?;
        if visuals.len() != config.trail_length {
            return Err(AfterimageError::InvalidConfig(format!(
                "expected {} ghost visuals, got {}",
                config.trail_length,
                visuals.len()
            )));
        }

        let count = config.trail_length;
        let spacing_frames = match config.mode {
            TrailMode::Sampled { spacing_frames } => spacing_frames,
            TrailMode::Delayed { .. } => 1,
        };

        // Older ghosts draw strictly first, even when two delays floor to
        // the same hundredth.
        let mut last_order = 0;
        let slots: Vec<GhostSlot<H>> = visuals
            .into_iter()
            .enumerate()
            .map(|(index, visual)| {
                let delay = match config.mode {
                    TrailMode::Sampled { .. } => GhostDelay::Samples(index),
                    TrailMode::Delayed { spacing_secs } => GhostDelay::Seconds((index + 1) as f32 * spacing_secs),
                };
                let opacity = ghost_opacity(index, count, config.min_opacity, config.max_opacity);
                let render_order = delay.render_order().min(last_order - 1);
                last_order = render_order;
                let visible = matches!(config.mode, TrailMode::Delayed { .. });

                backend.set_opacity(visual, opacity);
                backend.set_render_order(visual, render_order);
                backend.set_visible(visual, visible);

                GhostSlot {
                    index,
                    delay,
                    opacity,
                    render_order,
                    visual,
                    visible,
                }
            })
            .collect();

        log::info!("Ghost trail configured: {count} ghosts, {:?}", config.mode);

        Ok(Self {
            config,
            history: PoseHistory::new(count),
            sampler: PoseSampler::new(spacing_frames),
            slots,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &PoseHistory {
        &self.history
    }

    #[must_use]
    pub fn sampler(&self) -> &PoseSampler {
        &self.sampler
    }

    #[must_use]
    pub fn slots(&self) -> &[GhostSlot<H>] {
        &self.slots
    }

    /// Clock offsets of every slot, in slot order.
    pub fn delays(&self) -> impl Iterator<Item = f32> + '_ {
        self.slots.iter().map(|s| s.delay.seconds())
    }

    /// Runs one frame: samples the target (unless paused) and rebinds every
    /// ghost. Returns `true` if a new snapshot was recorded.
    pub fn tick<B>(&mut self, backend: &mut B, target: Option<H>, paused: bool) -> bool
    where
        B: VisualBackend<Handle = H>,
    {
        match self.config.mode {
            TrailMode::Sampled { .. } => {
                let sampled = self.sampler.tick(&*backend, target, paused, &mut self.history);
                self.bind(backend);
                sampled
            }
            TrailMode::Delayed { .. } => false,
        }
    }

    /// Copies `history[i]` onto slot `i`, hiding slots with no snapshot yet.
    pub fn bind<B>(&mut self, backend: &mut B)
    where
        B: VisualBackend<Handle = H>,
    {
        for slot in &mut self.slots {
            match self.history.get(slot.index) {
                Some(pose) => {
                    backend.apply_pose(slot.visual, pose);
                    slot.visible = true;
                }
                None => slot.visible = false,
            }
            backend.set_visible(slot.visual, slot.visible);
        }
    }

    /// Forgets every buffered pose. Ghosts stay hidden until the sampler
    /// refills the history.
    pub fn restart(&mut self) {
        self.history.clear();
        self.sampler.reset();
        log::debug!("Ghost trail history cleared");
    }
}
