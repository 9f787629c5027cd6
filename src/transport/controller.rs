use crate::animation::AnimationClock;
use crate::transport::state::TransportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Paused,
}

/// A transition the stage must apply to its clocks, trail and music.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Pause,
    Resume,
    Restart,
}

impl TransportCommand {
    /// Applies the command to an animation clock running `delay` seconds
    /// behind the primary one (0 for the primary itself).
    ///
    /// Pause and resume never seek. Restart rewinds to `-delay` so a delayed
    /// clock starts behind and keeps its offset.
    pub fn apply_to_clock<C: AnimationClock + ?Sized>(self, clock: &mut C, delay: f32) {
        match self {
            TransportCommand::Pause => clock.set_paused(true),
            TransportCommand::Resume => clock.set_paused(false),
            TransportCommand::Restart => {
                clock.set_time(if delay > 0.0 { -delay } else { 0.0 });
                clock.set_paused(false);
            }
        }
    }
}

/// Running/Paused state machine with an edge-triggered restart.
#[derive(Debug, Clone)]
pub struct TransportController {
    state: PlaybackState,
    last_epoch: u64,
}

impl Default for TransportController {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Running,
            last_epoch: 0,
        }
    }

    /// Starts in sync with `signals`, so restarts requested before mount are not replayed.
    #[must_use]
    pub fn synced_with(signals: &TransportState) -> Self {
        Self {
            state: if signals.is_paused() { PlaybackState::Paused } else { PlaybackState::Running },
            last_epoch: signals.restart_epoch(),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn last_epoch(&self) -> u64 {
        self.last_epoch
    }

    /// Observes `signals` once and returns the transition to apply, if any.
    ///
    /// A new epoch wins over the pause flag: the restart is reported, the
    /// controller goes back to running and a queued pause is cleared.
    pub fn poll(&mut self, signals: &mut TransportState) -> Option<TransportCommand> {
        let epoch = signals.restart_epoch();
        if epoch > self.last_epoch {
            self.last_epoch = epoch;
            self.state = PlaybackState::Running;
            signals.set_paused(false);
            log::info!("Transport restart (epoch {epoch})");
            return Some(TransportCommand::Restart);
        }

        match (self.state, signals.is_paused()) {
            (PlaybackState::Running, true) => {
                self.state = PlaybackState::Paused;
                log::info!("Transport paused");
                Some(TransportCommand::Pause)
            }
            (PlaybackState::Paused, false) => {
                self.state = PlaybackState::Running;
                log::info!("Transport resumed");
                Some(TransportCommand::Resume)
            }
            _ => None,
        }
    }
}
