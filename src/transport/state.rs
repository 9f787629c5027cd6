/// Pause flag and restart epoch for one stage.
///
/// Written by user input, read once per tick by the
/// [`TransportController`](super::TransportController). Every restart request
/// bumps the epoch, so consumers can detect it exactly once by comparing with
/// the last epoch they handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportState {
    paused: bool,
    restart_epoch: u64,
}

impl TransportState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    #[must_use]
    pub fn restart_epoch(&self) -> u64 {
        self.restart_epoch
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Requests a restart and returns the new epoch.
    pub fn request_restart(&mut self) -> u64 {
        self.restart_epoch += 1;
        self.restart_epoch
    }
}
