/// Click-to-start gate.
///
/// Browsers only allow audio after a user gesture, so nothing runs until the
/// first click opens the gate. Pausing with the reset key closes it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartGate {
    #[default]
    AwaitingGesture,
    Open,
}

impl StartGate {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == StartGate::Open
    }

    /// Opens the gate. Returns `true` only on the closed-to-open transition.
    pub fn open(&mut self) -> bool {
        let was_closed = *self == StartGate::AwaitingGesture;
        *self = StartGate::Open;
        was_closed
    }

    pub fn close(&mut self) {
        *self = StartGate::AwaitingGesture;
    }
}
