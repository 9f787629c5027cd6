use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::app::input::{Input, Key};

/// What a key press means to the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Show or hide the on-screen controls.
    ToggleHud,
    /// Pause and go back to the click-to-start gate.
    PauseAndReset,
    /// Pause or resume in place.
    TogglePause,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_hud: Key,
    pub pause_and_reset: Key,
    pub toggle_pause: Key,
    pub restart: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_hud: Key::H,
            pause_and_reset: Key::Space,
            toggle_pause: Key::P,
            restart: Key::R,
        }
    }
}

impl KeyBindings {
    /// Actions whose key went down this frame, in a fixed order.
    #[must_use]
    pub fn actions(&self, input: &Input) -> SmallVec<[InputAction; 4]> {
        [
            (self.toggle_hud, InputAction::ToggleHud),
            (self.pause_and_reset, InputAction::PauseAndReset),
            (self.toggle_pause, InputAction::TogglePause),
            (self.restart, InputAction::Restart),
        ]
        .into_iter()
        .filter(|(key, _)| input.key_just_pressed(*key))
        .map(|(_, action)| action)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_follow_binding_order() {
        let mut input = Input::new();
        input.tap_key(Key::R);
        input.tap_key(Key::H);

        let actions = KeyBindings::default().actions(&input);
        assert_eq!(actions.as_slice(), &[InputAction::ToggleHud, InputAction::Restart]);
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut input = Input::new();
        input.inject_key(Key::P, crate::app::input::ButtonState::Pressed);
        assert_eq!(KeyBindings::default().actions(&input).len(), 1);

        input.start_frame();
        input.inject_key(Key::P, crate::app::input::ButtonState::Pressed);
        assert!(KeyBindings::default().actions(&input).is_empty());
    }

    #[test]
    fn test_rebinding() {
        let bindings = KeyBindings {
            restart: Key::Enter,
            ..KeyBindings::default()
        };
        let mut input = Input::new();
        input.tap_key(Key::Enter);
        assert_eq!(bindings.actions(&input).as_slice(), &[InputAction::Restart]);
    }
}
