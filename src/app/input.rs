//! Platform-agnostic input state
//!
//! Platform adapters translate their events into [`Key`] / [`MouseButton`]
//! presses; the stage only ever reads this container.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keyboard key enumeration (platform-agnostic).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    Space,
    Enter,
    Escape,
    Backspace,
    Tab,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Mouse button enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Keyboard and mouse state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_keys: HashSet<Key>,
    just_pressed_keys: HashSet<Key>,
    pressed_mouse: HashSet<MouseButton>,
    just_pressed_mouse: HashSet<MouseButton>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the per-frame "just pressed" sets.
    pub fn start_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.just_pressed_mouse.clear();
    }

    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                // Key repeat is not a new press
                if self.pressed_keys.insert(key) {
                    self.just_pressed_keys.insert(key);
                }
            }
            ButtonState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.pressed_mouse.insert(button) {
                    self.just_pressed_mouse.insert(button);
                }
            }
            ButtonState::Released => {
                self.pressed_mouse.remove(&button);
            }
        }
    }

    /// Press-and-release within one frame, as delivered by tap-style events.
    pub fn tap_key(&mut self, key: Key) {
        self.inject_key(key, ButtonState::Pressed);
        self.inject_key(key, ButtonState::Released);
    }

    pub fn click(&mut self, button: MouseButton) {
        self.inject_mouse_button(button, ButtonState::Pressed);
        self.inject_mouse_button(button, ButtonState::Released);
    }

    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed_mouse.contains(&button)
    }

    /// Any mouse press this frame; counts as a user activation gesture.
    #[must_use]
    pub fn any_click(&self) -> bool {
        !self.just_pressed_mouse.is_empty()
    }
}
