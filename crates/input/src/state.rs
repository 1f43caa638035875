use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keys the renderer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Z,
    X,
    LeftShift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Source of current key, button and cursor state.
///
/// Implemented by the windowing layer; the camera only ever polls it.
pub trait InputProvider {
    fn is_key_down(&self, key: Key) -> bool;
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;
    /// Absolute cursor position in window pixels.
    fn mouse_position(&self) -> Vec2;
}

/// Plain snapshot of input state, filled by event handlers or scripts.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<Key>,
    buttons: HashSet<MouseButton>,
    mouse: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.buttons.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons.remove(&button);
    }

    pub fn move_mouse(&mut self, position: Vec2) {
        self.mouse = position;
    }

    /// Release everything, keeping the cursor where it is.
    pub fn clear(&mut self) {
        if !self.keys.is_empty() || !self.buttons.is_empty() {
            tracing::trace!(
                keys = self.keys.len(),
                buttons = self.buttons.len(),
                "input cleared"
            );
        }
        self.keys.clear();
        self.buttons.clear();
    }
}

impl InputProvider for InputState {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_key() {
        let mut input = InputState::new();
        assert!(!input.is_key_down(Key::W));
        input.press(Key::W);
        assert!(input.is_key_down(Key::W));
        input.release(Key::W);
        assert!(!input.is_key_down(Key::W));
    }

    #[test]
    fn mouse_buttons_and_position() {
        let mut input = InputState::new();
        input.press_button(MouseButton::Right);
        input.move_mouse(Vec2::new(640.0, 360.0));
        assert!(input.is_mouse_button_down(MouseButton::Right));
        assert!(!input.is_mouse_button_down(MouseButton::Left));
        assert_eq!(input.mouse_position(), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn clear_keeps_cursor() {
        let mut input = InputState::new();
        input.press(Key::LeftShift);
        input.press_button(MouseButton::Right);
        input.move_mouse(Vec2::new(5.0, 6.0));
        input.clear();
        assert!(!input.is_key_down(Key::LeftShift));
        assert!(!input.is_mouse_button_down(MouseButton::Right));
        assert_eq!(input.mouse_position(), Vec2::new(5.0, 6.0));
    }
}
