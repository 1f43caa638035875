use serde::{Deserialize, Serialize};

use crate::state::{Key, MouseButton};

/// Key and button assignments for the fly camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub down: Key,
    pub up: Key,
    pub sprint: Key,
    /// Yaw and pitch only change while this button is held.
    pub look: MouseButton,
}

impl Default for CameraBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            down: Key::Z,
            up: Key::X,
            sprint: Key::LeftShift,
            look: MouseButton::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_are_wasd_zx() {
        let b = CameraBindings::default();
        assert_eq!(b.forward, Key::W);
        assert_eq!(b.backward, Key::S);
        assert_eq!(b.down, Key::Z);
        assert_eq!(b.up, Key::X);
        assert_eq!(b.look, MouseButton::Right);
    }
}
