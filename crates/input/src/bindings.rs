use crate::event::Key;
use billard_camera::MotionMode;
use serde::{Deserialize, Serialize};

/// Which key drives which camera control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub yaw_left: Key,
    pub yaw_right: Key,
    pub pitch_up: Key,
    pub pitch_down: Key,
    pub exit: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            yaw_left: Key::Left,
            yaw_right: Key::Right,
            pitch_up: Key::Up,
            pitch_down: Key::Down,
            exit: Key::Escape,
        }
    }
}

/// Input section of the viewer configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub bindings: KeyBindings,
    pub motion: MotionMode,
    /// Start with mouse-look active instead of waiting for the toggle.
    pub mouse_look: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_use_wasd_and_arrows() {
        let b = KeyBindings::default();
        assert_eq!(b.forward, Key::W);
        assert_eq!(b.left, Key::A);
        assert_eq!(b.yaw_right, Key::Right);
        assert_eq!(b.pitch_down, Key::Down);
        assert_eq!(b.exit, Key::Escape);
    }

    #[test]
    fn default_settings_use_fixed_step() {
        let s = InputSettings::default();
        assert_eq!(s.motion, MotionMode::default());
        assert!(!s.mouse_look);
    }
}
