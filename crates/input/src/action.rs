use billard_camera::{Camera, Direction};

/// A camera mutation resolved from input.
///
/// The frame driver consumes actions, never raw input events, so any input
/// backend (window, script, test) drives the camera through the same path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Translate along the camera basis by a distance.
    Move(Direction, f32),
    /// Keyboard rotation: unit deltas scaled by a per-frame sensitivity.
    Rotate {
        yaw: f32,
        pitch: f32,
        sensitivity: f32,
    },
    /// Mouse-look offset in cursor pixels, y positive upwards.
    Look { x: f32, y: f32 },
    /// Scroll offset in lines.
    Zoom(f32),
}

impl CameraAction {
    pub fn apply(&self, camera: &mut Camera) {
        match *self {
            Self::Move(direction, distance) => camera.process_movement(direction, distance),
            Self::Rotate {
                yaw,
                pitch,
                sensitivity,
            } => camera.process_rotation(yaw, pitch, sensitivity),
            Self::Look { x, y } => camera.process_mouse_movement(x, y, true),
            Self::Zoom(y) => camera.process_scroll(y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn move_action_translates() {
        let mut cam = Camera::default();
        let start = cam.position();
        CameraAction::Move(Direction::Forward, 2.0).apply(&mut cam);
        assert!(approx_eq((cam.position() - start).length(), 2.0));
    }

    #[test]
    fn rotate_action_changes_yaw() {
        let mut cam = Camera::default();
        CameraAction::Rotate {
            yaw: 1.0,
            pitch: 0.0,
            sensitivity: 1.0,
        }
        .apply(&mut cam);
        assert!(approx_eq(cam.yaw(), -89.0));
    }

    #[test]
    fn look_action_constrains_pitch() {
        let mut cam = Camera::default();
        CameraAction::Look { x: 0.0, y: 10_000.0 }.apply(&mut cam);
        assert_eq!(cam.pitch(), billard_camera::PITCH_LIMIT);
    }

    #[test]
    fn zoom_action_narrows_fov() {
        let mut cam = Camera::default();
        CameraAction::Zoom(5.0).apply(&mut cam);
        assert_eq!(cam.zoom(), 40.0);
    }
}
