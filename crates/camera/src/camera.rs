use crate::orientation::Orientation;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Movement direction relative to the camera's current basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// Startup parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    /// Degrees. -90 looks down -Z.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    /// Degrees of rotation per unit of cursor movement.
    pub mouse_sensitivity: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 20.0),
            yaw: -90.0,
            pitch: 0.0,
            zoom: 45.0,
            mouse_sensitivity: 0.1,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Fly camera with a cached yaw/pitch basis.
///
/// Movement only changes `position`; rotation and zoom only change the
/// orientation. No operation can fail: out-of-range angles are clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    orientation: Orientation,
    mouse_sensitivity: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl Camera {
    /// Camera at `position` with every other setting at its default.
    pub fn new(position: Vec3) -> Self {
        Self::from_settings(&CameraSettings {
            position,
            ..CameraSettings::default()
        })
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            position: settings.position,
            orientation: Orientation::new(settings.yaw, settings.pitch, settings.zoom, Vec3::Y),
            mouse_sensitivity: settings.mouse_sensitivity,
            near: settings.near,
            far: settings.far,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn yaw(&self) -> f32 {
        self.orientation.yaw()
    }

    pub fn pitch(&self) -> f32 {
        self.orientation.pitch()
    }

    pub fn zoom(&self) -> f32 {
        self.orientation.zoom()
    }

    pub fn front(&self) -> Vec3 {
        self.orientation.front()
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.right()
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.up()
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Translate along the current basis. Position is unbounded.
    pub fn process_movement(&mut self, direction: Direction, distance: f32) {
        let offset = match direction {
            Direction::Forward => self.front() * distance,
            Direction::Backward => -self.front() * distance,
            Direction::Right => self.right() * distance,
            Direction::Left => -self.right() * distance,
        };
        self.position += offset;
    }

    /// Keyboard rotation: deltas in degrees, scaled by `sensitivity`.
    pub fn process_rotation(&mut self, yaw_delta: f32, pitch_delta: f32, sensitivity: f32) {
        self.orientation
            .rotate(yaw_delta * sensitivity, pitch_delta * sensitivity, true);
    }

    /// Mouse-look rotation from cursor offsets.
    ///
    /// `y_offset` is positive when the cursor moves up the screen.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.orientation.rotate(
            x_offset * self.mouse_sensitivity,
            y_offset * self.mouse_sensitivity,
            constrain_pitch,
        );
    }

    /// Scroll wheel zoom. Positive offsets narrow the field of view.
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.orientation.zoom_by(y_offset);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Perspective projection using the zoom as vertical field of view.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom().to_radians(), aspect, self.near, self.far)
    }
}
