use glam::Vec3;

/// Largest absolute pitch in degrees. Keeps `front` away from `world_up`.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest vertical field of view in degrees.
pub const ZOOM_MIN: f32 = 1.0;
/// Widest vertical field of view in degrees.
pub const ZOOM_MAX: f32 = 45.0;

/// Yaw/pitch/zoom angles plus the orthonormal basis derived from them.
///
/// All angles are in degrees. The basis is cached: it is recomputed whenever
/// yaw or pitch changes and read for free afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    world_up: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Orientation {
    /// Build an orientation. `pitch` and `zoom` are clamped into range.
    pub fn new(yaw: f32, pitch: f32, zoom: f32, world_up: Vec3) -> Self {
        let mut orientation = Self {
            yaw,
            pitch: clamp_pitch(pitch),
            zoom: clamp_zoom(zoom),
            world_up: world_up.normalize(),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        orientation.update_basis();
        orientation
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Add to yaw and pitch, optionally clamping pitch, then rebuild the basis.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32, constrain_pitch: bool) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        if constrain_pitch {
            self.pitch = clamp_pitch(self.pitch);
        }
        self.update_basis();
    }

    /// Narrow (positive) or widen (negative) the field of view.
    pub fn zoom_by(&mut self, amount: f32) {
        self.zoom = clamp_zoom(self.zoom - amount);
    }

    fn update_basis(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}
