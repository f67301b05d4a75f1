//! Fly camera for the billard viewer.
//!
//! Orientation is stored as yaw/pitch/zoom in degrees with a cached
//! front/right/up basis. The camera is owned by the frame driver and mutated
//! in place between frames.
//!
//! # Invariants
//! - `front`, `right`, `up` form a right-handed orthonormal basis.
//! - Pitch stays within ±89°, zoom within [1°, 45°].
//! - Movement never touches orientation; rotation never touches position.

mod camera;
mod motion;
mod mouse;
mod orientation;

pub use camera::{Camera, CameraSettings, Direction};
pub use motion::MotionMode;
pub use mouse::MouseLook;
pub use orientation::{Orientation, PITCH_LIMIT, ZOOM_MAX, ZOOM_MIN};

pub fn crate_info() -> &'static str {
    "billard-camera v0.1.0"
}
