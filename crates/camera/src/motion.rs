use serde::{Deserialize, Serialize};

/// How held keys translate into camera motion each frame.
///
/// `FixedStep` applies the same increment every frame regardless of how long
/// the frame took, so speed follows the frame rate. `ElapsedTime` scales by
/// the measured frame time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MotionMode {
    FixedStep {
        /// World units per frame.
        distance: f32,
        /// Degrees per frame.
        degrees: f32,
    },
    ElapsedTime {
        /// World units per second.
        speed: f32,
        /// Degrees per second.
        degrees_per_second: f32,
    },
}

impl Default for MotionMode {
    fn default() -> Self {
        Self::FixedStep {
            distance: 0.1,
            degrees: 1.0,
        }
    }
}

impl MotionMode {
    /// The elapsed-time mode with defaults matching the fixed step at 60 fps.
    pub fn elapsed_default() -> Self {
        Self::ElapsedTime {
            speed: 6.0,
            degrees_per_second: 60.0,
        }
    }

    /// Distance to travel this frame.
    pub fn distance(&self, dt: f32) -> f32 {
        match *self {
            Self::FixedStep { distance, .. } => distance,
            Self::ElapsedTime { speed, .. } => speed * dt,
        }
    }

    /// Rotation sensitivity for this frame.
    pub fn rotation(&self, dt: f32) -> f32 {
        match *self {
            Self::FixedStep { degrees, .. } => degrees,
            Self::ElapsedTime {
                degrees_per_second, ..
            } => degrees_per_second * dt,
        }
    }
}
