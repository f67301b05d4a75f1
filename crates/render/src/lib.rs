//! Frame orchestration for the billard viewer.
//!
//! [`FrameDriver`] owns the camera and the scene. Each frame it drains input,
//! mutates the camera, then walks the scene's render targets in declared
//! order and issues calls against a [`RenderBackend`].
//!
//! # Invariants
//! - Backends cannot mutate the camera or the scene.
//! - View and projection are computed once per frame.
//! - Identical configuration and camera state produce identical call
//!   sequences.
//!
//! [`RecordingBackend`] records calls instead of drawing and backs the
//! headless CLI and the tests. The GPU backend lives in `billard-render-wgpu`.

mod backend;
mod driver;
mod recording;

pub use backend::RenderBackend;
pub use driver::{FrameDriver, FrameOutcome};
pub use recording::{DrawOp, RecordingBackend, render_text};

pub fn crate_info() -> &'static str {
    "billard-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
