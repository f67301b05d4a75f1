//! Input for the billard viewer: raw events in, camera actions out.
//!
//! Windowing backends translate their native events into [`InputEvent`]s and
//! push them onto an [`InputQueue`]. The frame driver drains the queue once per
//! frame through an [`InputController`].
//!
//! # Invariants
//! - No input state is global; the controller is owned by its caller.
//! - The first cursor sample after mouse-look activation contributes no motion.

pub mod action;
pub mod bindings;
pub mod controller;
pub mod event;

pub use action::CameraAction;
pub use bindings::{InputSettings, KeyBindings};
pub use controller::{FrameInput, InputController};
pub use event::{InputEvent, InputQueue, Key, KeySource, KeyboardState};

pub fn crate_info() -> &'static str {
    "billard-input v0.1.0"
}
