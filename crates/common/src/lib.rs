//! Shared types for the billard viewer.
//!
//! # Invariants
//! - Resource ids are names from the configuration, compared by value.
//! - A `Transform` is always translate-then-scale; rotation is never applied.

mod types;

pub use types::{MeshId, ShaderId, Transform, UniformNames, UniformValue};

pub fn crate_info() -> &'static str {
    "billard-common v0.1.0"
}
