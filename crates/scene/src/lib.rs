//! Scene description and configuration for the billard viewer.
//!
//! A [`SceneDescriptor`] lists render targets in draw order together with the
//! lighting parameters shared between them. A [`ViewerConfig`] bundles the
//! scene with window, camera, input and resource declarations and is loaded
//! from YAML.
//!
//! # Invariants
//! - Every target references a shader and a mesh declared in the config
//!   (checked by [`ViewerConfig::validate`]).
//! - Lighting parameters iterate in name order.
//! - The scene is fixed after load; only the camera changes between frames.

pub mod config;
pub mod descriptor;
pub mod lighting;
pub mod resources;

pub use config::{ConfigError, RenderSettings, ViewerConfig, WindowConfig};
pub use descriptor::{RenderTarget, SceneDescriptor};
pub use lighting::{LightingParams, Material, PointLight};
pub use resources::{MAX_SPHERE_SEGMENTS, MeshConfig, MeshShape, ShaderConfig, ShaderProgram};

pub fn crate_info() -> &'static str {
    "billard-scene v0.1.0"
}
