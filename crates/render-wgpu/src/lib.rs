//! wgpu render backend for the billard viewer.
//!
//! Implements [`billard_render::RenderBackend`] on top of a wgpu surface.
//! Every configured shader becomes a pipeline and every configured mesh is
//! generated and uploaded once at startup. Named uniforms are packed into a
//! per-draw block bound with a dynamic offset.
//!
//! # Invariants
//! - GPU resources are created once and released when the backend drops.
//! - A shader that fails validation aborts construction; nothing renders
//!   half-initialized.
//! - Depth testing is enabled for every pipeline.

mod gpu;
mod mesh;
mod renderer;
mod shaders;
mod uniforms;

pub use gpu::{GpuContext, GpuError};
pub use mesh::{MeshData, Vertex};
pub use renderer::{MAX_DRAWS, WgpuBackend};
pub use shaders::builtin_source;
pub use uniforms::PhongUniforms;
