use billard_common::{MeshId, ShaderId, UniformValue};

/// Renderer-agnostic draw interface. The frame driver issues calls in this
/// order for every frame:
///
/// `begin_frame`, then per target `use_shader`, any number of `set_uniform`,
/// `draw_mesh`, and finally `end_frame`.
///
/// Uniforms set after `use_shader` apply to the bound shader until the next
/// `use_shader`. Backends never see the camera or the scene; everything
/// reaches them as named values.
pub trait RenderBackend {
    type Error: std::error::Error;

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), Self::Error>;

    fn use_shader(&mut self, shader: &ShaderId) -> Result<(), Self::Error>;

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), Self::Error>;

    fn draw_mesh(&mut self, mesh: &MeshId) -> Result<(), Self::Error>;

    fn end_frame(&mut self) -> Result<(), Self::Error>;
}
