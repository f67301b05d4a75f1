use billard_common::{MeshId, ShaderId};
use std::path::PathBuf;

/// Errors from GPU setup and frame submission.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("failed to read shader source {path:?}: {source}")]
    ShaderSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader {id} failed to compile: {message}")]
    ShaderCompile { id: ShaderId, message: String },
    #[error("unknown shader {0}")]
    UnknownShader(ShaderId),
    #[error("unknown mesh {0}")]
    UnknownMesh(MeshId),
    #[error("{0} issued with no shader bound")]
    NoShaderBound(&'static str),
    #[error("{0} called outside a frame")]
    NoFrame(&'static str),
    #[error("frame exceeded the limit of {0} draws")]
    DrawBudget(usize),
}

impl GpuError {
    /// Surface loss and staleness are cured by reconfiguring; everything
    /// else ends the session.
    pub fn is_surface_lost(&self) -> bool {
        matches!(
            self,
            GpuError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
        )
    }
}

/// Surface, device and queue for one window.
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("billard_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = info.backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, GpuError> {
        Ok(self.surface.get_current_texture()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lost_and_outdated_are_recoverable() {
        assert!(GpuError::Surface(wgpu::SurfaceError::Lost).is_surface_lost());
        assert!(GpuError::Surface(wgpu::SurfaceError::Outdated).is_surface_lost());
        assert!(!GpuError::Surface(wgpu::SurfaceError::OutOfMemory).is_surface_lost());
        assert!(!GpuError::NoAdapter.is_surface_lost());
    }

    #[test]
    fn errors_name_the_resource() {
        let err = GpuError::UnknownMesh(MeshId::new("cue"));
        assert_eq!(err.to_string(), "unknown mesh cue");
        let err = GpuError::NoShaderBound("draw_mesh");
        assert_eq!(err.to_string(), "draw_mesh issued with no shader bound");
    }
}
