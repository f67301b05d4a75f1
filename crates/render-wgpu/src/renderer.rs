use crate::gpu::{GpuContext, GpuError};
use crate::mesh::{MeshData, Vertex};
use crate::shaders;
use crate::uniforms::{PhongUniforms, UNIFORM_SIZE};
use billard_common::{MeshId, ShaderId, UniformValue};
use billard_render::RenderBackend;
use billard_scene::{MeshConfig, ShaderConfig, ViewerConfig};
use std::collections::{BTreeMap, BTreeSet};
use wgpu::util::DeviceExt;

/// Upper bound on draws per frame; sizes the per-draw uniform buffer.
pub const MAX_DRAWS: usize = 256;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct PendingDraw {
    shader: ShaderId,
    mesh: MeshId,
    uniforms: PhongUniforms,
}

/// wgpu implementation of [`RenderBackend`].
///
/// Uniform state is kept per shader, as with GL programs: values set after
/// `use_shader` stay with that shader until overwritten. Each `draw_mesh`
/// snapshots the bound shader's block; `end_frame` uploads all snapshots at
/// aligned offsets and replays the draws in one render pass.
pub struct WgpuBackend {
    ctx: GpuContext,
    pipelines: BTreeMap<ShaderId, wgpu::RenderPipeline>,
    meshes: BTreeMap<MeshId, GpuMesh>,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    depth_texture: wgpu::TextureView,
    shader_state: BTreeMap<ShaderId, PhongUniforms>,
    bound: Option<ShaderId>,
    clear_color: wgpu::Color,
    pending: Vec<PendingDraw>,
    frame: Option<wgpu::SurfaceTexture>,
    ignored: BTreeSet<String>,
}

impl WgpuBackend {
    /// Compile every configured shader and upload every configured mesh.
    pub async fn new(ctx: GpuContext, config: &ViewerConfig) -> Result<Self, GpuError> {
        let device = ctx.device();

        let uniform_stride = wgpu::util::align_to(
            UNIFORM_SIZE,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: uniform_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(UNIFORM_SIZE),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = BTreeMap::new();
        for shader in &config.shaders {
            let pipeline = compile(device, &pipeline_layout, ctx.format(), shader).await?;
            pipelines.insert(shader.id.clone(), pipeline);
        }

        let meshes = config
            .meshes
            .iter()
            .map(|m| (m.id.clone(), upload(device, m)))
            .collect();

        let (width, height) = ctx.size();
        let depth_texture = create_depth_texture(device, width, height);
        let [r, g, b, a] = config.scene.clear_color;

        Ok(Self {
            ctx,
            pipelines,
            meshes,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            depth_texture,
            shader_state: BTreeMap::new(),
            bound: None,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
            pending: Vec::new(),
            frame: None,
            ignored: BTreeSet::new(),
        })
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    pub fn aspect(&self) -> f32 {
        self.ctx.aspect()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        let (width, height) = self.ctx.size();
        self.depth_texture = create_depth_texture(self.ctx.device(), width, height);
        tracing::debug!(width, height, "surface resized");
    }

    /// Reconfigure after the surface reported loss; the frame is dropped.
    pub fn recover_surface(&mut self) {
        self.frame = None;
        self.pending.clear();
        self.ctx.reconfigure();
        tracing::warn!("surface lost, reconfigured");
    }

    fn bound_state(&mut self, call: &'static str) -> Result<&mut PhongUniforms, GpuError> {
        let shader = self.bound.as_ref().ok_or(GpuError::NoShaderBound(call))?;
        Ok(self.shader_state.entry(shader.clone()).or_default())
    }
}

impl RenderBackend for WgpuBackend {
    type Error = GpuError;

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), GpuError> {
        let [r, g, b, a] = clear_color;
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
        self.pending.clear();
        self.bound = None;
        self.frame = Some(self.ctx.acquire()?);
        Ok(())
    }

    fn use_shader(&mut self, shader: &ShaderId) -> Result<(), GpuError> {
        if !self.pipelines.contains_key(shader) {
            return Err(GpuError::UnknownShader(shader.clone()));
        }
        self.bound = Some(shader.clone());
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), GpuError> {
        let applied = self.bound_state("set_uniform")?.apply(name, value);
        if !applied && self.ignored.insert(name.to_string()) {
            tracing::warn!(uniform = name, %value, "uniform not used by the built-in block, ignoring");
        }
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &MeshId) -> Result<(), GpuError> {
        if !self.meshes.contains_key(mesh) {
            return Err(GpuError::UnknownMesh(mesh.clone()));
        }
        if self.pending.len() >= MAX_DRAWS {
            return Err(GpuError::DrawBudget(MAX_DRAWS));
        }
        let uniforms = *self.bound_state("draw_mesh")?;
        let shader = self
            .bound
            .clone()
            .ok_or(GpuError::NoShaderBound("draw_mesh"))?;
        self.pending.push(PendingDraw {
            shader,
            mesh: mesh.clone(),
            uniforms,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), GpuError> {
        let frame = self.frame.take().ok_or(GpuError::NoFrame("end_frame"))?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let device = self.ctx.device();
        let queue = self.ctx.queue();

        let stride = self.uniform_stride as usize;
        let mut bytes = vec![0u8; stride * self.pending.len()];
        for (chunk, draw) in bytes.chunks_exact_mut(stride).zip(&self.pending) {
            chunk[..UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&draw.uniforms));
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.uniform_buffer, 0, &bytes);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for (i, draw) in self.pending.iter().enumerate() {
                let (Some(pipeline), Some(mesh)) =
                    (self.pipelines.get(&draw.shader), self.meshes.get(&draw.mesh))
                else {
                    continue;
                };
                let offset = (i as u64 * self.uniform_stride) as wgpu::DynamicOffset;
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        self.pending.clear();
        Ok(())
    }
}

async fn compile(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    shader: &ShaderConfig,
) -> Result<wgpu::RenderPipeline, GpuError> {
    let source = match &shader.source {
        Some(path) => std::fs::read_to_string(path).map_err(|source| GpuError::ShaderSource {
            path: path.clone(),
            source,
        })?,
        None => shaders::builtin_source(shader.program),
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let label = format!("{}_shader", shader.id);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::desc()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });

    if let Some(err) = device.pop_error_scope().await {
        return Err(GpuError::ShaderCompile {
            id: shader.id.clone(),
            message: err.to_string(),
        });
    }
    tracing::debug!(shader = %shader.id, program = ?shader.program, "pipeline ready");
    Ok(pipeline)
}

fn upload(device: &wgpu::Device, config: &MeshConfig) -> GpuMesh {
    let data = MeshData::from_shape(&config.shape);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{}_vertices", config.id)),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{}_indices", config.id)),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    tracing::debug!(
        mesh = %config.id,
        vertices = data.vertices.len(),
        triangles = data.indices.len() / 3,
        "mesh uploaded"
    );
    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: data.index_count(),
    }
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
