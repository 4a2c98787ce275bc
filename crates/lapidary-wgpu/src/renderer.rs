//! Surface, pipeline and per-frame drawing.

use std::sync::Arc;

use glam::Mat4;
use thiserror::Error;
use winit::window::Window;

use lapidary_geometry::GemMesh;
use lapidary_widget::FrameStyle;

use crate::mesh_data::MeshData;
use crate::MAX_FACET_SLOTS;

/// Neutral color and emphasis of non-interactive body faces.
const BODY_COLOR: [f32; 3] = [0.88, 0.93, 1.0];
const BODY_EMPHASIS: f32 = 0.05;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Errors from bringing up the GPU.
///
/// All of these degrade to the vector fallback rather than crash: the
/// widget is decorative, the page must survive it failing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Surface creation failed
    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    /// Device request rejected
    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Per-frame uniform block. Layout mirrors `FrameUniforms` in the shader.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    /// x: facet brightness, y: glow intensity, zw: padding
    glow: [f32; 4],
    /// rgb: facet color, a: emphasis; slot `segments` is the body
    facets: [[f32; 4]; MAX_FACET_SLOTS],
}

/// The gem body's model transform for a frame (idle turn + tilt).
///
/// Shared with picking so hover rays see exactly what the GPU draws.
pub fn model_matrix(style: &FrameStyle) -> Mat4 {
    Mat4::from_rotation_y(style.idle_yaw) * Mat4::from_rotation_x(style.idle_tilt)
}

/// wgpu renderer for the gem widget.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Uploaded gem mesh, if any
    pub mesh_data: Option<MeshData>,
    segments: usize,
    /// Camera projection parameters and input translation
    pub camera: crate::OrbitCamera,
}

impl Renderer {
    /// Bring up the surface, device and pipeline for `window`.
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        tracing::info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("lapidary-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gem-uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gem-uniforms"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gem-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("gem-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("gem-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshData::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            depth_view,
            uniform_buffer,
            bind_group,
            mesh_data: None,
            segments: 0,
            camera: crate::OrbitCamera::new(),
        })
    }

    /// Upload the gem mesh for drawing.
    pub fn upload_gem(&mut self, mesh: &GemMesh) {
        self.mesh_data = Some(MeshData::upload(&self.device, mesh));
        self.segments = mesh.segments();
    }

    /// Current surface size in pixels.
    pub fn viewport(&self) -> glam::Vec2 {
        glam::Vec2::new(self.config.width as f32, self.config.height as f32)
    }

    /// Current surface size.
    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        winit::dpi::PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Width over height of the surface.
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    /// Reconfigure after a window resize.
    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    fn uniforms(&self, style: &FrameStyle) -> FrameUniforms {
        let view_proj = self
            .camera
            .view_projection_matrix(style.eye, style.up, self.aspect());

        let mut facets = [[0.0; 4]; MAX_FACET_SLOTS];
        for (slot, facet) in facets.iter_mut().zip(style.facets.iter()) {
            *slot = [
                facet.color[0],
                facet.color[1],
                facet.color[2],
                facet.emphasis,
            ];
        }
        if self.segments < MAX_FACET_SLOTS {
            facets[self.segments] =
                [BODY_COLOR[0], BODY_COLOR[1], BODY_COLOR[2], BODY_EMPHASIS];
        }

        FrameUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model_matrix(style).to_cols_array_2d(),
            glow: [style.glow.facet_brightness, style.glow.intensity, 0.0, 0.0],
            facets,
        }
    }

    /// Draw one frame with the widget's derived style.
    pub fn render(&mut self, style: &FrameStyle) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms(style)),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("gem-encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gem-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.972,
                            g: 0.980,
                            b: 0.988,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(mesh) = &self.mesh_data {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.draw(0..mesh.vertex_count, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("gem-depth"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_size_is_16_byte_aligned() {
        let size = std::mem::size_of::<FrameUniforms>();
        assert_eq!(size, 64 + 64 + 16 + 16 * MAX_FACET_SLOTS);
        assert_eq!(size % 16, 0);
    }

    #[test]
    fn model_matrix_is_identity_at_mount() {
        let style = FrameStyle {
            glow: lapidary_interact::GlowStyle::RESTING,
            eye: glam::Vec3::new(0.0, 0.0, 8.0),
            up: glam::Vec3::Y,
            idle_yaw: 0.0,
            idle_tilt: 0.0,
            facets: Vec::new(),
        };
        assert_eq!(model_matrix(&style), Mat4::IDENTITY);
    }
}
