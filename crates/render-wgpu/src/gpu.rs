use crate::error::RendererError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use colorcube_camera::CameraState;
use colorcube_geometry::{CUBE_VERTICES, Segment, Vertex, edge_segments, triangle_indices};
use colorcube_render::{FrameLayout, Viewport, frame_matrix};
use glam::Mat4;
use wgpu::util::DeviceExt;

/// Wireframe point size in pixels.
pub const POINT_SIZE: f32 = 5.0;

/// Wireframe line width in pixels.
pub const LINE_WIDTH: f32 = 5.0;

/// Background gray.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertices per expanded point or segment quad.
const QUAD_VERTICES: u32 = 6;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    viewport: [f32; 2],
    point_size: f32,
    line_width: f32,
}

impl Uniforms {
    fn new(view: Mat4, viewport: &Viewport) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            viewport: [viewport.width.max(1) as f32, viewport.height.max(1) as f32],
            point_size: POINT_SIZE,
            line_width: LINE_WIDTH,
        }
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
];

const SEGMENT_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x3,
    3 => Float32x3,
];

/// How a pipeline differs from the others.
struct PipelineSpec<'a> {
    label: &'a str,
    vs_entry: &'a str,
    buffer: wgpu::VertexBufferLayout<'a>,
    blend: wgpu::BlendState,
    depth_compare: wgpu::CompareFunction,
}

/// wgpu-based cube renderer.
pub struct WgpuRenderer {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    segment_buffer: wgpu::Buffer,
    segment_count: u32,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    /// Compile the shader, build the pipelines and upload the cube.
    ///
    /// Shader and pipeline creation run inside a validation error scope, so
    /// a bad shader comes back as [`RendererError::ShaderLink`] instead of
    /// reaching the device's uncaptured error handler.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, RendererError> {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(
                Mat4::IDENTITY,
                &FrameLayout::from_size(width, height).left,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });

        let vertex_layout = |step_mode: wgpu::VertexStepMode| wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode,
            attributes: &VERTEX_ATTRIBUTES,
        };

        let fill_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            PipelineSpec {
                label: "fill_pipeline",
                vs_entry: "vs_fill",
                buffer: vertex_layout(wgpu::VertexStepMode::Vertex),
                blend: wgpu::BlendState::REPLACE,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let line_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            PipelineSpec {
                label: "line_pipeline",
                vs_entry: "vs_line",
                buffer: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Segment>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &SEGMENT_ATTRIBUTES,
                },
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );

        let point_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            PipelineSpec {
                label: "point_pipeline",
                vs_entry: "vs_point",
                buffer: vertex_layout(wgpu::VertexStepMode::Instance),
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RendererError::ShaderLink(err.to_string()));
        }

        // The point pipeline reads the same buffer one vertex per instance.
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = triangle_indices();
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let segments = edge_segments();
        let segment_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_segment_buffer"),
            contents: bytemuck::cast_slice(&segments),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            "renderer ready: {} indices, {} segments, format {surface_format:?}",
            indices.len(),
            segments.len()
        );

        Ok(Self {
            fill_pipeline,
            line_pipeline,
            point_pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            segment_buffer,
            segment_count: segments.len() as u32,
            depth_texture,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame: filled cube left, wireframe right.
    ///
    /// `layout` must come from the size of `view`'s texture.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &CameraState,
        layout: &FrameLayout,
    ) {
        let drawable = layout.is_drawable();
        if drawable {
            let uniforms = Uniforms::new(frame_matrix(camera, layout), &layout.left);
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
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

            if drawable {
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);

                // Left: shaded quads.
                set_viewport(&mut pass, &layout.left);
                pass.set_pipeline(&self.fill_pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.index_count, 0, 0..1);

                // Right: face outlines, then corners on top.
                set_viewport(&mut pass, &layout.right);
                pass.set_pipeline(&self.line_pipeline);
                pass.set_vertex_buffer(0, self.segment_buffer.slice(..));
                pass.draw(0..QUAD_VERTICES, 0..self.segment_count);

                pass.set_pipeline(&self.point_pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..QUAD_VERTICES, 0..CUBE_VERTICES.len() as u32);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
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
}

/// Choose the swapchain format from what the surface supports.
///
/// Colors are written unconverted, so a linear (non-sRGB) format is
/// preferred. Falls back to the first supported format.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()
}

fn set_viewport(pass: &mut wgpu::RenderPass<'_>, viewport: &Viewport) {
    pass.set_viewport(
        viewport.x as f32,
        viewport.y as f32,
        viewport.width as f32,
        viewport.height as f32,
        0.0,
        1.0,
    );
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(spec.vs_entry),
            compilation_options: Default::default(),
            buffers: &[spec.buffer],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(spec.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: spec.depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // mat4x4 (64) + vec2 (8) + two f32 (8), 16-byte aligned.
        assert_eq!(std::mem::size_of::<Uniforms>(), 80);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn uniforms_carry_half_viewport_size() {
        let layout = FrameLayout::from_size(600, 600);
        let u = Uniforms::new(Mat4::IDENTITY, &layout.left);
        assert_eq!(u.viewport, [300.0, 600.0]);
        assert_eq!(u.point_size, 5.0);
        assert_eq!(u.line_width, 5.0);
    }

    #[test]
    fn uniforms_never_divide_by_zero() {
        let layout = FrameLayout::from_size(0, 0);
        let u = Uniforms::new(Mat4::IDENTITY, &layout.left);
        assert_eq!(u.viewport, [1.0, 1.0]);
    }

    #[test]
    fn attribute_layouts_fit_their_strides() {
        let last = VERTEX_ATTRIBUTES[1];
        assert_eq!(last.offset + 12, std::mem::size_of::<Vertex>() as u64);
        let last = SEGMENT_ATTRIBUTES[3];
        assert_eq!(last.offset + 12, std::mem::size_of::<Segment>() as u64);
    }

    #[test]
    fn surface_format_prefers_linear() {
        use wgpu::TextureFormat::{Bgra8Unorm, Bgra8UnormSrgb};
        assert_eq!(pick_surface_format(&[Bgra8UnormSrgb, Bgra8Unorm]), Some(Bgra8Unorm));
        assert_eq!(pick_surface_format(&[Bgra8Unorm, Bgra8UnormSrgb]), Some(Bgra8Unorm));
    }

    #[test]
    fn surface_format_falls_back_to_first() {
        use wgpu::TextureFormat::{Bgra8UnormSrgb, Rgba8UnormSrgb};
        assert_eq!(
            pick_surface_format(&[Rgba8UnormSrgb, Bgra8UnormSrgb]),
            Some(Rgba8UnormSrgb)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn clear_color_is_mid_gray() {
        assert_eq!((CLEAR_COLOR.r, CLEAR_COLOR.g, CLEAR_COLOR.b), (0.5, 0.5, 0.5));
    }
}
