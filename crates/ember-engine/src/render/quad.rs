use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Mat4;
use crate::render::RenderFrame;

/// Vertex of the colored quad: 2D position plus RGB color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x3  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad centered on the origin with a color per corner.
pub const DEFAULT_QUAD: [QuadVertex; 4] = [
    QuadVertex { position: [-0.5, -0.5], color: [0.0, 1.0, 1.0] },
    QuadVertex { position: [0.5, -0.5], color: [0.0, 0.0, 1.0] },
    QuadVertex { position: [-0.5, 0.5], color: [1.0, 0.0, 1.0] },
    QuadVertex { position: [0.5, 0.5], color: [1.0, 0.0, 0.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 3, 2, 1];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadUniforms {
    model: [[f32; 4]; 4],
    view_projection: [[f32; 4]; 4],
}

/// Draws one vertex-colored quad with a model and a view-projection matrix.
pub struct QuadRenderer {
    vertices: [QuadVertex; 4],

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl Default for QuadRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_QUAD)
    }
}

impl QuadRenderer {
    pub fn new(vertices: [QuadVertex; 4]) -> Self {
        Self {
            vertices,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_buffer: None,
            vbo: None,
            ibo: None,
        }
    }

    pub fn vertices(&self) -> &[QuadVertex; 4] {
        &self.vertices
    }

    /// Replaces the quad geometry; uploaded on the next `render`.
    pub fn set_vertices(&mut self, vertices: [QuadVertex; 4]) {
        if self.vertices != vertices {
            self.vertices = vertices;
            self.vbo = None;
        }
    }

    /// Draws the quad into `frame` on top of whatever is already there.
    pub fn render(&mut self, frame: &mut RenderFrame<'_>, model: Mat4, view_projection: Mat4) {
        self.ensure_pipeline(frame.device, frame.format);
        self.ensure_bindings(frame.device);
        self.ensure_buffers(frame.device);

        let Some(uniform_buffer) = self.uniform_buffer.as_ref() else { return };
        let uniforms = QuadUniforms {
            model: model.cols,
            view_projection: view_projection.cols,
        };
        frame.queue.write_buffer(uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };

        let mut rpass = frame.pass("ember quad pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ember quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ember quad bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<QuadUniforms>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ember quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ember quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
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
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("quad pipeline built for {format:?}");

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bind group belongs to the old layout.
        self.bind_group = None;
        self.uniform_buffer = None;
    }

    fn ensure_bindings(&mut self, device: &wgpu::Device) {
        if self.bind_group.is_some() && self.uniform_buffer.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ember quad ubo"),
            size: std::mem::size_of::<QuadUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ember quad bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.uniform_buffer = Some(uniform_buffer);
        self.bind_group = Some(bind_group);
    }

    fn ensure_buffers(&mut self, device: &wgpu::Device) {
        if self.vbo.is_none() {
            self.vbo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("ember quad vbo"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }

        if self.ibo.is_none() {
            self.ibo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("ember quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_shader_inputs() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 20);
        assert_eq!(QuadVertex::layout().array_stride, 20);
    }

    #[test]
    fn uniforms_are_two_mat4() {
        assert_eq!(std::mem::size_of::<QuadUniforms>(), 128);
    }

    #[test]
    fn indices_cover_two_triangles() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|i| (*i as usize) < DEFAULT_QUAD.len()));
    }

    #[test]
    fn set_vertices_invalidates_buffer_only_on_change() {
        let mut quad = QuadRenderer::default();
        quad.set_vertices(DEFAULT_QUAD);
        assert_eq!(quad.vertices(), &DEFAULT_QUAD);

        let mut v = DEFAULT_QUAD;
        v[0].color = [1.0, 1.0, 1.0];
        quad.set_vertices(v);
        assert_eq!(quad.vertices()[0].color, [1.0, 1.0, 1.0]);
    }
}
