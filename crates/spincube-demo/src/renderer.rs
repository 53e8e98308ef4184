//! The cube render pipeline and its GPU resources.
//!
//! All buffers are built once from the static geometry arrays and never
//! touched again; the only per-frame GPU writes are the three matrices in
//! the uniform buffer. The texture starts as a 1x1 placeholder and may be
//! swapped exactly once when the async load completes.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use spincube_engine::render::{RenderCtx, RenderTarget};

use crate::geometry;
use crate::texture::CubeTexture;
use crate::transform::FrameMatrices;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    projection: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl Uniforms {
    fn from_matrices(m: &FrameMatrices) -> Self {
        Self {
            projection: m.projection.to_cols_array_2d(),
            model_view: m.model_view.to_cols_array_2d(),
            normal: m.normal.to_cols_array_2d(),
        }
    }
}

/// Vertex buffer layout for one non-interleaved attribute stream.
fn attribute_layout(
    format: wgpu::VertexFormat,
    location: u32,
    attrs: &[wgpu::VertexAttribute; 1],
) -> wgpu::VertexBufferLayout<'_> {
    debug_assert_eq!(attrs[0].shader_location, location);
    wgpu::VertexBufferLayout {
        array_stride: format.size(),
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: attrs,
    }
}

/// Renders the rotating cube: one indexed triangle-list draw per frame.
#[derive(Default)]
pub struct CubeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    position_vbo: Option<wgpu::Buffer>,
    normal_vbo: Option<wgpu::Buffer>,
    color_vbo: Option<wgpu::Buffer>,
    tex_coord_vbo: Option<wgpu::Buffer>,
    index_buf: Option<wgpu::Buffer>,

    texture: Option<CubeTexture>,
}

impl CubeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the bound texture (placeholder -> loaded image).
    ///
    /// Takes effect on the next draw; the stale bind group is rebuilt then.
    pub fn set_texture(&mut self, texture: CubeTexture) {
        self.texture = Some(texture);
        self.bind_group = None;
    }

    /// Records the cube draw into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        matrices: &FrameMatrices,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let uniforms = Uniforms::from_matrices(matrices);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniforms));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(position_vbo) = self.position_vbo.as_ref() else { return };
        let Some(normal_vbo) = self.normal_vbo.as_ref() else { return };
        let Some(color_vbo) = self.color_vbo.as_ref() else { return };
        let Some(tex_coord_vbo) = self.tex_coord_vbo.as_ref() else { return };
        let Some(index_buf) = self.index_buf.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("spincube cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, position_vbo.slice(..));
        rpass.set_vertex_buffer(1, normal_vbo.slice(..));
        rpass.set_vertex_buffer(2, color_vbo.slice(..));
        rpass.set_vertex_buffer(3, tex_coord_vbo.slice(..));
        rpass.set_index_buffer(index_buf.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..geometry::INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader_src = include_str!("shaders/cube.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spincube cube shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("spincube cube bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: Some(uniform_min_binding_size()),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("spincube cube pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        const POSITION_ATTR: [wgpu::VertexAttribute; 1] =
            wgpu::vertex_attr_array![0 => Float32x3];
        const NORMAL_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
        const COLOR_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];
        const TEX_COORD_ATTR: [wgpu::VertexAttribute; 1] =
            wgpu::vertex_attr_array![3 => Float32x2];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spincube cube pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    attribute_layout(wgpu::VertexFormat::Float32x3, 0, &POSITION_ATTR),
                    attribute_layout(wgpu::VertexFormat::Float32x3, 1, &NORMAL_ATTR),
                    attribute_layout(wgpu::VertexFormat::Float32x4, 2, &COLOR_ATTR),
                    attribute_layout(wgpu::VertexFormat::Float32x2, 3, &TEX_COORD_ATTR),
                ],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
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

            // Near things obscure far things; depth cleared to 1.0 each frame.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.position_vbo.is_some() {
            return;
        }

        let make = |label: &str, contents: &[u8], usage: wgpu::BufferUsages| {
            ctx.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents,
                    usage,
                })
        };

        self.position_vbo = Some(make(
            "spincube position vbo",
            bytemuck::cast_slice(&geometry::POSITIONS),
            wgpu::BufferUsages::VERTEX,
        ));
        self.normal_vbo = Some(make(
            "spincube normal vbo",
            bytemuck::cast_slice(&geometry::NORMALS),
            wgpu::BufferUsages::VERTEX,
        ));
        self.color_vbo = Some(make(
            "spincube color vbo",
            bytemuck::cast_slice(&geometry::vertex_colors()),
            wgpu::BufferUsages::VERTEX,
        ));
        self.tex_coord_vbo = Some(make(
            "spincube tex coord vbo",
            bytemuck::cast_slice(&geometry::TEX_COORDS),
            wgpu::BufferUsages::VERTEX,
        ));
        self.index_buf = Some(make(
            "spincube index buffer",
            bytemuck::cast_slice(&geometry::INDICES),
            wgpu::BufferUsages::INDEX,
        ));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.texture.is_none() {
            self.texture = Some(CubeTexture::placeholder(ctx.device, ctx.queue));
        }
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(texture) = self.texture.as_ref() else { return };

        let uniform_ubo = self.uniform_ubo.get_or_insert_with(|| {
            ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("spincube uniform ubo"),
                size: std::mem::size_of::<Uniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spincube cube bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        self.bind_group = Some(bind_group);
    }
}

/// Minimum binding size for the uniform buffer.
///
/// Three mat4x4 fields (192 bytes), so the size is non-zero by construction.
fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<Uniforms>() as u64)
        .expect("Uniforms has non-zero size by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform;

    #[test]
    fn uniform_block_is_three_tightly_packed_mat4() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 3 * 64);
    }

    #[test]
    fn uniforms_preserve_matrix_columns() {
        let m = transform::FrameMatrices::compute(0.8, 1.5);
        let u = Uniforms::from_matrices(&m);
        assert_eq!(u.projection, m.projection.to_cols_array_2d());
        assert_eq!(u.model_view, m.model_view.to_cols_array_2d());
        assert_eq!(u.normal, m.normal.to_cols_array_2d());
    }
}
