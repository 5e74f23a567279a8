//! GPU types and helpers shared by the instanced shape renderers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn from_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self {
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

/// Binding 0 of every shape pipeline: the viewport uniform, vertex stage.
pub(super) fn viewport_bgl_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ViewportUniform>() as u64),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<ViewportUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers.
pub(super) struct QuadBuffers {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable per-instance vertex buffer.
#[derive(Default)]
pub(super) struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    /// Uploads `instances`, growing to the next power of two (min 64) first.
    pub(super) fn upload<T: Pod>(&mut self, ctx: &RenderCtx<'_>, label: &str, instances: &[T]) {
        if instances.len() > self.capacity || self.buffer.is_none() {
            let cap = instances.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }
        if let Some(buffer) = &self.buffer {
            ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(instances));
        }
    }

    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Builds an instanced quad pipeline: slot 0 is the unit quad, slot 1 the
/// per-instance data; entry points `vs_main` / `fs_main`; premultiplied blend.
pub(super) fn instanced_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_src: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'_>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} shader")),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
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
    })
}

/// Pipeline plus the viewport bind group shared by the rect and circle passes.
pub(super) struct ShapePipeline {
    pub format: wgpu::TextureFormat,
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    pub viewport_ubo: wgpu::Buffer,
    pub quad: QuadBuffers,
}

impl ShapePipeline {
    pub(super) fn new(
        ctx: &RenderCtx<'_>,
        label: &str,
        shader_src: &str,
        instance_layout: wgpu::VertexBufferLayout<'_>,
    ) -> Self {
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} bgl")),
            entries: &[viewport_bgl_entry()],
        });
        let pipeline = instanced_pipeline(ctx, label, shader_src, &bgl, instance_layout);
        let viewport_ubo = create_viewport_ubo(ctx, &format!("{label} viewport ubo"));
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() }],
        });
        log::debug!("{label}: pipeline built for {:?}", ctx.surface_format);
        Self { format: ctx.surface_format, pipeline, bind_group, viewport_ubo, quad: QuadBuffers::new(ctx, label) }
    }

    /// Rebuilds when missing or when the target format changed.
    pub(super) fn ensure<'s>(
        slot: &'s mut Option<Self>,
        ctx: &RenderCtx<'_>,
        label: &str,
        shader_src: &str,
        instance_layout: wgpu::VertexBufferLayout<'_>,
    ) -> &'s Self {
        if slot.as_ref().is_some_and(|p| p.format != ctx.surface_format) {
            *slot = None;
        }
        slot.get_or_insert_with(|| Self::new(ctx, label, shader_src, instance_layout))
    }

    /// Writes the viewport, then draws `count` instances from `instances`.
    pub(super) fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        rpass: &mut wgpu::RenderPass<'_>,
        instances: &wgpu::Buffer,
        count: u32,
    ) {
        ctx.queue.write_buffer(&self.viewport_ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(self.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..count);
    }
}
