use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{InstanceBuffer, ShapePipeline};

const LABEL: &str = "digitfall circle";

/// Renderer for `DrawCmd::Circle`: filled discs with a one-pixel AA edge.
#[derive(Default)]
pub struct CircleRenderer {
    pipeline: Option<ShapePipeline>,
    instances: InstanceBuffer,
    scratch: Vec<CircleInstance>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.scratch.clear();
        self.scratch.extend(draw_list.iter().filter_map(|cmd| match cmd {
            DrawCmd::Circle(c) if c.radius > 0.0 => Some(CircleInstance {
                center: [c.center.x, c.center.y],
                radius: c.radius,
                _pad: 0.0,
                color: c.color.to_array(),
            }),
            _ => None,
        }));
        if self.scratch.is_empty() {
            return;
        }

        self.instances.upload(ctx, "digitfall circle instance vbo", &self.scratch);
        let pipeline = ShapePipeline::ensure(
            &mut self.pipeline,
            ctx,
            LABEL,
            include_str!("shaders/circle.wgsl"),
            CircleInstance::layout(),
        );
        let Some(vbo) = self.instances.buffer() else { return };

        let mut rpass = target.load_pass("digitfall circle pass");
        pipeline.draw(ctx, &mut rpass, vbo, self.scratch.len() as u32);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  center [f32; 2]   loc 1
///  offset  8  radius  f32       loc 2
///  offset 12  _pad    f32
///  offset 16  color  [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius: f32,
    _pad: f32,
    color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x2, offset: 0, shader_location: 1 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32, offset: 8, shader_location: 2 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 16, shader_location: 3 },
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
