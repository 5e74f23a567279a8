use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{InstanceBuffer, ShapePipeline};

const LABEL: &str = "digitfall rect";

/// Renderer for `DrawCmd::Rect`.
#[derive(Default)]
pub struct RectRenderer {
    pipeline: Option<ShapePipeline>,
    instances: InstanceBuffer,
    scratch: Vec<RectInstance>,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.scratch.clear();
        self.scratch.extend(draw_list.iter().filter_map(|cmd| match cmd {
            DrawCmd::Rect(cmd) => {
                let rect = cmd.rect.normalized();
                (!rect.is_empty()).then(|| RectInstance {
                    origin: [rect.origin.x, rect.origin.y],
                    size: [rect.size.x, rect.size.y],
                    color: cmd.color.to_array(),
                })
            }
            _ => None,
        }));
        if self.scratch.is_empty() {
            return;
        }

        self.instances.upload(ctx, "digitfall rect instance vbo", &self.scratch);
        let pipeline =
            ShapePipeline::ensure(&mut self.pipeline, ctx, LABEL, include_str!("shaders/rect.wgsl"), RectInstance::layout());
        let Some(vbo) = self.instances.buffer() else { return };

        let mut rpass = target.load_pass("digitfall rect pass");
        pipeline.draw(ctx, &mut rpass, vbo, self.scratch.len() as u32);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  origin [f32; 2]   loc 1
///  offset  8  size   [f32; 2]   loc 2
///  offset 16  color  [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
