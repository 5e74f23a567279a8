use winit::dpi::PhysicalSize;

/// Texture size and format the canvas is currently allocated for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct CanvasKey {
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
}

struct CanvasTexture {
    key: CanvasKey,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
}

struct BlitPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

/// Offscreen color target whose contents persist between frames.
///
/// Drawing onto it accumulates: a translucent full-screen fill followed by
/// new content leaves fading trails of everything drawn before. Each frame
/// the canvas is copied onto the swapchain before any overlay is drawn.
///
/// The texture is reallocated (and starts black) whenever the drawable size
/// or surface format changes, or after [`RetainedCanvas::invalidate`].
#[derive(Default)]
pub struct RetainedCanvas {
    texture: Option<CanvasTexture>,
    blit: Option<BlitPipeline>,
    pending_clear: bool,
}

impl RetainedCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the accumulated contents; the next frame starts from black.
    pub fn invalidate(&mut self) {
        self.pending_clear = true;
    }

    /// Makes the canvas match `size`/`format`. Returns `true` when the
    /// contents were lost (new allocation) and must be cleared before use.
    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> bool {
        let key = CanvasKey { width: size.width.max(1), height: size.height.max(1), format };

        let blit = match self.blit.take() {
            Some(b) if b.format == format => b,
            _ => {
                // A new layout invalidates the texture's bind group as well.
                self.texture = None;
                build_blit_pipeline(device, format)
            }
        };

        let reallocated = needs_realloc(self.texture.as_ref().map(|t| t.key), key);
        if reallocated {
            log::debug!("canvas: allocating {}x{} {:?}", key.width, key.height, format);
            self.texture = Some(create_canvas_texture(device, &blit.bind_group_layout, key));
        }
        self.blit = Some(blit);

        let lost = reallocated || self.pending_clear;
        self.pending_clear = false;
        lost
    }

    pub(crate) fn view(&self) -> Option<&wgpu::TextureView> {
        self.texture.as_ref().map(|t| &t.view)
    }

    /// Fills the canvas with opaque black.
    pub(crate) fn clear(&self, encoder: &mut wgpu::CommandEncoder) {
        let Some(tex) = self.texture.as_ref() else { return };
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("digitfall canvas clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &tex.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    /// Copies the canvas onto `target`, replacing its contents.
    pub(crate) fn blit(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let (Some(tex), Some(blit)) = (self.texture.as_ref(), self.blit.as_ref()) else { return };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("digitfall canvas blit"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_pipeline(&blit.pipeline);
        rpass.set_bind_group(0, &tex.bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

fn needs_realloc(current: Option<CanvasKey>, wanted: CanvasKey) -> bool {
    current != Some(wanted)
}

fn create_canvas_texture(device: &wgpu::Device, bgl: &wgpu::BindGroupLayout, key: CanvasKey) -> CanvasTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("digitfall retained canvas"),
        size: wgpu::Extent3d { width: key.width, height: key.height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: key.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("digitfall canvas bind group"),
        layout: bgl,
        entries: &[wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) }],
    });
    CanvasTexture { key, view, bind_group }
}

fn build_blit_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> BlitPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("digitfall canvas shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shapes/shaders/canvas.wgsl").into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("digitfall canvas bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        }],
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("digitfall canvas pipeline layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("digitfall canvas pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
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
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    BlitPipeline { format, pipeline, bind_group_layout }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(w: u32, h: u32, format: wgpu::TextureFormat) -> CanvasKey {
        CanvasKey { width: w, height: h, format }
    }

    #[test]
    fn first_use_allocates() {
        assert!(needs_realloc(None, key(800, 600, wgpu::TextureFormat::Bgra8UnormSrgb)));
    }

    #[test]
    fn same_size_and_format_keeps_contents() {
        let k = key(800, 600, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert!(!needs_realloc(Some(k), k));
    }

    #[test]
    fn size_or_format_change_reallocates() {
        let k = key(800, 600, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert!(needs_realloc(Some(k), key(801, 600, wgpu::TextureFormat::Bgra8UnormSrgb)));
        assert!(needs_realloc(Some(k), key(800, 600, wgpu::TextureFormat::Rgba8UnormSrgb)));
    }
}
