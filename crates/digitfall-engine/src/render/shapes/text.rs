use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    create_viewport_ubo, instanced_pipeline, viewport_bgl_entry, InstanceBuffer, QuadBuffers,
    ViewportUniform,
};

// ── atlas ─────────────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

/// Shelf packer for the glyph atlas: left to right, new shelf when a row
/// is full, and permanently full once a glyph no longer fits vertically.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self { size, cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }

    /// Reserves a `w`×`h` slot; returns its top-left texel.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > self.size || w + 2 * GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }
        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

struct Atlas {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized by fontdue at physical size on first use and cached
/// in a 2048 × 2048 R8Unorm atlas for the renderer's lifetime, keyed by
/// `GlyphRasterConfig` (font, glyph, pixel size). The rain only ever shows a
/// handful of digits at a couple of sizes, so the atlas never fills in
/// practice; when it does, further glyphs are skipped with a warning.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    atlas: Option<Atlas>,
    packer: ShelfPacker,
    warned_full: bool,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    scratch: Vec<GlyphInstance>,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            sampler: None,
            atlas: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            warned_full: false,
            glyph_cache: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::default(),
            scratch: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all `DrawCmd::Text` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        font_system: &FontSystem,
    ) {
        if !draw_list.iter().any(|c| matches!(c, DrawCmd::Text(_))) {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_atlas(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "digitfall text"));
        }

        let scale = ctx.scale_factor;
        self.scratch.clear();

        for cmd in draw_list.iter() {
            let DrawCmd::Text(cmd) = cmd else { continue };
            let Some(font) = font_system.get(cmd.font) else {
                log::warn!("text: unknown {:?}, skipping", cmd.font);
                continue;
            };
            if cmd.size <= 0.0 || cmd.color.a <= 0.0 {
                continue;
            }

            // Lay out in physical pixels so glyphs stay crisp at any scale.
            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, g.x, g.y, g.width, g.height))
                .collect();

            let color = cmd.color.to_array();
            for (key, x, y, w, h) in glyphs {
                if !self.glyph_cache.contains_key(&key) {
                    let (metrics, bitmap) = font.rasterize_config(key);
                    if metrics.width == 0 || metrics.height == 0 {
                        continue;
                    }
                    match self.upload_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32) {
                        Some(entry) => {
                            self.glyph_cache.insert(key, entry);
                        }
                        None => continue,
                    }
                }
                let Some(cached) = self.glyph_cache.get(&key) else { continue };

                self.scratch.push(GlyphInstance {
                    dst_min: [x / scale, y / scale],
                    dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        self.instances.upload(ctx, "digitfall text instance vbo", &self.scratch);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(atlas) = self.atlas.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(vbo) = self.instances.buffer() else { return };

        ctx.queue.write_buffer(&atlas.viewport_ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));

        let mut rpass = target.load_pass("digitfall text pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &atlas.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.scratch.len() as u32);
    }

    // ── atlas helpers ──────────────────────────────────────────────────────

    fn upload_glyph(&mut self, ctx: &RenderCtx<'_>, bitmap: &[u8], w: u32, h: u32) -> Option<CachedGlyph> {
        let Some((gx, gy)) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!("text: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); skipping new glyphs");
                self.warned_full = true;
            }
            return None;
        };
        let atlas = self.atlas.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &atlas.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let size = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / size, gy as f32 / size],
            uv_max: [(gx + w) as f32 / size, (gy + h) as f32 / size],
        })
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("digitfall text bgl"),
            entries: &[
                viewport_bgl_entry(),
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

        let pipeline = instanced_pipeline(
            ctx,
            "digitfall text",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        // The bind group references the old layout; rebuild it, keep the texture.
        if let Some(atlas) = self.atlas.take() {
            self.atlas = self.bind_atlas(ctx, atlas.texture);
        }
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas.is_some() {
            return;
        }
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("digitfall text atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.packer = ShelfPacker::new(ATLAS_SIZE);
        self.glyph_cache.clear();
        self.warned_full = false;
        self.atlas = self.bind_atlas(ctx, texture);
    }

    fn bind_atlas(&mut self, ctx: &RenderCtx<'_>, texture: wgpu::Texture) -> Option<Atlas> {
        let bgl = self.bind_group_layout.as_ref()?;
        let sampler = self.sampler.get_or_insert_with(|| {
            ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("digitfall text sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            })
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let viewport_ubo = create_viewport_ubo(ctx, "digitfall text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("digitfall text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(sampler) },
            ],
        });
        Some(Atlas { texture, bind_group, viewport_ubo })
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_left_to_right_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 8), Some((1, 1)));
        assert_eq!(p.place(10, 12), Some((12, 1)));
        // 23 + 10 + 1 > 32: next shelf sits below the tallest glyph of the row.
        assert_eq!(p.place(10, 4), Some((1, 14)));
    }

    #[test]
    fn becomes_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(14, 14), Some((1, 1)));
        assert_eq!(p.place(2, 2), None);
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn rejects_glyph_wider_than_atlas() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(20, 2), None);
    }
}
