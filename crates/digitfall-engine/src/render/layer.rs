use crate::scene::DrawList;
use crate::text::FontSystem;

use super::shapes::{circle::CircleRenderer, rect::RectRenderer, text::TextRenderer};
use super::{RenderCtx, RenderTarget};

/// One full set of shape renderers.
///
/// Renderers upload their instances with `Queue::write_buffer`, which lands
/// before the frame's command buffer runs; a set can therefore only draw one
/// list per frame. Frames that draw two layers (retained content, then an
/// overlay) use two sets.
#[derive(Default)]
pub struct LayerRenderer {
    rect: RectRenderer,
    circle: CircleRenderer,
    text: TextRenderer,
}

impl LayerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `list` onto `target`: rects, then circles, then text.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        fonts: &FontSystem,
    ) {
        if list.is_empty() || !ctx.viewport.is_valid() {
            return;
        }
        self.rect.render(ctx, target, list);
        self.circle.render(ctx, target, list);
        self.text.render(ctx, target, list, fonts);
    }
}
