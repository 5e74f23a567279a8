use digitfall_core::surface::DrawSurface;
use digitfall_engine::coords::{Rect, Vec2};
use digitfall_engine::paint::Color;
use digitfall_engine::scene::DrawList;
use digitfall_engine::text::{FontId, FontSystem};

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Colours and glyph size of one rain look.
#[derive(Debug, Clone)]
pub struct RainStyle {
    pub font_size: f32,
    /// Trail glyph colour at full opacity.
    pub glyph: Color,
    /// Glyph drawn on top of the highlight disc.
    pub emphasized_glyph: Color,
    pub disc: Color,
}

impl RainStyle {
    /// Grey on black, `rgba(160,160,160,o)` trails on `rgba(128,128,128,0.8)` discs.
    pub fn grey() -> Self {
        Self {
            font_size: 24.0,
            glyph: Color::from_srgb_u8(160, 160, 160, 1.0),
            emphasized_glyph: Color::BLACK,
            disc: Color::from_srgb_u8(128, 128, 128, 0.8),
        }
    }

    /// Larger glyphs and a slightly lighter disc for the fixed columns.
    pub fn exact() -> Self {
        Self { font_size: 28.0, disc: Color::from_srgb_u8(128, 128, 128, 0.7), ..Self::grey() }
    }

    pub fn green() -> Self {
        Self { font_size: 20.0, glyph: Color::from_srgb_u8(0, 255, 0, 1.0), ..Self::grey() }
    }
}

/// Line-box offsets that centre each digit on a point, measured once.
#[derive(Debug, Clone)]
pub struct DigitMetrics {
    font: FontId,
    size: f32,
    offsets: [Vec2; 10],
}

impl DigitMetrics {
    pub fn measure(fonts: &FontSystem, font: FontId, size: f32) -> Self {
        let offsets = std::array::from_fn(|d| fonts.centered_origin(DIGITS[d], font, size, Vec2::zero()));
        Self { font, size, offsets }
    }
}

/// [`DrawSurface`] that records into a [`DrawList`].
pub struct ListSurface<'a> {
    list: &'a mut DrawList,
    style: &'a RainStyle,
    metrics: &'a DigitMetrics,
    bounds: Rect,
}

impl<'a> ListSurface<'a> {
    pub fn new(list: &'a mut DrawList, style: &'a RainStyle, metrics: &'a DigitMetrics, bounds: Rect) -> Self {
        Self { list, style, metrics, bounds }
    }
}

impl DrawSurface for ListSurface<'_> {
    fn fill_background(&mut self, alpha: f32) {
        self.list.push_solid_rect(self.bounds, Color::BLACK.faded(alpha));
    }

    fn draw_glyph(&mut self, symbol: u8, x: f32, y: f32, opacity: f32, emphasized: bool) {
        let d = usize::from(symbol.min(9));
        let color = if emphasized { self.style.emphasized_glyph } else { self.style.glyph.faded(opacity) };
        let origin = self.metrics.offsets[d] + Vec2::new(x, y);
        self.list.push_text(DIGITS[d], self.metrics.font, self.metrics.size, color, origin);
    }

    fn draw_highlight_disc(&mut self, x: f32, y: f32, radius: f32) {
        self.list.push_solid_circle(Vec2::new(x, y), radius, self.style.disc);
    }
}
