use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::{Rect, Vec2};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
///
/// The default handle names the first font a system loads.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts.
///
/// Passed to the text renderer each frame so new glyphs can be rasterized on
/// demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Advance width and line height of a single line, in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };
        let layout = layout_line(font, text, size);
        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Pen position after each glyph, not the bitmap edge, so trailing
        // spaces and side bearings count.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w, layout.height())
    }

    /// Tight bounds of the inked pixels, relative to the line-box origin.
    ///
    /// `None` for unknown fonts or text without visible glyphs.
    #[must_use]
    pub fn ink_bounds(&self, text: &str, id: FontId, size: f32) -> Option<Rect> {
        let font = self.get(id)?;
        let layout = layout_line(font, text, size);

        let mut min = Vec2::new(f32::MAX, f32::MAX);
        let mut max = Vec2::new(f32::MIN, f32::MIN);
        for g in layout.glyphs().iter().filter(|g| g.width > 0 && g.height > 0) {
            min.x = min.x.min(g.x);
            min.y = min.y.min(g.y);
            max.x = max.x.max(g.x + g.width as f32);
            max.y = max.y.max(g.y + g.height as f32);
        }
        (max.x > min.x).then(|| Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    /// Line-box origin that puts the inked centre of `text` on `center`.
    pub fn centered_origin(&self, text: &str, id: FontId, size: f32, center: Vec2) -> Vec2 {
        match self.ink_bounds(text, id, size) {
            Some(ink) => center - ink.center(),
            None => {
                let m = self.measure_text(text, id, size);
                center - m * 0.5
            }
        }
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn layout_line(font: &fontdue::Font, text: &str, size: f32) -> Layout<()> {
    let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, size, 0));
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_font_measures_as_empty_line() {
        let fs = FontSystem::new();
        let m = fs.measure_text("12", FontId(3), 20.0);
        assert_eq!(m.x, 0.0);
        assert!((m.y - 24.0).abs() < 1e-4);
        assert!(fs.ink_bounds("12", FontId(3), 20.0).is_none());
    }

    #[test]
    fn unknown_font_centres_on_line_box() {
        let fs = FontSystem::new();
        let o = fs.centered_origin("1", FontId(0), 20.0, Vec2::new(100.0, 100.0));
        assert_eq!(o.x, 100.0);
        assert!((o.y - 88.0).abs() < 1e-4);
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(b"not a font").is_err());
    }
}
