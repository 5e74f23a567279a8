use digitfall_engine::coords::{Rect, Vec2, Viewport};
use digitfall_engine::paint::Color;
use digitfall_engine::scene::DrawList;
use digitfall_engine::text::{FontId, FontSystem};

/// Thin drawing helper over a [`DrawList`] with one font.
pub struct Painter<'a> {
    list: &'a mut DrawList,
    fonts: &'a FontSystem,
    font: FontId,
}

impl<'a> Painter<'a> {
    pub fn new(list: &'a mut DrawList, fonts: &'a FontSystem, font: FontId) -> Self {
        Self { list, fonts, font }
    }

    pub fn measure(&self, text: &str, size: f32) -> Vec2 {
        self.fonts.measure_text(text, self.font, size)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.list.push_solid_rect(rect, color);
    }

    /// `fill` inset by `border` inside a `stroke` coloured frame.
    pub fn framed_rect(&mut self, rect: Rect, fill: Color, stroke: Color, border: f32) {
        self.list.push_solid_rect(rect, stroke);
        self.list.push_solid_rect(rect.inset(border), fill);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.list.push_solid_circle(center, radius, color);
    }

    /// Text with its line box's top-left at `origin`.
    pub fn text(&mut self, text: &str, size: f32, color: Color, origin: Vec2) {
        self.list.push_text(text, self.font, size, color, origin);
    }

    /// Text whose inked centre sits on `center`.
    pub fn text_centered(&mut self, text: &str, size: f32, color: Color, center: Vec2) {
        let origin = self.fonts.centered_origin(text, self.font, size, center);
        self.list.push_text(text, self.font, size, color, origin);
    }

    /// Text whose line box ends at `top_right`.
    pub fn text_right(&mut self, text: &str, size: f32, color: Color, top_right: Vec2) {
        let w = self.measure(text, size).x;
        self.list.push_text(text, self.font, size, color, Vec2::new(top_right.x - w, top_right.y));
    }
}

/// Two-line captions for the four corners, in reading order:
/// top-left, top-right, bottom-left, bottom-right.
pub type Captions<'s> = [[&'s str; 2]; 4];

/// Small status lines in the corners, `margin` in from each edge.
pub fn corner_captions(p: &mut Painter<'_>, vp: Viewport, captions: &Captions<'_>, size: f32, margin: f32, color: Color) {
    let line = size * 1.4;
    let [tl, tr, bl, br] = captions;
    let bottom = vp.height - margin - 2.0 * line;
    for (i, text) in tl.iter().enumerate() {
        p.text(text, size, color, Vec2::new(margin, margin + i as f32 * line));
    }
    for (i, text) in tr.iter().enumerate() {
        p.text_right(text, size, color, Vec2::new(vp.width - margin, margin + i as f32 * line));
    }
    for (i, text) in bl.iter().enumerate() {
        p.text(text, size, color, Vec2::new(margin, bottom + i as f32 * line));
    }
    for (i, text) in br.iter().enumerate() {
        p.text_right(text, size, color, Vec2::new(vp.width - margin, bottom + i as f32 * line));
    }
}

#[cfg(test)]
mod tests {
    use digitfall_engine::scene::DrawCmd;

    use super::*;

    #[test]
    fn captions_land_in_their_corners() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, FontId::default());
        let caps: Captions<'_> = [["a", "b"], ["c", "d"], ["e", "f"], ["g", "h"]];
        corner_captions(&mut p, Viewport::new(800.0, 600.0), &caps, 10.0, 16.0, Color::BLACK);

        let origins: Vec<(String, Vec2)> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some((t.text.clone(), t.origin)),
                _ => None,
            })
            .collect();
        assert_eq!(origins.len(), 8);
        assert_eq!(origins[0], ("a".to_string(), Vec2::new(16.0, 16.0)));
        // Unknown font measures zero width, so right-aligned text starts at the margin.
        assert_eq!(origins[2].1.x, 800.0 - 16.0);
        assert!(origins[5].1.y > 500.0);
        assert!(origins[7].1.y > origins[6].1.y);
    }

    #[test]
    fn framed_rect_draws_frame_then_fill() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, FontId::default());
        p.framed_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLACK, Color::from_srgb_u8(34, 197, 94, 1.0), 2.0);

        let rects: Vec<Rect> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect(r) => Some(r.rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects, vec![Rect::new(0.0, 0.0, 100.0, 50.0), Rect::new(2.0, 2.0, 96.0, 46.0)]);
    }
}
