use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Solid rectangle payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_solid_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect(RectCmd { rect, color }));
    }
}
