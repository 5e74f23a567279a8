use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Filled, anti-aliased disc payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_solid_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCmd::Circle(CircleCmd { center, radius, color }));
    }
}
