use super::DrawCmd;

/// Recorded draw stream for one layer of a frame.
///
/// Layer order is fixed by the renderers: every rect, then every circle,
/// then every text run. Within a kind, commands paint in insertion order.
/// Content that must sit above text goes in a later layer.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded commands, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::text::FontId;

    #[test]
    fn keeps_insertion_order() {
        let mut list = DrawList::new();
        list.push_solid_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        list.push_solid_circle(Vec2::new(5.0, 5.0), 3.0, Color::BLACK);
        list.push_text("7", FontId(0), 24.0, Color::BLACK, Vec2::zero());

        let kinds: Vec<&str> = list
            .iter()
            .map(|c| match c {
                DrawCmd::Rect(_) => "rect",
                DrawCmd::Circle(_) => "circle",
                DrawCmd::Text(_) => "text",
            })
            .collect();
        assert_eq!(kinds, vec!["rect", "circle", "text"]);
    }

    #[test]
    fn clear_empties() {
        let mut list = DrawList::new();
        list.push_solid_circle(Vec2::zero(), 1.0, Color::BLACK);
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
    }
}
