use super::column::Column;

/// How non-highlighted symbols fade.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Falloff {
    /// `1 - |index - highlight| * step`: symbols dim with distance from the focus.
    Distance { step: f32, floor: f32 },
    /// `1 - index * step`: symbols dim towards the tail regardless of focus.
    Positional { step: f32, floor: f32 },
}

impl Falloff {
    #[inline]
    pub fn params(&self) -> (f32, f32) {
        match *self {
            Falloff::Distance { step, floor } | Falloff::Positional { step, floor } => (step, floor),
        }
    }

    #[inline]
    pub fn floor(&self) -> f32 {
        self.params().1
    }
}

/// Focus and opacity of the symbols in a column.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HighlightModel {
    falloff: Falloff,
}

impl HighlightModel {
    pub fn new(falloff: Falloff) -> Self {
        Self { falloff }
    }

    #[inline]
    pub fn falloff(&self) -> Falloff {
        self.falloff
    }

    #[inline]
    pub fn is_emphasized(&self, column: &Column, index: usize) -> bool {
        index == column.highlight()
    }

    /// Opacity in `[floor, 1.0]`; the highlighted symbol is always `1.0`.
    pub fn opacity(&self, column: &Column, index: usize) -> f32 {
        if self.is_emphasized(column, index) {
            return 1.0;
        }
        let (steps, step, floor) = match self.falloff {
            Falloff::Distance { step, floor } => (index.abs_diff(column.highlight()), step, floor),
            Falloff::Positional { step, floor } => (index, step, floor),
        };
        (1.0 - steps as f32 * step).clamp(floor, 1.0)
    }
}
