//! Digit value → normalized indicator position.

use std::num::NonZeroU8;

use crate::clock::{ChangeFlags, DigitSlot, TimeDigits};

/// `current / max`, clamped into `[0, 1]`.
#[inline]
pub fn position(current: u8, max: NonZeroU8) -> f32 {
    (current as f32 / max.get() as f32).clamp(0.0, 1.0)
}

/// A single slider: the digit, its ceiling, and whether it changed this tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SliderDigit {
    pub value: u8,
    pub max: NonZeroU8,
    pub changed: bool,
}

impl SliderDigit {
    pub fn new(value: u8, max: NonZeroU8, changed: bool) -> Self {
        Self { value: value.min(max.get()), max, changed }
    }

    /// Builds all six sliders from one tick. Sentinel digits read as `0`.
    pub fn from_tick(digits: &TimeDigits, changes: &ChangeFlags) -> [SliderDigit; 6] {
        DigitSlot::ALL.map(|slot| {
            let value = digits.get(slot).max(0) as u8;
            SliderDigit::new(value, slot.max(), changes.get(slot))
        })
    }

    #[inline]
    pub fn position(&self) -> f32 {
        position(self.value, self.max)
    }

    /// Every digit the slider can show, `0..=max`.
    pub fn candidates(&self) -> std::ops::RangeInclusive<u8> {
        0..=self.max.get()
    }

    /// Width of the moving bar as a fraction of the track.
    #[inline]
    pub fn bar_width(&self) -> f32 {
        1.0 / (self.max.get() as f32 + 1.0)
    }

    /// Centre of the vertical indicator as a fraction of the track.
    #[inline]
    pub fn indicator_center(&self) -> f32 {
        self.position() + self.bar_width() / 2.0
    }
}
