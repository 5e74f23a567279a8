use std::num::NonZeroU8;

/// One of the six digit positions of an `HH:MM:SS` reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DigitSlot {
    HourTens,
    HourOnes,
    MinuteTens,
    MinuteOnes,
    SecondTens,
    SecondOnes,
}

impl DigitSlot {
    /// All slots in display order.
    pub const ALL: [DigitSlot; 6] = [
        DigitSlot::HourTens,
        DigitSlot::HourOnes,
        DigitSlot::MinuteTens,
        DigitSlot::MinuteOnes,
        DigitSlot::SecondTens,
        DigitSlot::SecondOnes,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            DigitSlot::HourTens => 0,
            DigitSlot::HourOnes => 1,
            DigitSlot::MinuteTens => 2,
            DigitSlot::MinuteOnes => 3,
            DigitSlot::SecondTens => 4,
            DigitSlot::SecondOnes => 5,
        }
    }

    /// Largest value this slot can hold on a 24-hour clock.
    pub const fn max(self) -> NonZeroU8 {
        let v = match self {
            DigitSlot::HourTens => 2,
            DigitSlot::MinuteTens | DigitSlot::SecondTens => 5,
            DigitSlot::HourOnes | DigitSlot::MinuteOnes | DigitSlot::SecondOnes => 9,
        };
        match NonZeroU8::new(v) {
            Some(n) => n,
            None => unreachable!(),
        }
    }

    /// Short caption used by the slider wallpapers.
    pub const fn label(self) -> &'static str {
        match self {
            DigitSlot::HourTens => "HOUR TENS",
            DigitSlot::HourOnes => "HOUR ONES",
            DigitSlot::MinuteTens => "MIN TENS",
            DigitSlot::MinuteOnes => "MIN ONES",
            DigitSlot::SecondTens => "SEC TENS",
            DigitSlot::SecondOnes => "SEC ONES",
        }
    }
}

/// Per-digit decomposition of a wall-clock reading.
///
/// Digits are signed so that [`TimeDigits::SENTINEL`] can hold the
/// out-of-range `-1` used to seed change detection before the first sample.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimeDigits {
    pub h1: i8,
    pub h2: i8,
    pub m1: i8,
    pub m2: i8,
    pub s1: i8,
    pub s2: i8,
}

impl TimeDigits {
    /// Every digit set to `-1`; never equal to a real reading.
    pub const SENTINEL: TimeDigits = TimeDigits { h1: -1, h2: -1, m1: -1, m2: -1, s1: -1, s2: -1 };

    /// Splits `hour:minute:second` into tens/ones pairs.
    ///
    /// Inputs are expected in `0..24`, `0..60`, `0..60`; larger values are
    /// wrapped so the result always respects the per-slot maxima. A leap
    /// second (`60`) reads as `59`.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        let hour = (hour % 24) as i8;
        let minute = (minute % 60) as i8;
        let second = second.min(59) as i8;
        Self {
            h1: hour / 10,
            h2: hour % 10,
            m1: minute / 10,
            m2: minute % 10,
            s1: second / 10,
            s2: second % 10,
        }
    }

    #[inline]
    pub fn get(&self, slot: DigitSlot) -> i8 {
        self.as_array()[slot.index()]
    }

    #[inline]
    pub fn as_array(&self) -> [i8; 6] {
        [self.h1, self.h2, self.m1, self.m2, self.s1, self.s2]
    }

    /// Returns `true` if this is the pre-first-sample sentinel.
    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl std::fmt::Display for TimeDigits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}:{}{}:{}{}", self.h1, self.h2, self.m1, self.m2, self.s1, self.s2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_late_evening() {
        let d = TimeDigits::from_hms(23, 59, 59);
        assert_eq!(d.as_array(), [2, 3, 5, 9, 5, 9]);
    }

    #[test]
    fn splits_midnight() {
        assert_eq!(TimeDigits::from_hms(0, 0, 0).as_array(), [0; 6]);
    }

    #[test]
    fn leap_second_reads_as_59() {
        assert_eq!(TimeDigits::from_hms(12, 30, 60).get(DigitSlot::SecondOnes), 9);
    }

    #[test]
    fn digits_never_exceed_slot_max() {
        for h in 0..24 {
            for m in (0..60).step_by(7) {
                let d = TimeDigits::from_hms(h, m, m);
                for slot in DigitSlot::ALL {
                    assert!(d.get(slot) >= 0);
                    assert!(d.get(slot) as u8 <= slot.max().get(), "{slot:?} of {d}");
                }
            }
        }
    }

    #[test]
    fn sentinel_is_out_of_range() {
        assert!(TimeDigits::SENTINEL.is_sentinel());
        assert!(!TimeDigits::from_hms(0, 0, 0).is_sentinel());
    }

    #[test]
    fn display_is_hh_mm_ss() {
        assert_eq!(TimeDigits::from_hms(7, 5, 3).to_string(), "07:05:03");
    }
}
