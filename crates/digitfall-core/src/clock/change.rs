use super::digits::{DigitSlot, TimeDigits};

/// Per-digit "changed this tick" flags, in [`DigitSlot::ALL`] order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ChangeFlags([bool; 6]);

impl ChangeFlags {
    #[inline]
    pub fn get(&self, slot: DigitSlot) -> bool {
        self.0[slot.index()]
    }

    #[inline]
    pub fn as_array(&self) -> [bool; 6] {
        self.0
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&c| c).count()
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&c| c)
    }

    pub fn all(&self) -> bool {
        self.0.iter().all(|&c| c)
    }
}

/// Flags every digit of `current` that differs from `previous`.
pub fn detect(previous: &TimeDigits, current: &TimeDigits) -> ChangeFlags {
    let p = previous.as_array();
    let c = current.as_array();
    ChangeFlags(std::array::from_fn(|i| p[i] != c[i]))
}

/// Remembers the last observed digits so each tick can be compared with the one before.
///
/// Seeded with [`TimeDigits::SENTINEL`], so the first observation reports
/// every digit as changed and the initial render pulses all of them.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    previous: TimeDigits,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self { previous: TimeDigits::SENTINEL }
    }

    /// Compares `current` with the previous observation, then keeps `current`.
    pub fn observe(&mut self, current: TimeDigits) -> ChangeFlags {
        let flags = detect(&self.previous, &current);
        self.previous = current;
        flags
    }

    /// Forgets the previous observation.
    pub fn reset(&mut self) {
        self.previous = TimeDigits::SENTINEL;
    }
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(a: [i8; 6]) -> TimeDigits {
        TimeDigits { h1: a[0], h2: a[1], m1: a[2], m2: a[3], s1: a[4], s2: a[5] }
    }

    #[test]
    fn sentinel_reports_everything_changed() {
        let flags = detect(&TimeDigits::SENTINEL, &digits([1, 2, 3, 4, 5, 6]));
        assert!(flags.all());
        assert_eq!(flags.count(), 6);
    }

    #[test]
    fn identical_digits_report_nothing() {
        let d = digits([1, 2, 3, 4, 5, 6]);
        let flags = detect(&d, &d);
        assert!(!flags.any());
    }

    #[test]
    fn one_differing_field_sets_one_flag() {
        let prev = digits([1, 2, 3, 4, 5, 6]);
        let cur = digits([1, 2, 3, 4, 5, 7]);
        let flags = detect(&prev, &cur);
        assert_eq!(flags.count(), 1);
        assert!(flags.get(DigitSlot::SecondOnes));
        assert!(!flags.get(DigitSlot::SecondTens));
    }

    #[test]
    fn tracker_first_observation_is_all_changed() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe(digits([0, 9, 1, 5, 3, 0])).all());
        assert!(!tracker.observe(digits([0, 9, 1, 5, 3, 0])).any());
        assert_eq!(tracker.observe(digits([0, 9, 1, 5, 3, 1])).count(), 1);
    }

    #[test]
    fn tracker_reset_reseeds_sentinel() {
        let mut tracker = ChangeTracker::new();
        let d = digits([1, 1, 1, 1, 1, 1]);
        tracker.observe(d);
        tracker.reset();
        assert!(tracker.observe(d).all());
    }
}
