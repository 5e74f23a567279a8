use std::time::{Duration, Instant};

use digitfall_core::clock::ChangeFlags;

/// Per-digit "just changed" glow that fades out over `duration`.
///
/// Levels are computed from wall time rather than accumulated per frame, so
/// the first frame after a one-second idle starts the glow at full strength.
#[derive(Debug, Clone)]
pub struct Pulses {
    started: [Option<Instant>; 6],
    duration: Duration,
}

impl Pulses {
    pub fn new(duration: Duration) -> Self {
        Self { started: [None; 6], duration }
    }

    /// Restarts the glow of every digit flagged as changed.
    pub fn trigger(&mut self, changes: &ChangeFlags, now: Instant) {
        for (started, changed) in self.started.iter_mut().zip(changes.as_array()) {
            if changed {
                *started = Some(now);
            }
        }
    }

    /// `1.0` right after a trigger, falling linearly to `0.0`.
    pub fn level(&self, index: usize, now: Instant) -> f32 {
        let Some(Some(t0)) = self.started.get(index) else { return 0.0 };
        if self.duration.is_zero() {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(*t0).as_secs_f32();
        (1.0 - elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_active(&self, now: Instant) -> bool {
        (0..self.started.len()).any(|i| self.level(i, now) > 0.0)
    }
}
