use std::time::{Duration, Instant};

/// Delay between attempts to bring up a GPU surface for a window.
pub(crate) const GPU_RETRY_INTERVAL: Duration = Duration::from_millis(250);

/// What became due for one window.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Due {
    pub wake: bool,
    pub gpu_retry: bool,
}

/// Pending deadlines of one window.
///
/// Every requested wake-up is kept until it passes; requesting a later one
/// never drops an earlier one.
#[derive(Debug, Default)]
pub(crate) struct WindowSchedule {
    wakes: Vec<Instant>,
    gpu_retry: Option<Instant>,
    gpu_failures: u32,
}

impl WindowSchedule {
    pub(crate) fn wake_at(&mut self, deadline: Instant) {
        if !self.wakes.contains(&deadline) {
            self.wakes.push(deadline);
        }
    }

    /// Records a failed GPU bring-up and schedules the next attempt.
    /// Returns the number of consecutive failures.
    pub(crate) fn gpu_failed(&mut self, now: Instant) -> u32 {
        self.gpu_failures += 1;
        self.gpu_retry = Some(now + GPU_RETRY_INTERVAL);
        self.gpu_failures
    }

    pub(crate) fn gpu_ready(&mut self) {
        self.gpu_failures = 0;
        self.gpu_retry = None;
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.wakes.iter().copied().chain(self.gpu_retry).min()
    }

    /// Removes everything due at `now`.
    pub(crate) fn take_due(&mut self, now: Instant) -> Due {
        let before = self.wakes.len();
        self.wakes.retain(|&t| t > now);
        let gpu_retry = self.gpu_retry.is_some_and(|t| t <= now);
        if gpu_retry {
            self.gpu_retry = None;
        }
        Due { wake: self.wakes.len() != before, gpu_retry }
    }
}

/// Earliest deadline across windows.
pub(crate) fn earliest<'a>(schedules: impl IntoIterator<Item = &'a WindowSchedule>) -> Option<Instant> {
    schedules.into_iter().filter_map(WindowSchedule::next_deadline).min()
}
