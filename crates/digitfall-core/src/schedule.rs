//! Frame and one-second scheduling handles.
//!
//! Both loops are cooperative: they never own a thread. The host calls back
//! into them and they ask the host for the next frame or the next wake-up.
//! Stopping a loop simply stops re-arming it.

use std::time::{Duration, Instant};

/// The host event loop, as seen from a view.
pub trait Host {
    /// Ask for one more animation frame.
    fn request_frame(&mut self);

    /// Ask to be woken no later than `deadline`.
    fn wake_at(&mut self, deadline: Instant);
}

/// Per-frame animation loop handle.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, host: &mut impl Host) {
        if self.running {
            return;
        }
        self.running = true;
        host.request_frame();
    }

    /// Idempotent; safe to call on a loop that never started.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames delivered since construction.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Call once per presented frame. Returns whether the view should step;
    /// re-arms the next frame while running.
    pub fn on_frame(&mut self, host: &mut impl Host) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;
        host.request_frame();
        true
    }
}

/// Shortest period a [`SecondTicker`] runs at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Fires once per period. Deadlines advance by whole periods from the first
/// one, so a late poll does not push later ticks back.
#[derive(Debug)]
pub struct SecondTicker {
    period: Duration,
    next: Option<Instant>,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    /// Periods shorter than [`MIN_PERIOD`] are raised to it.
    pub fn with_period(period: Duration) -> Self {
        Self { period: period.max(MIN_PERIOD), next: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant, host: &mut impl Host) {
        if self.next.is_some() {
            return;
        }
        let next = now + self.period;
        self.next = Some(next);
        host.wake_at(next);
    }

    /// Idempotent; safe to call on a ticker that never started.
    pub fn stop(&mut self) {
        self.next = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Returns `true` if a deadline passed since the last fire. Missed
    /// periods collapse into a single fire.
    pub fn poll(&mut self, now: Instant, host: &mut impl Host) -> bool {
        let Some(mut next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }
        while next <= now {
            next += self.period;
        }
        self.next = Some(next);
        host.wake_at(next);
        true
    }
}

impl Default for SecondTicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        wakes: Vec<Instant>,
    }

    impl Host for Recorder {
        fn request_frame(&mut self) {
            self.frames += 1;
        }
        fn wake_at(&mut self, deadline: Instant) {
            self.wakes.push(deadline);
        }
    }

    #[test]
    fn frame_loop_requests_while_running() {
        let mut host = Recorder::default();
        let mut fl = FrameLoop::new();
        assert!(!fl.on_frame(&mut host));
        assert_eq!(host.frames, 0);

        fl.start(&mut host);
        fl.start(&mut host);
        assert_eq!(host.frames, 1);

        assert!(fl.on_frame(&mut host));
        assert!(fl.on_frame(&mut host));
        assert_eq!(host.frames, 3);
        assert_eq!(fl.frames(), 2);

        fl.stop();
        assert!(!fl.on_frame(&mut host));
        assert_eq!(host.frames, 3);
    }

    #[test]
    fn stop_is_idempotent_and_safe_unstarted() {
        let mut fl = FrameLoop::new();
        fl.stop();
        fl.stop();
        assert!(!fl.is_running());

        let mut t = SecondTicker::new();
        t.stop();
        t.stop();
        assert!(!t.is_running());
    }

    #[test]
    fn ticker_fires_once_per_period() {
        let mut host = Recorder::default();
        let t0 = Instant::now();
        let mut t = SecondTicker::new();
        t.start(t0, &mut host);
        assert_eq!(host.wakes, vec![t0 + Duration::from_secs(1)]);

        assert!(!t.poll(t0 + Duration::from_millis(999), &mut host));
        assert!(t.poll(t0 + Duration::from_millis(1000), &mut host));
        assert!(!t.poll(t0 + Duration::from_millis(1500), &mut host));
        assert_eq!(t.next_deadline(), Some(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn ticker_collapses_missed_periods() {
        let mut host = Recorder::default();
        let t0 = Instant::now();
        let mut t = SecondTicker::new();
        t.start(t0, &mut host);
        assert!(t.poll(t0 + Duration::from_millis(3500), &mut host));
        assert_eq!(t.next_deadline(), Some(t0 + Duration::from_secs(4)));
    }

    #[test]
    fn zero_period_is_raised_to_minimum() {
        let mut host = Recorder::default();
        let t0 = Instant::now();
        let mut t = SecondTicker::with_period(Duration::ZERO);
        assert_eq!(t.period(), MIN_PERIOD);
        t.start(t0, &mut host);
        assert!(t.poll(t0 + Duration::from_millis(5), &mut host));
        assert_eq!(t.next_deadline(), Some(t0 + Duration::from_millis(6)));
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let mut host = Recorder::default();
        let t0 = Instant::now();
        let mut t = SecondTicker::new();
        t.start(t0, &mut host);
        t.stop();
        assert!(!t.poll(t0 + Duration::from_secs(5), &mut host));
    }
}
