use std::time::Instant;

use log::{debug, info};

use super::change::{ChangeFlags, ChangeTracker};
use super::digits::TimeDigits;
use super::sampler::{Clock, ClockReading, TimeSampler};
use crate::schedule::{Host, SecondTicker};

/// One second's worth of clock state.
#[derive(Debug, Clone)]
pub struct Tick {
    pub digits: TimeDigits,
    pub changes: ChangeFlags,
    pub reading: ClockReading,
}

/// Sampler, change tracker and one-second timer, owned by a single view.
///
/// `mount` samples immediately so the first paint already has digits (all
/// flagged as changed); afterwards `poll` produces a new [`Tick`] each time
/// the second timer fires.
#[derive(Debug)]
pub struct ClockFeed<C> {
    sampler: TimeSampler<C>,
    tracker: ChangeTracker,
    ticker: SecondTicker,
    latest: Option<Tick>,
}

impl<C: Clock> ClockFeed<C> {
    pub fn new(clock: C) -> Self {
        Self {
            sampler: TimeSampler::new(clock),
            tracker: ChangeTracker::new(),
            ticker: SecondTicker::new(),
            latest: None,
        }
    }

    pub fn mount(&mut self, now: Instant, host: &mut impl Host) -> &Tick {
        info!("clock feed mounted");
        self.tracker.reset();
        self.ticker.start(now, host);
        self.sample()
    }

    pub fn poll(&mut self, now: Instant, host: &mut impl Host) -> Option<&Tick> {
        if !self.ticker.poll(now, host) {
            return None;
        }
        Some(self.sample())
    }

    pub fn unmount(&mut self) {
        if self.ticker.is_running() {
            info!("clock feed unmounted");
        }
        self.ticker.stop();
    }

    #[inline]
    pub fn latest(&self) -> Option<&Tick> {
        self.latest.as_ref()
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.ticker.is_running()
    }

    fn sample(&mut self) -> &Tick {
        let reading = self.sampler.reading();
        let digits = reading.digits();
        let changes = self.tracker.observe(digits);
        debug!("tick {digits} ({} changed)", changes.count());
        self.latest.insert(Tick { digits, changes, reading })
    }
}

impl<C> Drop for ClockFeed<C> {
    fn drop(&mut self) {
        self.ticker.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use super::*;

    struct Script(VecDeque<(u32, u32, u32)>);

    impl Clock for Script {
        fn now(&mut self) -> ClockReading {
            let (hour, minute, second) = self.0.pop_front().unwrap_or((0, 0, 0));
            ClockReading {
                hour,
                minute,
                second,
                weekday: "Friday".into(),
                date: "October 16, 2026".into(),
                timezone: "UTC".into(),
                utc_offset_minutes: 0,
            }
        }
    }

    #[derive(Default)]
    struct Wakes(Vec<Instant>);

    impl Host for Wakes {
        fn request_frame(&mut self) {}
        fn wake_at(&mut self, deadline: Instant) {
            self.0.push(deadline);
        }
    }

    #[test]
    fn mount_samples_with_everything_changed() {
        let mut host = Wakes::default();
        let mut feed = ClockFeed::new(Script(VecDeque::from([(12, 0, 0)])));
        let tick = feed.mount(Instant::now(), &mut host);
        assert!(tick.changes.all());
        assert_eq!(host.0.len(), 1);
        assert!(feed.is_mounted());
    }

    #[test]
    fn poll_only_ticks_on_deadline() {
        let mut host = Wakes::default();
        let t0 = Instant::now();
        let mut feed = ClockFeed::new(Script(VecDeque::from([(12, 0, 0), (12, 0, 1)])));
        feed.mount(t0, &mut host);
        assert!(feed.poll(t0 + Duration::from_millis(400), &mut host).is_none());

        let tick = feed.poll(t0 + Duration::from_secs(1), &mut host).unwrap();
        assert_eq!(tick.changes.count(), 1);
        assert_eq!(tick.digits.s2, 1);
    }

    #[test]
    fn unmounted_feed_stays_silent() {
        let mut host = Wakes::default();
        let t0 = Instant::now();
        let mut feed = ClockFeed::new(Script(VecDeque::new()));
        feed.mount(t0, &mut host);
        feed.unmount();
        feed.unmount();
        assert!(feed.poll(t0 + Duration::from_secs(3), &mut host).is_none());
        assert!(!feed.is_mounted());
    }
}
