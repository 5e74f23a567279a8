use std::collections::VecDeque;
use std::time::{Duration, Instant};

use digitfall_core::clock::{Clock, ClockFeed, ClockReading, DigitSlot};
use digitfall_core::rain::{Column, ColumnSimulator, RainConfig, Span};
use digitfall_core::schedule::Host;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn column_resets_once_after_crossing_the_bottom_margin() {
    let mut config = RainConfig::rain();
    config.reset_margin = 150.0;
    config.velocity = Span::new(1.0, 1.5);

    let column = Column::new(40.0, -50.0, 2.0, vec![1, 2, 3, 4, 5], 2);
    let mut sim = ColumnSimulator::with_columns(config.clone(), 80.0, 800.0, vec![column]).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let mut reset_frames = Vec::new();
    for frame in 1..=1000 {
        let before = sim.columns()[0].position();
        if sim.step(1.0, &mut rng) > 0 {
            reset_frames.push(frame);
            let after = &sim.columns()[0];
            assert!(after.position() < 0.0);
            assert!(config.velocity.contains(after.velocity()));
            assert_eq!(after.lane(), 40.0);
        } else {
            assert!(sim.columns()[0].position() > before);
        }
    }

    // -50 + 2n > 800 + 150  =>  n = 501
    assert_eq!(reset_frames, vec![501]);
}

struct Script(VecDeque<(u32, u32, u32)>);

impl Clock for Script {
    fn now(&mut self) -> ClockReading {
        let (hour, minute, second) = self.0.pop_front().unwrap_or((0, 0, 0));
        ClockReading {
            hour,
            minute,
            second,
            weekday: "Saturday".into(),
            date: "October 17, 2026".into(),
            timezone: "UTC".into(),
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Default)]
struct NullHost;

impl Host for NullHost {
    fn request_frame(&mut self) {}
    fn wake_at(&mut self, _: Instant) {}
}

#[test]
fn midnight_rollover_changes_every_digit() {
    let mut host = NullHost;
    let t0 = Instant::now();
    let mut feed = ClockFeed::new(Script(VecDeque::from([(23, 59, 59), (0, 0, 0)])));

    let first = feed.mount(t0, &mut host).clone();
    assert_eq!(first.digits.as_array(), [2, 3, 5, 9, 5, 9]);

    let second = feed.poll(t0 + Duration::from_secs(1), &mut host).unwrap();
    assert_eq!(second.digits.as_array(), [0, 0, 0, 0, 0, 0]);
    assert!(second.changes.all());
    assert!(DigitSlot::ALL.iter().all(|&slot| second.changes.get(slot)));
}
