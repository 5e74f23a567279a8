use chrono::{DateTime, Local, Offset, TimeZone, Timelike};

use super::digits::TimeDigits;

/// Everything the wallpapers show about "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Full weekday name, e.g. `Friday`.
    pub weekday: String,
    /// Long-form date, e.g. `October 16, 2026`.
    pub date: String,
    pub timezone: String,
    pub utc_offset_minutes: i32,
}

impl ClockReading {
    pub fn from_datetime<Tz>(dt: &DateTime<Tz>, timezone: impl Into<String>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            weekday: dt.format("%A").to_string(),
            date: dt.format("%B %-d, %Y").to_string(),
            timezone: timezone.into(),
            utc_offset_minutes: dt.offset().fix().local_minus_utc() / 60,
        }
    }

    pub fn digits(&self) -> TimeDigits {
        TimeDigits::from_hms(self.hour, self.minute, self.second)
    }

    /// `Friday, October 16, 2026`
    pub fn long_date(&self) -> String {
        format!("{}, {}", self.weekday, self.date)
    }

    /// `UTC+05:30`, `UTC-08:00`
    pub fn offset_label(&self) -> String {
        offset_label(self.utc_offset_minutes)
    }

    /// Two-digit zero-padded `HH:MM:SS`.
    pub fn hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

pub fn offset_label(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Source of wall-clock readings.
pub trait Clock {
    fn now(&mut self) -> ClockReading;
}

/// Host wall clock in the local timezone.
///
/// The timezone caption comes from `TZ` when set; otherwise it is the numeric
/// UTC offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> ClockReading {
        let now = Local::now();
        let timezone = std::env::var("TZ")
            .ok()
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or_else(|| offset_label(now.offset().local_minus_utc() / 60));
        ClockReading::from_datetime(&now, timezone)
    }
}

/// Reads the clock and splits it into digits. Never caches: each call reads
/// fresh time, so sampling on a drifting timer does not drift the display.
#[derive(Debug)]
pub struct TimeSampler<C> {
    clock: C,
}

impl<C: Clock> TimeSampler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn sample(&mut self) -> TimeDigits {
        self.clock.now().digits()
    }

    pub fn reading(&mut self) -> ClockReading {
        self.clock.now()
    }
}

impl Default for TimeSampler<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(offset_secs: i32, h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, h, m, s)
            .single()
            .unwrap()
    }

    #[test]
    fn reading_from_datetime() {
        let r = ClockReading::from_datetime(&at(2 * 3600, 9, 4, 7), "Europe/Berlin");
        assert_eq!((r.hour, r.minute, r.second), (9, 4, 7));
        assert_eq!(r.weekday, "Friday");
        assert_eq!(r.date, "October 16, 2026");
        assert_eq!(r.long_date(), "Friday, October 16, 2026");
        assert_eq!(r.utc_offset_minutes, 120);
        assert_eq!(r.timezone, "Europe/Berlin");
        assert_eq!(r.hms(), "09:04:07");
    }

    #[test]
    fn offset_labels() {
        assert_eq!(offset_label(0), "UTC+00:00");
        assert_eq!(offset_label(330), "UTC+05:30");
        assert_eq!(offset_label(-480), "UTC-08:00");
    }

    struct Fixed(ClockReading);

    impl Clock for Fixed {
        fn now(&mut self) -> ClockReading {
            self.0.clone()
        }
    }

    #[test]
    fn sampler_decomposes_reading() {
        let reading = ClockReading::from_datetime(&at(0, 23, 59, 59), "UTC");
        let mut sampler = TimeSampler::new(Fixed(reading));
        assert_eq!(sampler.sample().as_array(), [2, 3, 5, 9, 5, 9]);
    }

    #[test]
    fn system_clock_reads_in_range() {
        let r = SystemClock.now();
        assert!(r.hour < 24 && r.minute < 60 && r.second <= 60);
        assert!(!r.timezone.is_empty());
    }
}
