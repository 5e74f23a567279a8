//! Wall-clock sampling and per-digit change detection.

pub mod change;
pub mod digits;
pub mod feed;
pub mod sampler;

pub use change::{detect, ChangeFlags, ChangeTracker};
pub use digits::{DigitSlot, TimeDigits};
pub use feed::{ClockFeed, Tick};
pub use sampler::{Clock, ClockReading, SystemClock, TimeSampler};
