//! digitfall core.
//!
//! Owns everything with state and invariants: the wall-clock digit feed, the
//! scrolling column simulation and its highlight model, and the frame/timer
//! scheduling handles. Drawing is reached only through [`surface::DrawSurface`];
//! the host event loop only through [`schedule::Host`].

pub mod clock;
pub mod error;
pub mod rain;
pub mod schedule;
pub mod slider;
pub mod surface;

pub use error::ConfigError;
