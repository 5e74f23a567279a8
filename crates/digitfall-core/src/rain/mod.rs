//! Scrolling digit columns.

pub mod column;
pub mod config;
pub mod field;
pub mod highlight;
pub mod simulator;

pub use column::Column;
pub use config::{FixedLane, LaneLayout, RainConfig, ResetPolicy, SpawnDepth, Span};
pub use field::RainField;
pub use highlight::{Falloff, HighlightModel};
pub use simulator::{ColumnSimulator, GlyphPlacement};
