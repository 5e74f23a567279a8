//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! decides when frames happen.

mod runtime;
mod schedule;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
