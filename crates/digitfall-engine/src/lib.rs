//! digitfall engine crate.
//!
//! Platform + GPU runtime for the wallpapers: window and event loop, device
//! and surface, a retained draw canvas, instanced shape renderers and text.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
