//! Color model shared by the scene and the renderers.

pub mod color;

pub use color::Color;
