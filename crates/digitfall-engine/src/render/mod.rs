//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw lists and record wgpu render passes.
//! Each renderer owns its GPU resources (pipelines, buffers) and builds them
//! lazily on first use or when the target format changes.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod canvas;
mod ctx;
mod layer;
pub mod shapes;

pub use canvas::RetainedCanvas;
pub use ctx::{RenderCtx, RenderTarget};
pub use layer::LayerRenderer;
