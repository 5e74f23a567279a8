//! Scene (draw stream) types.
//!
//! Commands are renderer-agnostic and kept in insertion order. Each shape
//! keeps its payload and push helpers in its own file under `scene::shapes`.

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::DrawList;
