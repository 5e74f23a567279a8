//! Instanced shape renderers, one per `DrawCmd` variant.

mod common;

pub mod circle;
pub mod rect;
pub mod text;
