//! GPU rendering.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily on first use against the current surface format.

mod frame;
mod quad;

pub use frame::RenderFrame;
pub use quad::{DEFAULT_QUAD, QuadRenderer, QuadVertex};
