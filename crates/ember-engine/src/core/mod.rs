//! Contract between the runtime loop and application code.
//!
//! The runtime owns the window, dispatcher and input cache; the app sees a
//! per-frame context with read-only input and a way to draw.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
