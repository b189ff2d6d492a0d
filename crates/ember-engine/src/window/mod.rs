//! Window + runtime loop.
//!
//! `runtime` owns the winit EventLoop and the window; `shim` turns winit
//! window events into engine [`Event`](crate::event::Event)s.

mod runtime;
mod shim;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use shim::{map_key, map_mouse_button, EventCallback, WindowShim};
