use crate::coords::Viewport;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// Events never reach the app directly: they go through the runtime's
/// dispatcher, and the app reads their effect from `FrameCtx::input`.
pub trait App {
    /// Called once, after the window and GPU context exist.
    fn on_start(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called once per frame, after all pending events were dispatched.
    fn on_update(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop is about to stop.
    fn on_exit(&mut self) {}
}
