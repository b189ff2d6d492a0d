use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputState;
use crate::paint::Color;
use crate::render::RenderFrame;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-frame context passed to [`App::on_update`](super::App::on_update).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window borrow carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    /// Key/button state after this frame's events.
    pub input: &'a InputState,
    pub time: FrameTime,

    /// Color the next `render` clears to. Starts at the configured value and
    /// keeps whatever the app sets across frames.
    pub clear_color: Color,

    pub runtime: &'a mut RuntimeCtx,

    pub(crate) window: &'a Window,
    pub(crate) gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Drawable size in physical pixels.
    pub fn viewport(&self) -> Viewport {
        self.gpu.viewport()
    }

    /// Clears to `clear_color`, calls `draw`, then presents.
    ///
    /// Skipped while the window is minimized.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut RenderFrame<'_>),
    {
        let viewport = self.gpu.viewport();
        if !viewport.is_drawable() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // RenderFrame borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderFrame::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
                viewport,
                &mut frame.encoder,
                &frame.view,
            );
            target.clear(self.clear_color);
            draw(&mut target);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
