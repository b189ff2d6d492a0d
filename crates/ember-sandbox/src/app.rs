use ember_engine::coords::{Camera, ProjectionMode, Transform, Viewport};
use ember_engine::core::{App, AppControl, FrameCtx};
use ember_engine::input::{InputState, KeyCode, MouseButtonCode};
use ember_engine::paint::Color;
use ember_engine::render::QuadRenderer;

use crate::controls::{self, DragTracker, RisingEdge, Speeds, BACKGROUNDS};

/// Frames between camera state dumps at debug level.
const STATE_LOG_INTERVAL: u64 = 120;

/// Draws the colored quad and lets the user fly a camera around it.
pub struct SandboxApp {
    camera: Camera,
    transform: Transform,
    quad: QuadRenderer,
    speeds: Speeds,
    background: usize,

    projection_toggle: RisingEdge,
    background_toggle: RisingEdge,
    colors_toggle: RisingEdge,
    drag: DragTracker,
}

impl SandboxApp {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            transform: Transform::default(),
            quad: QuadRenderer::default(),
            speeds: Speeds::default(),
            background: 0,
            projection_toggle: RisingEdge::default(),
            background_toggle: RisingEdge::default(),
            colors_toggle: RisingEdge::default(),
            drag: DragTracker::default(),
        }
    }

    fn toggle_projection(&mut self) -> ProjectionMode {
        self.camera.projection = match self.camera.projection {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
        self.camera.projection
    }

    fn next_background(&mut self) -> Color {
        self.background = controls::cycle(self.background, BACKGROUNDS.len());
        BACKGROUNDS[self.background]
    }

    fn rotate_quad_colors(&mut self) {
        let rotated = controls::rotate_corner_colors(self.quad.vertices());
        self.quad.set_vertices(rotated);
    }

    /// Continuous controls: camera fly/look and the quad transform.
    fn apply_motion(&mut self, input: &InputState, dt: f32) {
        let (movement, rotation) = controls::camera_motion(input, dt, &self.speeds);
        self.camera.move_local(movement);
        self.camera.rotate(rotation);

        let held = input.is_mouse_button_pressed(MouseButtonCode::Right);
        if let Some(delta) = self.drag.update(held, input.cursor_position()) {
            self.camera
                .rotate(controls::drag_look(delta, self.speeds.drag_sensitivity));
        }

        let (spin, scale) = controls::quad_adjust(input, dt, &self.speeds);
        self.transform.rotate_deg = (self.transform.rotate_deg + spin) % 360.0;
        self.transform.scale = self.transform.scale.map(|s| s * scale);
        self.transform.translate += controls::quad_translation(input, dt, &self.speeds);
    }

    /// One-shot toggles, fired on the frame a key goes down.
    fn apply_toggles(&mut self, ctx: &mut FrameCtx<'_, '_>) {
        let input = ctx.input;

        if self.projection_toggle.update(input.is_key_pressed(KeyCode::P)) {
            let mode = self.toggle_projection();
            log::info!("projection: {mode:?}");
            ctx.runtime.set_title(format!("ember sandbox ({mode:?})"));
        }

        if self.background_toggle.update(input.is_key_pressed(KeyCode::C)) {
            ctx.clear_color = self.next_background();
            log::info!("background: {:?}", ctx.clear_color);
        }

        if self.colors_toggle.update(input.is_key_pressed(KeyCode::V)) {
            self.rotate_quad_colors();
            log::debug!("quad colors rotated");
        }
    }
}

impl Default for SandboxApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for SandboxApp {
    fn on_start(&mut self, viewport: Viewport) {
        log::info!("sandbox started, viewport {}x{}", viewport.width, viewport.height);
    }

    fn on_update(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.is_key_pressed(KeyCode::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.apply_motion(ctx.input, ctx.time.dt);
        self.apply_toggles(ctx);

        if ctx.time.frame_index % STATE_LOG_INTERVAL == 0 {
            log::debug!(
                "camera pos={:?} rot={:?} quad={:?}",
                self.camera.position,
                self.camera.rotation,
                self.transform
            );
        }

        let model = self.transform.model_matrix();
        let view_projection = self.camera.view_projection(ctx.viewport().aspect());
        let quad = &mut self.quad;
        ctx.render(|frame| quad.render(frame, model, view_projection))
    }

    fn on_exit(&mut self) {
        log::info!("sandbox exiting after camera at {:?}", self.camera.position);
    }
}
