//! Keyboard/mouse bindings, as pure functions over the input cache.

use ember_engine::coords::Vec3;
use ember_engine::input::{InputState, KeyCode};
use ember_engine::paint::Color;
use ember_engine::render::QuadVertex;

pub const HELP: &str = "WASD move, Q/E down/up, arrows look, right-drag look, \
R/F spin quad, Z/X scale quad, IJKL/U/O move quad, C cycle background, \
V rotate quad colors, P toggle projection, Esc quit";

/// Background colors cycled with C; the first is the startup default.
pub const BACKGROUNDS: [Color; 4] = [
    Color::rgb(0.33, 0.33, 0.33),
    Color::rgb(0.05, 0.05, 0.08),
    Color::rgb(0.85, 0.85, 0.82),
    Color::rgb(0.10, 0.18, 0.30),
];

/// Rates for continuous controls.
#[derive(Debug, Clone)]
pub struct Speeds {
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second for arrow-key look.
    pub look_speed: f32,
    /// Degrees per pixel of right-button drag.
    pub drag_sensitivity: f32,
    /// Degrees per second of quad rotation.
    pub spin_speed: f32,
    /// Scale factor change per second.
    pub scale_speed: f32,
    /// World units per second of quad translation.
    pub translate_speed: f32,
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            move_speed: 1.5,
            look_speed: 60.0,
            drag_sensitivity: 0.2,
            spin_speed: 90.0,
            scale_speed: 0.75,
            translate_speed: 1.0,
        }
    }
}

/// `-1`, `0` or `1` depending on which of the two keys is held.
pub fn axis(input: &InputState, negative: KeyCode, positive: KeyCode) -> f32 {
    let mut v = 0.0;
    if input.is_key_pressed(negative) {
        v -= 1.0;
    }
    if input.is_key_pressed(positive) {
        v += 1.0;
    }
    v
}

/// Camera movement (camera-local: x right, y up, z forward) and rotation
/// (degrees around x, y, z) for this frame.
pub fn camera_motion(input: &InputState, dt: f32, speeds: &Speeds) -> (Vec3, Vec3) {
    let movement = Vec3::new(
        axis(input, KeyCode::A, KeyCode::D),
        axis(input, KeyCode::Q, KeyCode::E),
        axis(input, KeyCode::S, KeyCode::W),
    )
    .normalized_or_zero()
        * (speeds.move_speed * dt);

    let rotation = Vec3::new(
        axis(input, KeyCode::ArrowDown, KeyCode::ArrowUp),
        axis(input, KeyCode::ArrowRight, KeyCode::ArrowLeft),
        0.0,
    ) * (speeds.look_speed * dt);

    (movement, rotation)
}

/// Look rotation for a cursor movement of `delta` physical pixels.
///
/// Dragging right turns right; dragging down looks down.
pub fn drag_look(delta: (f64, f64), sensitivity: f32) -> Vec3 {
    let (dx, dy) = (delta.0 as f32, delta.1 as f32);
    Vec3::new(-dy * sensitivity, -dx * sensitivity, 0.0)
}

/// Follows the cursor while a drag button is held.
#[derive(Debug, Default)]
pub struct DragTracker {
    last: Option<(f64, f64)>,
}

impl DragTracker {
    /// Returns the cursor movement since the previous held frame.
    ///
    /// The first held frame only records the position, so pressing does not
    /// jump. Releasing forgets it.
    pub fn update(&mut self, held: bool, cursor: Option<(f64, f64)>) -> Option<(f64, f64)> {
        if !held {
            self.last = None;
            return None;
        }
        let cur = cursor?;
        let delta = self.last.map(|prev| (cur.0 - prev.0, cur.1 - prev.1));
        self.last = Some(cur);
        delta
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}

/// Quad rotation delta (degrees) and scale multiplier for this frame.
pub fn quad_adjust(input: &InputState, dt: f32, speeds: &Speeds) -> (f32, f32) {
    let spin = axis(input, KeyCode::F, KeyCode::R) * speeds.spin_speed * dt;
    let scale = 1.0 + axis(input, KeyCode::Z, KeyCode::X) * speeds.scale_speed * dt;
    (spin, scale.max(0.0))
}

/// Quad translation for this frame: J/L along x, K/I along y, U/O along z.
pub fn quad_translation(input: &InputState, dt: f32, speeds: &Speeds) -> Vec3 {
    Vec3::new(
        axis(input, KeyCode::J, KeyCode::L),
        axis(input, KeyCode::K, KeyCode::I),
        axis(input, KeyCode::U, KeyCode::O),
    ) * (speeds.translate_speed * dt)
}

/// Index after `index` in a list of `len` entries, wrapping to the start.
pub fn cycle(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

/// Shifts every corner's color to the next corner, keeping positions.
pub fn rotate_corner_colors(vertices: &[QuadVertex; 4]) -> [QuadVertex; 4] {
    let mut out = *vertices;
    for (i, v) in out.iter_mut().enumerate() {
        v.color = vertices[(i + 3) % 4].color;
    }
    out
}

/// Detects the frame a held key first shows up as pressed.
///
/// The input cache only stores levels; edges are derived here by comparing
/// against the previous frame.
#[derive(Debug, Default)]
pub struct RisingEdge {
    was_down: bool,
}

impl RisingEdge {
    pub fn update(&mut self, down: bool) -> bool {
        let fired = down && !self.was_down;
        self.was_down = down;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for k in keys {
            input.press_key(*k);
        }
        input
    }

    #[test]
    fn no_keys_no_motion() {
        let (m, r) = camera_motion(&InputState::new(), 0.016, &Speeds::default());
        assert_eq!(m, Vec3::zero());
        assert_eq!(r, Vec3::zero());
    }

    #[test]
    fn w_moves_forward() {
        let speeds = Speeds::default();
        let (m, _) = camera_motion(&held(&[KeyCode::W]), 1.0, &speeds);
        assert_eq!(m, Vec3::new(0.0, 0.0, speeds.move_speed));
    }

    #[test]
    fn opposite_keys_cancel() {
        let (m, _) = camera_motion(&held(&[KeyCode::W, KeyCode::S]), 1.0, &Speeds::default());
        assert_eq!(m, Vec3::zero());
    }

    #[test]
    fn diagonal_is_not_faster() {
        let speeds = Speeds::default();
        let (m, _) = camera_motion(&held(&[KeyCode::W, KeyCode::D]), 1.0, &speeds);
        assert!((m.length() - speeds.move_speed).abs() < 1e-5);
    }

    #[test]
    fn arrows_rotate() {
        let speeds = Speeds::default();
        let (_, r) = camera_motion(&held(&[KeyCode::ArrowLeft]), 0.5, &speeds);
        assert_eq!(r, Vec3::new(0.0, speeds.look_speed * 0.5, 0.0));
    }

    #[test]
    fn released_key_stops_motion() {
        let mut input = held(&[KeyCode::W]);
        input.release_key(KeyCode::W);
        let (m, _) = camera_motion(&input, 1.0, &Speeds::default());
        assert_eq!(m, Vec3::zero());
    }

    #[test]
    fn drag_right_turns_right() {
        let r = drag_look((10.0, 0.0), 0.5);
        assert_eq!(r, Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn drag_tracker_press_move_release_press() {
        let mut drag = DragTracker::default();

        // Press: position recorded, no movement yet.
        assert_eq!(drag.update(true, Some((100.0, 100.0))), None);
        assert!(drag.is_dragging());

        // Move while held.
        assert_eq!(drag.update(true, Some((110.0, 95.0))), Some((10.0, -5.0)));
        assert_eq!(drag.update(true, Some((110.0, 95.0))), Some((0.0, 0.0)));

        // Release forgets the anchor.
        assert_eq!(drag.update(false, Some((300.0, 300.0))), None);
        assert!(!drag.is_dragging());

        // Pressing again far away does not jump.
        assert_eq!(drag.update(true, Some((300.0, 300.0))), None);
        assert_eq!(drag.update(true, Some((301.0, 300.0))), Some((1.0, 0.0)));
    }

    #[test]
    fn drag_tracker_waits_for_cursor() {
        let mut drag = DragTracker::default();
        assert_eq!(drag.update(true, None), None);
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(true, Some((1.0, 1.0))), None);
    }

    #[test]
    fn ijkl_moves_quad() {
        let speeds = Speeds::default();
        let t = quad_translation(&held(&[KeyCode::L, KeyCode::I]), 0.5, &speeds);
        assert_eq!(t, Vec3::new(0.5 * speeds.translate_speed, 0.5 * speeds.translate_speed, 0.0));

        let t = quad_translation(&held(&[KeyCode::U]), 1.0, &speeds);
        assert_eq!(t, Vec3::new(0.0, 0.0, -speeds.translate_speed));

        assert_eq!(quad_translation(&InputState::new(), 1.0, &speeds), Vec3::zero());
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(cycle(0, BACKGROUNDS.len()), 1);
        assert_eq!(cycle(BACKGROUNDS.len() - 1, BACKGROUNDS.len()), 0);
        assert_eq!(cycle(3, 0), 0);
    }

    #[test]
    fn corner_colors_rotate_and_return() {
        let start = ember_engine::render::DEFAULT_QUAD;
        let once = rotate_corner_colors(&start);

        assert_eq!(once[1].color, start[0].color);
        assert_eq!(once[0].color, start[3].color);
        assert!(once.iter().zip(start.iter()).all(|(a, b)| a.position == b.position));

        let mut v = start;
        for _ in 0..4 {
            v = rotate_corner_colors(&v);
        }
        assert_eq!(v, start);
    }

    #[test]
    fn default_background_is_startup_grey() {
        assert_eq!(BACKGROUNDS[0], ember_engine::window::RuntimeConfig::default().clear_color);
    }

    #[test]
    fn quad_adjust_spins_and_scales() {
        let speeds = Speeds::default();
        let (spin, scale) = quad_adjust(&held(&[KeyCode::R, KeyCode::X]), 1.0, &speeds);
        assert_eq!(spin, speeds.spin_speed);
        assert_eq!(scale, 1.0 + speeds.scale_speed);

        let (spin, scale) = quad_adjust(&InputState::new(), 1.0, &speeds);
        assert_eq!((spin, scale), (0.0, 1.0));
    }

    #[test]
    fn rising_edge_fires_once_per_press() {
        let mut edge = RisingEdge::default();
        assert!(edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(false));
        assert!(edge.update(true));
    }
}
