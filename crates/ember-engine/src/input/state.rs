use std::cell::RefCell;
use std::rc::Rc;

use super::codes::{KeyCode, MouseButtonCode};

/// Current pressed/released state of every key and mouse button.
///
/// Each slot holds the most recent press/release seen for its code; there is
/// no history. Mutators are meant to be called from the dispatcher subscribers
/// installed by [`subscribe_input`](super::subscribe_input); application code
/// only queries.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: [bool; KeyCode::COUNT],
    mouse_buttons: [bool; MouseButtonCode::COUNT],

    /// Last cursor position in physical pixels, if the cursor has been seen.
    cursor: Option<(f64, f64)>,
}

/// Input cache shared between the event subscribers and the frame context.
pub type SharedInput = Rc<RefCell<InputState>>;

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: [false; KeyCode::COUNT],
            mouse_buttons: [false; MouseButtonCode::COUNT],
            cursor: None,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an all-released cache wrapped for sharing.
    pub fn shared() -> SharedInput {
        Rc::new(RefCell::new(Self::default()))
    }

    #[inline]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys[key.index()]
    }

    #[inline]
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys[key.index()] = true;
    }

    #[inline]
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys[key.index()] = false;
    }

    #[inline]
    pub fn is_mouse_button_pressed(&self, button: MouseButtonCode) -> bool {
        self.mouse_buttons[button.index()]
    }

    #[inline]
    pub fn press_mouse_button(&mut self, button: MouseButtonCode) {
        self.mouse_buttons[button.index()] = true;
    }

    #[inline]
    pub fn release_mouse_button(&mut self, button: MouseButtonCode) {
        self.mouse_buttons[button.index()] = false;
    }

    pub fn cursor_position(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    pub fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    /// Releases every key and button at once, without going through events.
    ///
    /// The runtime does not use this on focus loss; it synthesizes release
    /// events instead (see `WindowShim::release_held`).
    pub fn release_all(&mut self) {
        self.keys = [false; KeyCode::COUNT];
        self.mouse_buttons = [false; MouseButtonCode::COUNT];
    }

    /// Keys currently held, in ordinal order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        KeyCode::ALL
            .iter()
            .copied()
            .filter(|k| self.is_key_pressed(*k))
    }

    /// Mouse buttons currently held, in ordinal order.
    pub fn pressed_mouse_buttons(&self) -> impl Iterator<Item = MouseButtonCode> + '_ {
        MouseButtonCode::ALL
            .iter()
            .copied()
            .filter(|b| self.is_mouse_button_pressed(*b))
    }
}
