use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::event::{
    Event, KeyPressedEvent, KeyReleasedEvent, MouseButtonPressedEvent, MouseButtonReleasedEvent,
    MouseMovedEvent, WindowCloseEvent, WindowResizeEvent,
};
use crate::input::{KeyCode, MouseButtonCode, SharedInput};

/// Receiver for every event the shim produces.
pub type EventCallback = Box<dyn FnMut(Event)>;

/// Translates winit window events into [`Event`]s.
///
/// The callback is fixed at construction; each translated native event is
/// forwarded through it exactly once, in arrival order.
pub struct WindowShim {
    callback: EventCallback,

    /// winit button events carry no position; track it from `CursorMoved`.
    cursor: (f64, f64),
}

impl WindowShim {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        Self {
            callback: Box::new(callback),
            cursor: (0.0, 0.0),
        }
    }

    /// Last cursor position reported by the platform, in physical pixels.
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    /// Translates `event` and forwards the result. Returns whether an event was forwarded.
    pub fn handle(&mut self, event: &WindowEvent) -> bool {
        match self.translate(event) {
            Some(ev) => {
                (self.callback)(ev);
                true
            }
            None => false,
        }
    }

    /// Forwards a release for every key and button `input` reports as held.
    ///
    /// Used on focus loss: the platform delivers those releases to whichever
    /// window has focus, so they would otherwise never arrive here. Buttons are
    /// released at the tracked cursor. Returns the number of events forwarded.
    pub fn release_held(&mut self, input: &SharedInput) -> usize {
        // Snapshot first: the callback's subscribers borrow the cache mutably.
        let (keys, buttons): (Vec<KeyCode>, Vec<MouseButtonCode>) = {
            let state = input.borrow();
            (state.pressed_keys().collect(), state.pressed_mouse_buttons().collect())
        };

        let (x, y) = self.cursor;
        for key in &keys {
            (self.callback)(KeyReleasedEvent { key: *key }.into());
        }
        for button in &buttons {
            (self.callback)(MouseButtonReleasedEvent { button: *button, x, y }.into());
        }

        let released = keys.len() + buttons.len();
        if released > 0 {
            log::debug!("focus lost, released {released} held inputs");
        }
        released
    }

    fn translate(&mut self, event: &WindowEvent) -> Option<Event> {
        match event {
            WindowEvent::Resized(size) => Some(
                WindowResizeEvent {
                    width: size.width,
                    height: size.height,
                }
                    .into(),
            ),

            WindowEvent::CloseRequested => Some(WindowCloseEvent.into()),

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                Some(MouseMovedEvent { x: position.x, y: position.y }.into())
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_mouse_button(*button) else {
                    log::trace!("dropping unmapped mouse button {button:?}");
                    return None;
                };
                let (x, y) = self.cursor;

                Some(match state {
                    ElementState::Pressed => MouseButtonPressedEvent { button, x, y }.into(),
                    ElementState::Released => MouseButtonReleasedEvent { button, x, y }.into(),
                })
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    log::trace!("dropping unidentified key {:?}", event.physical_key);
                    return None;
                };
                let Some(key) = map_key(code) else {
                    log::trace!("dropping unmapped key {code:?}");
                    return None;
                };

                Some(match event.state {
                    ElementState::Pressed => KeyPressedEvent {
                        key,
                        repeated: event.repeat,
                    }
                        .into(),
                    ElementState::Released => KeyReleasedEvent { key }.into(),
                })
            }

            _ => None,
        }
    }
}

/// Maps a winit mouse button. Extra buttons beyond `Button8` have no code.
pub fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButtonCode> {
    Some(match button {
        WinitMouseButton::Left => MouseButtonCode::Left,
        WinitMouseButton::Right => MouseButtonCode::Right,
        WinitMouseButton::Middle => MouseButtonCode::Middle,
        WinitMouseButton::Back => MouseButtonCode::Back,
        WinitMouseButton::Forward => MouseButtonCode::Forward,
        WinitMouseButton::Other(5) => MouseButtonCode::Button6,
        WinitMouseButton::Other(6) => MouseButtonCode::Button7,
        WinitMouseButton::Other(7) => MouseButtonCode::Button8,
        WinitMouseButton::Other(_) => return None,
    })
}

/// Maps a winit physical key. Keys without a [`KeyCode`] variant yield `None`.
pub fn map_key(code: WinitKeyCode) -> Option<KeyCode> {
    let key = match code {
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Quote => KeyCode::Apostrophe,
        WinitKeyCode::Comma => KeyCode::Comma,
        WinitKeyCode::Minus => KeyCode::Minus,
        WinitKeyCode::Period => KeyCode::Period,
        WinitKeyCode::Slash => KeyCode::Slash,

        WinitKeyCode::Digit0 => KeyCode::Digit0,
        WinitKeyCode::Digit1 => KeyCode::Digit1,
        WinitKeyCode::Digit2 => KeyCode::Digit2,
        WinitKeyCode::Digit3 => KeyCode::Digit3,
        WinitKeyCode::Digit4 => KeyCode::Digit4,
        WinitKeyCode::Digit5 => KeyCode::Digit5,
        WinitKeyCode::Digit6 => KeyCode::Digit6,
        WinitKeyCode::Digit7 => KeyCode::Digit7,
        WinitKeyCode::Digit8 => KeyCode::Digit8,
        WinitKeyCode::Digit9 => KeyCode::Digit9,

        WinitKeyCode::Semicolon => KeyCode::Semicolon,
        WinitKeyCode::Equal => KeyCode::Equal,

        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyB => KeyCode::B,
        WinitKeyCode::KeyC => KeyCode::C,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyE => KeyCode::E,
        WinitKeyCode::KeyF => KeyCode::F,
        WinitKeyCode::KeyG => KeyCode::G,
        WinitKeyCode::KeyH => KeyCode::H,
        WinitKeyCode::KeyI => KeyCode::I,
        WinitKeyCode::KeyJ => KeyCode::J,
        WinitKeyCode::KeyK => KeyCode::K,
        WinitKeyCode::KeyL => KeyCode::L,
        WinitKeyCode::KeyM => KeyCode::M,
        WinitKeyCode::KeyN => KeyCode::N,
        WinitKeyCode::KeyO => KeyCode::O,
        WinitKeyCode::KeyP => KeyCode::P,
        WinitKeyCode::KeyQ => KeyCode::Q,
        WinitKeyCode::KeyR => KeyCode::R,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyT => KeyCode::T,
        WinitKeyCode::KeyU => KeyCode::U,
        WinitKeyCode::KeyV => KeyCode::V,
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyX => KeyCode::X,
        WinitKeyCode::KeyY => KeyCode::Y,
        WinitKeyCode::KeyZ => KeyCode::Z,

        WinitKeyCode::BracketLeft => KeyCode::LeftBracket,
        WinitKeyCode::Backslash => KeyCode::Backslash,
        WinitKeyCode::BracketRight => KeyCode::RightBracket,
        WinitKeyCode::Backquote => KeyCode::GraveAccent,

        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Insert => KeyCode::Insert,
        WinitKeyCode::Delete => KeyCode::Delete,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::CapsLock => KeyCode::CapsLock,
        WinitKeyCode::ScrollLock => KeyCode::ScrollLock,
        WinitKeyCode::NumLock => KeyCode::NumLock,
        WinitKeyCode::PrintScreen => KeyCode::PrintScreen,
        WinitKeyCode::Pause => KeyCode::Pause,

        WinitKeyCode::F1 => KeyCode::F1,
        WinitKeyCode::F2 => KeyCode::F2,
        WinitKeyCode::F3 => KeyCode::F3,
        WinitKeyCode::F4 => KeyCode::F4,
        WinitKeyCode::F5 => KeyCode::F5,
        WinitKeyCode::F6 => KeyCode::F6,
        WinitKeyCode::F7 => KeyCode::F7,
        WinitKeyCode::F8 => KeyCode::F8,
        WinitKeyCode::F9 => KeyCode::F9,
        WinitKeyCode::F10 => KeyCode::F10,
        WinitKeyCode::F11 => KeyCode::F11,
        WinitKeyCode::F12 => KeyCode::F12,

        WinitKeyCode::Numpad0 => KeyCode::Numpad0,
        WinitKeyCode::Numpad1 => KeyCode::Numpad1,
        WinitKeyCode::Numpad2 => KeyCode::Numpad2,
        WinitKeyCode::Numpad3 => KeyCode::Numpad3,
        WinitKeyCode::Numpad4 => KeyCode::Numpad4,
        WinitKeyCode::Numpad5 => KeyCode::Numpad5,
        WinitKeyCode::Numpad6 => KeyCode::Numpad6,
        WinitKeyCode::Numpad7 => KeyCode::Numpad7,
        WinitKeyCode::Numpad8 => KeyCode::Numpad8,
        WinitKeyCode::Numpad9 => KeyCode::Numpad9,
        WinitKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,
        WinitKeyCode::NumpadDivide => KeyCode::NumpadDivide,
        WinitKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        WinitKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        WinitKeyCode::NumpadEqual => KeyCode::NumpadEqual,

        WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        WinitKeyCode::ControlLeft => KeyCode::ControlLeft,
        WinitKeyCode::AltLeft => KeyCode::AltLeft,
        WinitKeyCode::SuperLeft => KeyCode::SuperLeft,
        WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
        WinitKeyCode::ControlRight => KeyCode::ControlRight,
        WinitKeyCode::AltRight => KeyCode::AltRight,
        WinitKeyCode::SuperRight => KeyCode::SuperRight,
        WinitKeyCode::ContextMenu => KeyCode::ContextMenu,

        _ => return None,
    };
    Some(key)
}
