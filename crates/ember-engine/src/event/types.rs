use crate::input::{KeyCode, MouseButtonCode};

use super::kind::EventKind;

/// Window client area changed size, in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowResizeEvent {
    pub width: u32,
    pub height: u32,
}

/// The user asked to close the window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowCloseEvent;

/// A key went down, or is being auto-repeated while held.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyPressedEvent {
    pub key: KeyCode,
    /// True for auto-repeat deliveries; false for the initial press.
    pub repeated: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyReleasedEvent {
    pub key: KeyCode,
}

/// Mouse button pressed. Position is the cursor at the time of the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonPressedEvent {
    pub button: MouseButtonCode,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonReleasedEvent {
    pub button: MouseButtonCode,
    pub x: f64,
    pub y: f64,
}

/// Cursor moved, in physical pixels relative to the client area.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMovedEvent {
    pub x: f64,
    pub y: f64,
}

/// Platform-agnostic window/input event.
///
/// Each variant carries the payload for exactly one [`EventKind`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    WindowResize(WindowResizeEvent),
    WindowClose(WindowCloseEvent),
    KeyPressed(KeyPressedEvent),
    KeyReleased(KeyReleasedEvent),
    MouseButtonPressed(MouseButtonPressedEvent),
    MouseButtonReleased(MouseButtonReleasedEvent),
    MouseMoved(MouseMovedEvent),
}

impl Event {
    /// Kind of this event; fixed by the variant.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::WindowResize(_) => EventKind::WindowResize,
            Event::WindowClose(_) => EventKind::WindowClose,
            Event::KeyPressed(_) => EventKind::KeyPressed,
            Event::KeyReleased(_) => EventKind::KeyReleased,
            Event::MouseButtonPressed(_) => EventKind::MouseButtonPressed,
            Event::MouseButtonReleased(_) => EventKind::MouseButtonReleased,
            Event::MouseMoved(_) => EventKind::MouseMoved,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A concrete event payload type.
///
/// Ties each payload type to its kind at compile time. The dispatcher uses
/// `KIND` as the routing key and `narrow` to recover the payload, so a
/// subscriber is only ever called with the payload type it was registered for.
///
/// Sealed: the taxonomy is closed.
pub trait EventPayload: sealed::Sealed + Into<Event> + 'static {
    const KIND: EventKind;

    /// Returns the payload if `event` is of kind `Self::KIND`.
    fn narrow(event: &Event) -> Option<&Self>;
}

macro_rules! impl_payload {
    ($($payload:ident => $variant:ident),+ $(,)?) => {
        $(
            impl sealed::Sealed for $payload {}

            impl EventPayload for $payload {
                const KIND: EventKind = EventKind::$variant;

                #[inline]
                fn narrow(event: &Event) -> Option<&Self> {
                    match event {
                        Event::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for Event {
                #[inline]
                fn from(payload: $payload) -> Self {
                    Event::$variant(payload)
                }
            }
        )+
    };
}

impl_payload! {
    WindowResizeEvent => WindowResize,
    WindowCloseEvent => WindowClose,
    KeyPressedEvent => KeyPressed,
    KeyReleasedEvent => KeyReleased,
    MouseButtonPressedEvent => MouseButtonPressed,
    MouseButtonReleasedEvent => MouseButtonReleased,
    MouseMovedEvent => MouseMoved,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_event() -> Vec<Event> {
        vec![
            WindowResizeEvent { width: 1024, height: 768 }.into(),
            WindowCloseEvent.into(),
            KeyPressedEvent { key: KeyCode::W, repeated: false }.into(),
            KeyReleasedEvent { key: KeyCode::W }.into(),
            MouseButtonPressedEvent { button: MouseButtonCode::Left, x: 1.0, y: 2.0 }.into(),
            MouseButtonReleasedEvent { button: MouseButtonCode::Left, x: 1.0, y: 2.0 }.into(),
            MouseMovedEvent { x: 3.5, y: 4.5 }.into(),
        ]
    }

    #[test]
    fn kind_matches_construction() {
        let kinds: Vec<EventKind> = every_event().iter().map(Event::kind).collect();
        assert_eq!(kinds, EventKind::ALL.to_vec());
    }

    #[test]
    fn payload_kind_agrees_with_event_kind() {
        let ev: Event = KeyPressedEvent { key: KeyCode::A, repeated: true }.into();
        assert_eq!(ev.kind(), KeyPressedEvent::KIND);

        let ev: Event = MouseMovedEvent { x: 0.0, y: 0.0 }.into();
        assert_eq!(ev.kind(), MouseMovedEvent::KIND);
    }

    #[test]
    fn narrow_only_matches_own_kind() {
        for ev in every_event() {
            assert_eq!(
                WindowResizeEvent::narrow(&ev).is_some(),
                ev.kind() == EventKind::WindowResize
            );
            assert_eq!(
                KeyReleasedEvent::narrow(&ev).is_some(),
                ev.kind() == EventKind::KeyReleased
            );
        }
    }

    #[test]
    fn narrow_preserves_payload() {
        let ev: Event = WindowResizeEvent { width: 1024, height: 768 }.into();
        let payload = WindowResizeEvent::narrow(&ev).copied();
        assert_eq!(payload, Some(WindowResizeEvent { width: 1024, height: 768 }));
    }
}
