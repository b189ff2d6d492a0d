//! Event subsystem.
//!
//! A closed taxonomy of window/input events and a dispatcher that routes each
//! event to at most one subscriber per kind. The window shim produces events;
//! the application loop owns the dispatcher and registers subscribers at startup.

mod dispatcher;
mod kind;
mod types;

pub use dispatcher::EventDispatcher;
pub use kind::EventKind;
pub use types::{
    Event,
    EventPayload,
    KeyPressedEvent,
    KeyReleasedEvent,
    MouseButtonPressedEvent,
    MouseButtonReleasedEvent,
    MouseMovedEvent,
    WindowCloseEvent,
    WindowResizeEvent,
};
