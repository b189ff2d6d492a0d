use std::fmt;

use super::kind::EventKind;
use super::types::{Event, EventPayload};

type Handler = Box<dyn FnMut(&Event)>;

/// Routes events to at most one subscriber per [`EventKind`].
///
/// Handlers live in a fixed table indexed by kind ordinal. Registering a handler
/// for a kind replaces the previous one; dispatching a kind without a handler
/// does nothing.
///
/// Single-threaded: handlers are not required to be `Send`.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: [Option<Handler>; EventKind::COUNT],
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` as the sole handler for events of payload type `E`.
    ///
    /// The payload is narrowed here, once, so the stored handler only needs
    /// the erased `&Event`.
    pub fn subscribe<E, F>(&mut self, mut callback: F)
    where
        E: EventPayload,
        F: FnMut(&E) + 'static,
    {
        let handler: Handler = Box::new(move |event: &Event| {
            // Slot `E::KIND` only ever receives `E::KIND` events.
            if let Some(payload) = E::narrow(event) {
                callback(payload);
            }
        });

        if self.handlers[E::KIND.index()].replace(handler).is_some() {
            log::debug!("replaced {} subscriber", E::KIND);
        }
    }

    /// Removes the handler for `kind`. Returns whether one was registered.
    pub fn unsubscribe(&mut self, kind: EventKind) -> bool {
        self.handlers[kind.index()].take().is_some()
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.handlers[kind.index()].is_some()
    }

    /// Invokes the handler registered for `event`'s kind, if any.
    pub fn dispatch(&mut self, event: &Event) {
        match self.handlers[event.kind().index()].as_mut() {
            Some(handler) => handler(event),
            None => log::trace!("no subscriber for {}", event.kind()),
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribed: Vec<EventKind> = EventKind::ALL
            .into_iter()
            .filter(|k| self.is_subscribed(*k))
            .collect();

        f.debug_struct("EventDispatcher")
            .field("subscribed", &subscribed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::event::{
        KeyPressedEvent, KeyReleasedEvent, MouseButtonPressedEvent, MouseButtonReleasedEvent,
        MouseMovedEvent, WindowCloseEvent, WindowResizeEvent,
    };
    use crate::input::{KeyCode, MouseButtonCode};

    fn sample(kind: EventKind) -> Event {
        match kind {
            EventKind::WindowResize => WindowResizeEvent { width: 1, height: 1 }.into(),
            EventKind::WindowClose => WindowCloseEvent.into(),
            EventKind::KeyPressed => KeyPressedEvent { key: KeyCode::Q, repeated: false }.into(),
            EventKind::KeyReleased => KeyReleasedEvent { key: KeyCode::Q }.into(),
            EventKind::MouseButtonPressed => MouseButtonPressedEvent {
                button: MouseButtonCode::Left,
                x: 0.0,
                y: 0.0,
            }
                .into(),
            EventKind::MouseButtonReleased => MouseButtonReleasedEvent {
                button: MouseButtonCode::Left,
                x: 0.0,
                y: 0.0,
            }
                .into(),
            EventKind::MouseMoved => MouseMovedEvent { x: 0.0, y: 0.0 }.into(),
        }
    }

    #[test]
    fn dispatch_without_subscriber_is_noop() {
        let mut dispatcher = EventDispatcher::new();
        for kind in EventKind::ALL {
            dispatcher.dispatch(&sample(kind));
            assert!(!dispatcher.is_subscribed(kind));
        }
    }

    #[test]
    fn unrelated_kinds_do_not_reach_subscriber() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = EventDispatcher::new();

        let c = calls.clone();
        dispatcher.subscribe(move |_: &MouseMovedEvent| c.set(c.get() + 1));

        for kind in EventKind::ALL {
            dispatcher.dispatch(&sample(kind));
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn second_subscriber_replaces_first() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut dispatcher = EventDispatcher::new();

        let f = first.clone();
        dispatcher.subscribe(move |_: &KeyReleasedEvent| f.set(f.get() + 1));
        let s = second.clone();
        dispatcher.subscribe(move |_: &KeyReleasedEvent| s.set(s.get() + 1));

        dispatcher.dispatch(&sample(EventKind::KeyReleased));

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn resize_subscriber_records_dimensions() {
        let last = Rc::new(Cell::new(None));
        let mut dispatcher = EventDispatcher::new();

        let l = last.clone();
        dispatcher.subscribe(move |e: &WindowResizeEvent| l.set(Some((e.width, e.height))));

        dispatcher.dispatch(&WindowResizeEvent { width: 1024, height: 768 }.into());

        assert_eq!(last.get(), Some((1024, 768)));
    }

    #[test]
    fn close_does_not_tear_down_dispatcher() {
        let close = Rc::new(Cell::new(false));
        let moves = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();

        let c = close.clone();
        dispatcher.subscribe(move |_: &WindowCloseEvent| c.set(true));
        let m = moves.clone();
        dispatcher.subscribe(move |e: &MouseMovedEvent| m.borrow_mut().push((e.x, e.y)));

        dispatcher.dispatch(&WindowCloseEvent.into());
        assert!(close.get());

        dispatcher.dispatch(&MouseMovedEvent { x: 10.0, y: 20.0 }.into());
        assert_eq!(*moves.borrow(), vec![(10.0, 20.0)]);
        assert!(dispatcher.is_subscribed(EventKind::WindowClose));
    }

    #[test]
    fn unsubscribe_restores_noop() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = EventDispatcher::new();

        let c = calls.clone();
        dispatcher.subscribe(move |_: &WindowCloseEvent| c.set(c.get() + 1));

        assert!(dispatcher.unsubscribe(EventKind::WindowClose));
        assert!(!dispatcher.unsubscribe(EventKind::WindowClose));

        dispatcher.dispatch(&WindowCloseEvent.into());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn debug_lists_subscribed_kinds() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe(|_: &WindowCloseEvent| {});
        let s = format!("{dispatcher:?}");
        assert!(s.contains("WindowClose"));
        assert!(!s.contains("MouseMoved"));
    }
}
