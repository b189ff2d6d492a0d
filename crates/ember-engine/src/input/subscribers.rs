use crate::event::{
    EventDispatcher, KeyPressedEvent, KeyReleasedEvent, MouseButtonPressedEvent,
    MouseButtonReleasedEvent, MouseMovedEvent,
};

use super::state::SharedInput;

/// Registers the subscribers that keep `input` in sync with dispatched events.
///
/// Takes the KeyPressed, KeyReleased, MouseButtonPressed, MouseButtonReleased
/// and MouseMoved slots, replacing anything registered there before.
pub fn subscribe_input(dispatcher: &mut EventDispatcher, input: SharedInput) {
    let state = input.clone();
    dispatcher.subscribe(move |e: &KeyPressedEvent| {
        // Auto-repeat leaves the slot untouched; only the initial press transitions.
        if e.repeated {
            return;
        }
        log::trace!("key pressed: {}", e.key);
        state.borrow_mut().press_key(e.key);
    });

    let state = input.clone();
    dispatcher.subscribe(move |e: &KeyReleasedEvent| {
        log::trace!("key released: {}", e.key);
        state.borrow_mut().release_key(e.key);
    });

    let state = input.clone();
    dispatcher.subscribe(move |e: &MouseButtonPressedEvent| {
        let mut state = state.borrow_mut();
        state.set_cursor_position(e.x, e.y);
        state.press_mouse_button(e.button);
    });

    let state = input.clone();
    dispatcher.subscribe(move |e: &MouseButtonReleasedEvent| {
        let mut state = state.borrow_mut();
        state.set_cursor_position(e.x, e.y);
        state.release_mouse_button(e.button);
    });

    dispatcher.subscribe(move |e: &MouseMovedEvent| {
        input.borrow_mut().set_cursor_position(e.x, e.y);
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::event::{Event, EventKind};
    use crate::input::{InputState, KeyCode, MouseButtonCode};

    fn setup() -> (EventDispatcher, SharedInput) {
        let input = InputState::shared();
        let mut dispatcher = EventDispatcher::new();
        subscribe_input(&mut dispatcher, input.clone());
        (dispatcher, input)
    }

    #[test]
    fn registers_input_kinds_only() {
        let (dispatcher, _) = setup();
        assert!(dispatcher.is_subscribed(EventKind::KeyPressed));
        assert!(dispatcher.is_subscribed(EventKind::KeyReleased));
        assert!(dispatcher.is_subscribed(EventKind::MouseButtonPressed));
        assert!(dispatcher.is_subscribed(EventKind::MouseButtonReleased));
        assert!(dispatcher.is_subscribed(EventKind::MouseMoved));
        assert!(!dispatcher.is_subscribed(EventKind::WindowClose));
        assert!(!dispatcher.is_subscribed(EventKind::WindowResize));
    }

    #[test]
    fn key_press_and_release_drive_cache() {
        let (mut dispatcher, input) = setup();

        dispatcher.dispatch(&KeyPressedEvent { key: KeyCode::W, repeated: false }.into());
        assert!(input.borrow().is_key_pressed(KeyCode::W));

        dispatcher.dispatch(&KeyPressedEvent { key: KeyCode::W, repeated: true }.into());
        assert!(input.borrow().is_key_pressed(KeyCode::W));

        dispatcher.dispatch(&KeyReleasedEvent { key: KeyCode::W }.into());
        assert!(!input.borrow().is_key_pressed(KeyCode::W));
    }

    #[test]
    fn repeat_does_not_press() {
        let (mut dispatcher, input) = setup();

        // A repeat with no initial press (e.g. focus gained mid-hold) must not
        // set the slot: the subscriber guard skips repeats entirely.
        dispatcher.dispatch(&KeyPressedEvent { key: KeyCode::D, repeated: true }.into());
        assert!(!input.borrow().is_key_pressed(KeyCode::D));
    }

    #[test]
    fn repeat_storm_leaves_release_authoritative() {
        let (mut dispatcher, input) = setup();
        let ev: Event = KeyPressedEvent { key: KeyCode::A, repeated: true }.into();

        dispatcher.dispatch(&KeyPressedEvent { key: KeyCode::A, repeated: false }.into());
        for _ in 0..32 {
            dispatcher.dispatch(&ev);
        }
        dispatcher.dispatch(&KeyReleasedEvent { key: KeyCode::A }.into());

        assert!(!input.borrow().is_key_pressed(KeyCode::A));
    }

    #[test]
    fn mouse_buttons_record_position() {
        let (mut dispatcher, input) = setup();

        dispatcher.dispatch(
            &MouseButtonPressedEvent { button: MouseButtonCode::Right, x: 12.0, y: 34.0 }.into(),
        );
        {
            let state = input.borrow();
            assert!(state.is_mouse_button_pressed(MouseButtonCode::Right));
            assert_eq!(state.cursor_position(), Some((12.0, 34.0)));
        }

        dispatcher.dispatch(
            &MouseButtonReleasedEvent { button: MouseButtonCode::Right, x: 40.0, y: 50.0 }.into(),
        );
        let state = input.borrow();
        assert!(!state.is_mouse_button_pressed(MouseButtonCode::Right));
        assert_eq!(state.cursor_position(), Some((40.0, 50.0)));
    }

    #[test]
    fn mouse_moved_updates_cursor() {
        let (mut dispatcher, input) = setup();
        dispatcher.dispatch(&MouseMovedEvent { x: 1.5, y: 2.5 }.into());
        assert_eq!(input.borrow().cursor_position(), Some((1.5, 2.5)));
    }

    #[test]
    fn replacing_key_subscriber_bypasses_cache() {
        let (mut dispatcher, input) = setup();
        let seen = Rc::new(Cell::new(false));

        let s = seen.clone();
        dispatcher.subscribe(move |_: &KeyPressedEvent| s.set(true));
        dispatcher.dispatch(&KeyPressedEvent { key: KeyCode::E, repeated: false }.into());

        assert!(seen.get());
        assert!(!input.borrow().is_key_pressed(KeyCode::E));
    }
}
