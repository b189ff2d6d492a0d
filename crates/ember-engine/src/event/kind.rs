use std::fmt;

/// Tag identifying which variant of [`Event`](super::Event) an instance is.
///
/// The set is closed; `index()` is the ordinal used by the dispatcher table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    WindowResize,
    WindowClose,

    KeyPressed,
    KeyReleased,

    MouseButtonPressed,
    MouseButtonReleased,
    MouseMoved,
}

impl EventKind {
    /// Every kind, in ordinal order.
    pub const ALL: [EventKind; 7] = [
        EventKind::WindowResize,
        EventKind::WindowClose,
        EventKind::KeyPressed,
        EventKind::KeyReleased,
        EventKind::MouseButtonPressed,
        EventKind::MouseButtonReleased,
        EventKind::MouseMoved,
    ];

    /// Number of kinds; size of the dispatcher table.
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
