use std::fmt;

/// Declares a fieldless code enum together with its ordinal table.
///
/// Ordinals follow declaration order and are dense, so `index()` can be used
/// directly as an array index into the input cache.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every code, in ordinal order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Number of codes; size of any per-code table.
            pub const COUNT: usize = Self::ALL.len();

            /// Dense ordinal in `0..COUNT`.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self)
            }
        }
    };
}

code_enum! {
    /// Keyboard key identifier.
    ///
    /// Physical (layout independent) keys. The window shim maps platform key
    /// codes into these variants and drops keys that have no variant here.
    pub enum KeyCode {
        // Printable
        Space,
        Apostrophe,
        Comma,
        Minus,
        Period,
        Slash,
        Digit0, Digit1, Digit2, Digit3, Digit4,
        Digit5, Digit6, Digit7, Digit8, Digit9,
        Semicolon,
        Equal,
        A, B, C, D, E, F, G, H, I, J, K, L, M,
        N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
        LeftBracket,
        Backslash,
        RightBracket,
        GraveAccent,

        // Editing / navigation
        Escape,
        Enter,
        Tab,
        Backspace,
        Insert,
        Delete,
        ArrowRight,
        ArrowLeft,
        ArrowDown,
        ArrowUp,
        PageUp,
        PageDown,
        Home,
        End,
        CapsLock,
        ScrollLock,
        NumLock,
        PrintScreen,
        Pause,

        // Function keys
        F1, F2, F3, F4, F5, F6,
        F7, F8, F9, F10, F11, F12,

        // Keypad
        Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
        Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
        NumpadDecimal,
        NumpadDivide,
        NumpadMultiply,
        NumpadSubtract,
        NumpadAdd,
        NumpadEnter,
        NumpadEqual,

        // Modifiers
        ShiftLeft,
        ControlLeft,
        AltLeft,
        SuperLeft,
        ShiftRight,
        ControlRight,
        AltRight,
        SuperRight,
        ContextMenu,
    }
}

code_enum! {
    /// Mouse button identifier.
    ///
    /// `Button6`..`Button8` cover extra buttons reported by gaming mice.
    pub enum MouseButtonCode {
        Left,
        Right,
        Middle,
        Back,
        Forward,
        Button6,
        Button7,
        Button8,
    }
}
