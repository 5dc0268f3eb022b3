//! Input events: [`Msg`], [`Key`], [`MouseAction`].

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

// ---------------------------------------------------------------------------
// MouseAction
// ---------------------------------------------------------------------------

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed or dragged.
    Main,
    /// Middle button pressed.
    Auxiliary,
    /// Secondary (right) button pressed or dragged.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved with no button held.
    Move,
}

// ---------------------------------------------------------------------------
// Msg
// ---------------------------------------------------------------------------

/// An input message delivered to the [`Model`](crate::Model).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Sent once when the application starts.
    Init,
    /// Sent at the configured tick interval.
    Tick,
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event at terminal cell (`x`, `y`).
    Mouse { action: MouseAction, x: i32, y: i32 },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` for a printable character.
    pub fn char(c: char) -> Self {
        Self::KeyDown { key: Key::Char(c) }
    }
}
