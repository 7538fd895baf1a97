//! Input events: [`Msg`], [`Key`], [`MouseAction`].
//!
//! Back ends translate their native events into these so the editor never
//! depends on a particular terminal or windowing library.

use crate::geom::Point;

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
    /// A printable character other than space.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Middle button pressed.
    Auxiliary,
    /// Secondary (right) button pressed.
    Secondary,
    /// Moved with the primary button held.
    DragMain,
    /// Moved with the secondary button held.
    DragSecondary,
    /// Button released.
    Release,
    /// Moved with no button held.
    Move,
}

/// An input message delivered to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse event at a screen position (terminal column, row).
    Mouse { action: MouseAction, pos: Point },
    /// The screen was resized.
    Screen { width: i32, height: i32 },
    /// Sent once when the application starts.
    Init,
    /// Request to quit (window closed, Ctrl-C).
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` for `key`.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Convenience: a mouse event.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse { action, pos }
    }

    /// Whether this message asks the application to stop: `Quit`, `q` or
    /// Escape.
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Self::Quit
                | Self::KeyDown {
                    key: Key::Escape | Key::Char('q') | Key::Char('Q')
                }
        )
    }
}
