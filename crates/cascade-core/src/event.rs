//! Input events consumed by menus.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved
    PointerMove {
        /// Pointer type
        pointer_type: PointerType,
        /// Position in viewport coordinates
        position: Point,
    },
    /// Pointer pressed
    PointerDown {
        /// Pointer type
        pointer_type: PointerType,
        /// Position in viewport coordinates
        position: Point,
        /// Button (for mouse pointers)
        button: Option<MouseButton>,
    },
    /// Pointer released
    PointerUp {
        /// Pointer type
        pointer_type: PointerType,
        /// Position in viewport coordinates
        position: Point,
        /// Button (for mouse pointers)
        button: Option<MouseButton>,
    },
    /// Pointer cancelled by the platform (e.g. scroll takeover)
    PointerCancel {
        /// Pointer type
        pointer_type: PointerType,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
        /// Modifier state at the time of the press
        modifiers: Modifiers,
    },
}

impl Event {
    /// Mouse move to a position.
    #[must_use]
    pub const fn pointer_move(position: Point) -> Self {
        Self::PointerMove {
            pointer_type: PointerType::Mouse,
            position,
        }
    }

    /// Mouse button press at a position.
    #[must_use]
    pub const fn mouse_down(position: Point, button: MouseButton) -> Self {
        Self::PointerDown {
            pointer_type: PointerType::Mouse,
            position,
            button: Some(button),
        }
    }

    /// Mouse button release at a position.
    #[must_use]
    pub const fn mouse_up(position: Point, button: MouseButton) -> Self {
        Self::PointerUp {
            pointer_type: PointerType::Mouse,
            position,
            button: Some(button),
        }
    }

    /// Unmodified key press.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { position, .. }
            | Self::PointerDown { position, .. }
            | Self::PointerUp { position, .. } => Some(*position),
            Self::PointerCancel { .. } | Self::KeyDown { .. } => None,
        }
    }
}

/// Type of pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerType {
    /// Mouse pointer
    #[default]
    Mouse,
    /// Touch pointer
    Touch,
    /// Pen/stylus pointer
    Pen,
}

impl PointerType {
    /// Touch and pen pointers have no hover and use long press for context menus.
    #[must_use]
    pub const fn is_touch_or_pen(self) -> bool {
        matches!(self, Self::Touch | Self::Pen)
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift held
    pub shift: bool,
    /// Control held
    pub ctrl: bool,
    /// Alt/Option held
    pub alt: bool,
    /// Meta/Command held
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether a command modifier (ctrl, alt, meta) is held.
    #[must_use]
    pub const fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Enter/Return key
    Enter,
    /// Space key
    Space,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// A printable character
    Character(char),
}

impl Key {
    /// Map a typed character to a key (`' '` becomes [`Key::Space`]).
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        if c == ' ' {
            Self::Space
        } else {
            Self::Character(c)
        }
    }

    /// The character this key types, if it is printable.
    #[must_use]
    pub const fn printable(self) -> Option<char> {
        match self {
            Self::Character(c) => Some(c),
            Self::Space => Some(' '),
            _ => None,
        }
    }
}
