//! Reading direction.

use crate::event::Key;
use serde::{Deserialize, Serialize};

/// Reading direction threaded through key mapping and geometry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left
    Rtl,
}

impl Direction {
    /// Whether this is right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Arrow key that opens a submenu from its trigger.
    #[must_use]
    pub const fn open_key(self) -> Key {
        match self {
            Self::Ltr => Key::Right,
            Self::Rtl => Key::Left,
        }
    }

    /// Arrow key that closes the current submenu level.
    #[must_use]
    pub const fn close_key(self) -> Key {
        match self {
            Self::Ltr => Key::Left,
            Self::Rtl => Key::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ltr() {
        assert_eq!(Direction::default(), Direction::Ltr);
        assert!(!Direction::Ltr.is_rtl());
        assert!(Direction::Rtl.is_rtl());
    }

    #[test]
    fn test_keys_swap_in_rtl() {
        assert_eq!(Direction::Ltr.open_key(), Key::Right);
        assert_eq!(Direction::Ltr.close_key(), Key::Left);
        assert_eq!(Direction::Rtl.open_key(), Key::Left);
        assert_eq!(Direction::Rtl.close_key(), Key::Right);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Rtl).expect("serialize");
        assert_eq!(json, "\"rtl\"");
        let back: Direction = serde_json::from_str("\"ltr\"").expect("deserialize");
        assert_eq!(back, Direction::Ltr);
    }
}
