//! Opaque handles and host-supplied time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Unique identifier for one menu level (root menu or submenu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Position of the node in an arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Host-supplied monotonic time in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds value.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Timestamp `ms` milliseconds later.
    #[must_use]
    pub const fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is later).
    #[must_use]
    pub const fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_hash_and_display() {
        let mut set = HashSet::new();
        set.insert(ItemId::new(1));
        set.insert(ItemId::new(2));
        set.insert(ItemId::new(1));
        assert_eq!(set.len(), 2);
        assert_eq!(ItemId::new(7).to_string(), "item#7");
        assert_eq!(NodeId::new(3).to_string(), "node#3");
        assert_eq!(NodeId::new(3).index(), 3);
    }

    #[test]
    fn test_timestamp_arithmetic() {
        let t = Timestamp::from_millis(100);
        assert_eq!(t.after(50).as_millis(), 150);
        assert_eq!(t.after(50).since(t), 50);
        assert_eq!(t.since(t.after(10)), 0);
        assert_eq!(Timestamp::from_millis(u64::MAX).after(1).as_millis(), u64::MAX);
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp::from_millis(1) < Timestamp::from_millis(2));
        assert_eq!(Timestamp::default(), Timestamp::ZERO);
    }
}
