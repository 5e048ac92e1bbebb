//! Focus management.
//!
//! [`FocusState`] is the highlighted entry of one menu level. [`FocusRing`]
//! holds the single focus target of a whole menu tree and reports what was
//! blurred whenever it moves.

use crate::registry::{CollectionItem, ItemRegistry, Step};
use cascade_core::{ItemId, NodeId};
use serde::{Deserialize, Serialize};

/// Highlighted entry of one menu level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusState {
    focused: Option<ItemId>,
}

impl FocusState {
    /// Currently focused entry.
    #[must_use]
    pub const fn focused(&self) -> Option<ItemId> {
        self.focused
    }

    /// Focus the first navigable entry.
    pub fn focus_first<T: CollectionItem>(&mut self, registry: &ItemRegistry<T>) -> Option<ItemId> {
        self.focused = registry.first_navigable();
        self.focused
    }

    /// Focus the last navigable entry.
    pub fn focus_last<T: CollectionItem>(&mut self, registry: &ItemRegistry<T>) -> Option<ItemId> {
        self.focused = registry.last_navigable();
        self.focused
    }

    /// Focus the next navigable entry, wrapping to the first.
    pub fn focus_next<T: CollectionItem>(&mut self, registry: &ItemRegistry<T>) -> Option<ItemId> {
        self.step(registry, Step::Next)
    }

    /// Focus the previous navigable entry, wrapping to the last.
    pub fn focus_previous<T: CollectionItem>(
        &mut self,
        registry: &ItemRegistry<T>,
    ) -> Option<ItemId> {
        self.step(registry, Step::Previous)
    }

    /// Clear focus.
    pub fn focus_none(&mut self) {
        self.focused = None;
    }

    /// Focus a specific entry; refused for unknown or non-navigable entries.
    pub fn focus_item<T: CollectionItem>(&mut self, registry: &ItemRegistry<T>, id: ItemId) -> bool {
        if registry.get(id).is_some_and(CollectionItem::is_navigable) {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    /// Index of the focused entry; `None` if nothing is focused or the entry
    /// has since been unregistered.
    pub fn focused_index<T>(&self, registry: &ItemRegistry<T>) -> Option<usize> {
        self.focused.and_then(|id| registry.index_of(id))
    }

    fn step<T: CollectionItem>(&mut self, registry: &ItemRegistry<T>, step: Step) -> Option<ItemId> {
        if let Some(next) = registry.adjacent(self.focused, step, true) {
            self.focused = Some(next);
        }
        self.focused
    }
}

/// Where keyboard focus sits in a menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusTarget {
    /// The element that opens the root menu
    Trigger,
    /// A menu surface with no item highlighted
    Content(NodeId),
    /// A menu item
    Item(ItemId),
}

/// Result of moving focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Target that lost focus
    pub blurred: Option<FocusTarget>,
    /// Target that gained focus
    pub focused: Option<FocusTarget>,
}

/// The single focus target of a menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusRing {
    current: Option<FocusTarget>,
}

impl FocusRing {
    /// Current target.
    #[must_use]
    pub const fn current(&self) -> Option<FocusTarget> {
        self.current
    }

    /// Move focus; `None` when the target is unchanged.
    pub fn move_to(&mut self, target: Option<FocusTarget>) -> Option<FocusChange> {
        if self.current == target {
            return None;
        }
        let blurred = std::mem::replace(&mut self.current, target);
        Some(FocusChange {
            blurred,
            focused: target,
        })
    }

    /// Drop focus entirely.
    pub fn clear(&mut self) -> Option<FocusChange> {
        self.move_to(None)
    }
}
