//! Ordered registry of the entries of one menu level.
//!
//! Entries may register in any order and may sit inside structural wrappers
//! (groups). Each registration carries a [`DocumentPosition`], the path of
//! sibling indices from the level's root to the entry, and the registry
//! derives document order from those paths lazily on first query after a
//! change.

use cascade_core::ItemId;
use std::cell::OnceCell;
use std::collections::HashMap;

/// Behaviour the registry needs from its entries.
pub trait CollectionItem {
    /// Whether the entry is disabled.
    fn is_disabled(&self) -> bool;

    /// Set the disabled flag.
    fn set_disabled(&mut self, disabled: bool);

    /// Whether keyboard navigation may land on the entry.
    fn is_navigable(&self) -> bool {
        !self.is_disabled()
    }
}

/// Path of sibling indices from the root of a menu level to an entry.
///
/// Compared lexicographically, so a wrapper's children sort right after the
/// wrapper's own slot and before its next sibling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DocumentPosition(Vec<u32>);

impl DocumentPosition {
    /// Position of a top-level entry.
    #[must_use]
    pub fn at(index: u32) -> Self {
        Self(vec![index])
    }

    /// Position of the `index`-th child of this position.
    #[must_use]
    pub fn child(&self, index: u32) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// Path components.
    #[must_use]
    pub fn path(&self) -> &[u32] {
        &self.0
    }

    /// Nesting depth (1 for top-level entries).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u32>> for DocumentPosition {
    fn from(path: Vec<u32>) -> Self {
        Self(path)
    }
}

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Toward the end
    Next,
    /// Toward the start
    Previous,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    position: DocumentPosition,
}

#[derive(Debug, Clone, Default)]
struct Order {
    ids: Vec<ItemId>,
    index: HashMap<ItemId, usize>,
}

/// Ordered set of the entries of one menu level.
#[derive(Debug, Clone)]
pub struct ItemRegistry<T> {
    entries: HashMap<ItemId, Entry<T>>,
    next_id: u64,
    order: OnceCell<Order>,
}

impl<T> Default for ItemRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemRegistry<T> {
    /// Create an empty registry issuing IDs from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_base(0)
    }

    /// Create an empty registry issuing IDs from `base`.
    ///
    /// Registries sharing one tree use disjoint bases so IDs stay unique
    /// across levels.
    #[must_use]
    pub fn with_id_base(base: u64) -> Self {
        Self {
            entries: HashMap::new(),
            next_id: base,
            order: OnceCell::new(),
        }
    }

    /// Register an entry at a document position.
    pub fn register(&mut self, item: T, position: DocumentPosition) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { item, position });
        self.order.take();
        id
    }

    /// Remove an entry; later entries move up one index.
    pub fn unregister(&mut self, id: ItemId) -> Option<T> {
        let entry = self.entries.remove(&id)?;
        self.order.take();
        Some(entry.item)
    }

    /// Move an entry to a new document position.
    pub fn reposition(&mut self, id: ItemId, position: DocumentPosition) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.position = position;
                self.order.take();
                true
            }
            None => false,
        }
    }

    /// IDs in document order.
    pub fn ordered(&self) -> &[ItemId] {
        &self.order().ids
    }

    /// Document-order index of an entry; `None` for stale handles.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.order().index.get(&id).copied()
    }

    /// Whether the ID is registered.
    pub fn contains(&self, id: ItemId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Get an entry.
    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.entries.get(&id).map(|e| &e.item)
    }

    /// Get an entry mutably. Ordering is unaffected.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.entries.get_mut(&id).map(|e| &mut e.item)
    }

    /// Document position of an entry.
    pub fn position(&self, id: ItemId) -> Option<&DocumentPosition> {
        self.entries.get(&id).map(|e| &e.position)
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &T)> + '_ {
        self.ordered()
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|e| (*id, &e.item)))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn order(&self) -> &Order {
        self.order.get_or_init(|| {
            let mut ids: Vec<ItemId> = self.entries.keys().copied().collect();
            ids.sort_by(|a, b| {
                self.entries[a]
                    .position
                    .cmp(&self.entries[b].position)
                    .then(a.cmp(b))
            });
            let index = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
            Order { ids, index }
        })
    }
}

impl<T: CollectionItem> ItemRegistry<T> {
    /// Set the disabled flag; the entry keeps its slot.
    pub fn set_disabled(&mut self, id: ItemId, disabled: bool) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.set_disabled(disabled);
                true
            }
            None => false,
        }
    }

    /// Next entry from `current`, wrapping around at either end.
    ///
    /// With no (or a stale) current entry, `Next` starts at the first entry
    /// and `Previous` at the last. When `skip_disabled` is set, entries that
    /// are not navigable are passed over; `None` when nothing qualifies.
    pub fn adjacent(&self, current: Option<ItemId>, step: Step, skip_disabled: bool) -> Option<ItemId> {
        let ids = self.ordered();
        let len = ids.len();
        if len == 0 {
            return None;
        }

        let start = match current.and_then(|id| self.index_of(id)) {
            Some(i) => match step {
                Step::Next => (i + 1) % len,
                Step::Previous => (i + len - 1) % len,
            },
            None => match step {
                Step::Next => 0,
                Step::Previous => len - 1,
            },
        };

        let mut idx = start;
        for _ in 0..len {
            let id = ids[idx];
            if !skip_disabled || self.get(id).is_some_and(CollectionItem::is_navigable) {
                return Some(id);
            }
            idx = match step {
                Step::Next => (idx + 1) % len,
                Step::Previous => (idx + len - 1) % len,
            };
        }
        None
    }

    /// First navigable entry.
    pub fn first_navigable(&self) -> Option<ItemId> {
        self.adjacent(None, Step::Next, true)
    }

    /// Last navigable entry.
    pub fn last_navigable(&self) -> Option<ItemId> {
        self.adjacent(None, Step::Previous, true)
    }

    /// Navigable entries in document order.
    pub fn navigable(&self) -> impl Iterator<Item = (ItemId, &T)> + '_ {
        self.iter().filter(|(_, item)| item.is_navigable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        disabled: bool,
    }

    impl Row {
        const fn new(name: &'static str) -> Self {
            Self {
                name,
                disabled: false,
            }
        }
    }

    impl CollectionItem for Row {
        fn is_disabled(&self) -> bool {
            self.disabled
        }

        fn set_disabled(&mut self, disabled: bool) {
            self.disabled = disabled;
        }
    }

    fn names(reg: &ItemRegistry<Row>) -> Vec<&'static str> {
        reg.iter().map(|(_, r)| r.name).collect()
    }

    #[test]
    fn test_out_of_order_registration() {
        let mut reg = ItemRegistry::new();
        reg.register(Row::new("c"), DocumentPosition::at(2));
        reg.register(Row::new("a"), DocumentPosition::at(0));
        reg.register(Row::new("b"), DocumentPosition::at(1));
        assert_eq!(names(&reg), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_wrapped_entries_sort_inside_wrapper() {
        let mut reg = ItemRegistry::new();
        let group = DocumentPosition::at(1);
        reg.register(Row::new("after"), DocumentPosition::at(2));
        reg.register(Row::new("second"), group.child(1));
        reg.register(Row::new("before"), DocumentPosition::at(0));
        reg.register(Row::new("first"), group.child(0));
        assert_eq!(names(&reg), vec!["before", "first", "second", "after"]);
        assert_eq!(group.child(0).depth(), 2);
        assert_eq!(group.child(0).path(), &[1, 0]);
    }

    #[test]
    fn test_index_of_and_stale_handle() {
        let mut reg = ItemRegistry::new();
        let a = reg.register(Row::new("a"), DocumentPosition::at(0));
        let b = reg.register(Row::new("b"), DocumentPosition::at(1));
        let c = reg.register(Row::new("c"), DocumentPosition::at(2));
        assert_eq!(reg.index_of(c), Some(2));

        assert_eq!(reg.unregister(b).map(|r| r.name), Some("b"));
        assert_eq!(reg.index_of(b), None);
        assert_eq!(reg.index_of(a), Some(0));
        assert_eq!(reg.index_of(c), Some(1));
        assert_eq!(reg.unregister(b), None);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_reposition_reorders() {
        let mut reg = ItemRegistry::new();
        let a = reg.register(Row::new("a"), DocumentPosition::at(0));
        reg.register(Row::new("b"), DocumentPosition::at(1));
        assert!(reg.reposition(a, DocumentPosition::at(5)));
        assert_eq!(names(&reg), vec!["b", "a"]);
        assert!(!reg.reposition(ItemId::new(99), DocumentPosition::at(0)));
    }

    #[test]
    fn test_id_base_partitions_ids() {
        let mut left: ItemRegistry<Row> = ItemRegistry::with_id_base(0);
        let mut right: ItemRegistry<Row> = ItemRegistry::with_id_base(1 << 32);
        let a = left.register(Row::new("a"), DocumentPosition::at(0));
        let b = right.register(Row::new("b"), DocumentPosition::at(0));
        assert_ne!(a, b);
        assert!(!left.contains(b));
    }

    #[test]
    fn test_adjacent_wraps_and_skips_disabled() {
        let mut reg = ItemRegistry::new();
        let a = reg.register(Row::new("a"), DocumentPosition::at(0));
        let b = reg.register(Row::new("b"), DocumentPosition::at(1));
        let c = reg.register(Row::new("c"), DocumentPosition::at(2));
        reg.set_disabled(b, true);

        assert_eq!(reg.adjacent(Some(a), Step::Next, true), Some(c));
        assert_eq!(reg.adjacent(Some(a), Step::Next, false), Some(b));
        assert_eq!(reg.adjacent(Some(c), Step::Next, true), Some(a));
        assert_eq!(reg.adjacent(Some(a), Step::Previous, true), Some(c));
        assert_eq!(reg.adjacent(None, Step::Next, true), Some(a));
        assert_eq!(reg.adjacent(None, Step::Previous, true), Some(c));
        // disabled entries keep their slot
        assert_eq!(reg.index_of(c), Some(2));
    }

    #[test]
    fn test_adjacent_all_disabled() {
        let mut reg = ItemRegistry::new();
        let a = reg.register(Row::new("a"), DocumentPosition::at(0));
        let b = reg.register(Row::new("b"), DocumentPosition::at(1));
        reg.set_disabled(a, true);
        reg.set_disabled(b, true);
        assert_eq!(reg.first_navigable(), None);
        assert_eq!(reg.last_navigable(), None);
        assert_eq!(reg.adjacent(Some(a), Step::Next, true), None);
    }

    #[test]
    fn test_empty_registry() {
        let reg: ItemRegistry<Row> = ItemRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.ordered().is_empty());
        assert_eq!(reg.adjacent(None, Step::Next, false), None);
    }

    #[test]
    fn test_get_mut_keeps_order() {
        let mut reg = ItemRegistry::new();
        let a = reg.register(Row::new("a"), DocumentPosition::at(0));
        reg.register(Row::new("b"), DocumentPosition::at(1));
        let _ = reg.ordered();
        if let Some(row) = reg.get_mut(a) {
            row.name = "z";
        }
        assert_eq!(names(&reg), vec!["z", "b"]);
        assert_eq!(reg.position(a), Some(&DocumentPosition::at(0)));
    }

    proptest! {
        #[test]
        fn prop_order_independent_of_registration(perm in Just((0u32..12).collect::<Vec<_>>()).prop_shuffle()) {
            let mut reg = ItemRegistry::new();
            for slot in &perm {
                reg.register(Row::new("x"), DocumentPosition::at(*slot));
            }
            let slots: Vec<u32> = reg
                .ordered()
                .iter()
                .map(|id| reg.position(*id).map_or(u32::MAX, |p| p.path()[0]))
                .collect();
            prop_assert_eq!(slots, (0u32..12).collect::<Vec<_>>());
            for (i, id) in reg.ordered().iter().enumerate() {
                prop_assert_eq!(reg.index_of(*id), Some(i));
            }
        }

        #[test]
        fn prop_indices_contiguous_after_removals(remove in proptest::collection::vec(any::<bool>(), 10)) {
            let mut reg = ItemRegistry::new();
            let ids: Vec<ItemId> = (0..10u32)
                .map(|i| reg.register(Row::new("x"), DocumentPosition::at(i)))
                .collect();
            for (id, gone) in ids.iter().zip(&remove) {
                if *gone {
                    reg.unregister(*id);
                }
            }
            let mut indices: Vec<usize> = ids.iter().filter_map(|id| reg.index_of(*id)).collect();
            indices.sort_unstable();
            prop_assert_eq!(indices, (0..reg.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_adjacent_never_lands_on_disabled(
            disabled in proptest::collection::vec(any::<bool>(), 1..12),
            start in 0usize..12,
            forward in any::<bool>(),
        ) {
            let mut reg = ItemRegistry::new();
            let ids: Vec<ItemId> = disabled
                .iter()
                .enumerate()
                .map(|(i, d)| reg.register(
                    Row { name: "x", disabled: *d },
                    DocumentPosition::at(i as u32),
                ))
                .collect();
            let current = ids.get(start).copied();
            let step = if forward { Step::Next } else { Step::Previous };
            match reg.adjacent(current, step, true) {
                Some(id) => prop_assert!(!reg.get(id).map_or(true, |r| r.disabled)),
                None => prop_assert!(disabled.iter().all(|d| *d)),
            }
        }
    }
}
