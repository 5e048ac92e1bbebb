//! Typeahead search across the items of the active menu level.

use cascade_core::{ItemId, NodeId, Timestamp};

/// Accumulates typed characters and finds the next matching item.
#[derive(Debug, Clone)]
pub struct Typeahead {
    buffer: String,
    last_keystroke: Option<Timestamp>,
    scope: Option<NodeId>,
    timeout_ms: u64,
}

impl Typeahead {
    /// Create a matcher whose buffer clears after `timeout_ms` idle.
    #[must_use]
    pub const fn new(timeout_ms: u64) -> Self {
        Self {
            buffer: String::new(),
            last_keystroke: None,
            scope: None,
            timeout_ms,
        }
    }

    /// Current search text.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Menu level the current search belongs to.
    #[must_use]
    pub const fn scope(&self) -> Option<NodeId> {
        self.scope
    }

    /// Whether a search is in progress at `now`.
    ///
    /// While searching, Space is a search character instead of activation.
    #[must_use]
    pub fn is_searching(&self, now: Timestamp) -> bool {
        !self.buffer.is_empty() && !self.expired(now)
    }

    /// Clear the buffer.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_keystroke = None;
        self.scope = None;
    }

    /// Feed one character.
    ///
    /// `candidates` are the enabled items of `scope` in document order with
    /// their match text. Returns the item to focus, if focus should move.
    pub fn on_key_press(
        &mut self,
        ch: char,
        candidates: &[(ItemId, &str)],
        current: Option<ItemId>,
        scope: NodeId,
        now: Timestamp,
    ) -> Option<ItemId> {
        if self.scope != Some(scope) || self.expired(now) {
            self.buffer.clear();
        }
        self.scope = Some(scope);
        self.last_keystroke = Some(now);
        self.buffer.push(ch);
        next_match(candidates, &self.buffer, current)
    }

    fn expired(&self, now: Timestamp) -> bool {
        self.last_keystroke
            .map_or(true, |last| now.since(last) >= self.timeout_ms)
    }
}

/// Find the next item whose text starts with `search`.
///
/// The search starts at `current` and wraps. A search made of one repeated
/// character ("aaa") matches as that single character, and single-character
/// searches skip the current item so repeated presses cycle through items
/// sharing a first letter. A match equal to `current` yields `None`.
#[must_use]
pub fn next_match(candidates: &[(ItemId, &str)], search: &str, current: Option<ItemId>) -> Option<ItemId> {
    let mut chars = search.chars();
    let first = chars.next()?;
    let repeated = chars.clone().next().is_some() && chars.all(|c| c == first);
    let normalized = if repeated {
        first.to_string()
    } else {
        search.to_string()
    };
    let needle = normalized.to_lowercase();
    let exclude_current = normalized.chars().count() == 1;

    let start = current
        .and_then(|id| candidates.iter().position(|(c, _)| *c == id))
        .unwrap_or(0);

    let found = candidates[start..]
        .iter()
        .chain(&candidates[..start])
        .filter(|(id, _)| !(exclude_current && Some(*id) == current))
        .find(|(_, text)| text.to_lowercase().starts_with(&needle))
        .map(|(id, _)| *id);

    match found {
        Some(id) if Some(id) == current => None,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROOT: NodeId = NodeId::new(0);

    fn items(labels: &[&'static str]) -> Vec<(ItemId, &'static str)> {
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| (ItemId::new(i as u64), *l))
            .collect()
    }

    #[test]
    fn test_prefix_match_case_insensitive() {
        let list = items(&["Inbox", "Calendar", "Notion"]);
        assert_eq!(next_match(&list, "cal", None), Some(ItemId::new(1)));
        assert_eq!(next_match(&list, "NOT", None), Some(ItemId::new(2)));
        assert_eq!(next_match(&list, "x", None), None);
        assert_eq!(next_match(&list, "", None), None);
    }

    #[test]
    fn test_single_char_cycles() {
        let list = items(&["Apple", "Banana", "Avocado"]);
        assert_eq!(next_match(&list, "a", Some(ItemId::new(0))), Some(ItemId::new(2)));
        assert_eq!(next_match(&list, "a", Some(ItemId::new(2))), Some(ItemId::new(0)));
    }

    #[test]
    fn test_repeated_char_acts_as_single() {
        let list = items(&["Apple", "Banana", "Avocado"]);
        assert_eq!(next_match(&list, "aa", Some(ItemId::new(0))), Some(ItemId::new(2)));
        assert_eq!(next_match(&list, "aaa", Some(ItemId::new(2))), Some(ItemId::new(0)));
    }

    #[test]
    fn test_match_equal_to_current_is_none() {
        let list = items(&["Inbox", "Calendar"]);
        assert_eq!(next_match(&list, "in", Some(ItemId::new(0))), None);
        // only candidate for a single char is the current item
        assert_eq!(next_match(&list, "i", Some(ItemId::new(0))), None);
    }

    #[test]
    fn test_accumulates_within_timeout() {
        let list = items(&["Calendar", "Cards", "Inbox"]);
        let mut ta = Typeahead::new(1000);
        let t = Timestamp::from_millis(0);
        assert_eq!(ta.on_key_press('c', &list, None, ROOT, t), Some(ItemId::new(0)));
        assert_eq!(
            ta.on_key_press('a', &list, Some(ItemId::new(0)), ROOT, t.after(100)),
            None
        );
        assert_eq!(
            ta.on_key_press('r', &list, Some(ItemId::new(0)), ROOT, t.after(200)),
            Some(ItemId::new(1))
        );
        assert_eq!(ta.buffer(), "car");
        assert!(ta.is_searching(t.after(500)));
    }

    #[test]
    fn test_resets_after_timeout() {
        let list = items(&["Calendar", "Inbox"]);
        let mut ta = Typeahead::new(1000);
        let t = Timestamp::from_millis(0);
        ta.on_key_press('c', &list, None, ROOT, t);
        assert!(!ta.is_searching(t.after(1000)));
        assert_eq!(
            ta.on_key_press('i', &list, Some(ItemId::new(0)), ROOT, t.after(1000)),
            Some(ItemId::new(1))
        );
        assert_eq!(ta.buffer(), "i");
    }

    #[test]
    fn test_resets_on_scope_switch() {
        let list = items(&["Stitches", "Radix"]);
        let mut ta = Typeahead::new(1000);
        let t = Timestamp::from_millis(0);
        ta.on_key_press('x', &list, None, ROOT, t);
        ta.on_key_press('r', &list, None, NodeId::new(2), t);
        assert_eq!(ta.buffer(), "r");
        assert_eq!(ta.scope(), Some(NodeId::new(2)));
    }

    #[test]
    fn test_space_is_search_character() {
        let list = items(&["New Tab", "New Window"]);
        let mut ta = Typeahead::new(1000);
        let t = Timestamp::from_millis(0);
        for ch in "new".chars() {
            ta.on_key_press(ch, &list, Some(ItemId::new(0)), ROOT, t);
        }
        assert!(ta.is_searching(t));
        ta.on_key_press(' ', &list, Some(ItemId::new(0)), ROOT, t);
        assert_eq!(
            ta.on_key_press('w', &list, Some(ItemId::new(0)), ROOT, t),
            Some(ItemId::new(1))
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ta = Typeahead::new(1000);
        ta.on_key_press('a', &[], None, ROOT, Timestamp::ZERO);
        ta.reset();
        assert_eq!(ta.buffer(), "");
        assert_eq!(ta.scope(), None);
        assert!(!ta.is_searching(Timestamp::ZERO));
    }

    proptest! {
        #[test]
        fn prop_match_is_a_candidate_with_prefix(
            labels in proptest::collection::vec("[a-c]{1,4}", 1..8),
            search in "[a-c]{1,3}",
            current in proptest::option::of(0usize..8),
        ) {
            let list: Vec<(ItemId, &str)> = labels
                .iter()
                .enumerate()
                .map(|(i, l)| (ItemId::new(i as u64), l.as_str()))
                .collect();
            let current = current.filter(|c| *c < list.len()).map(|c| ItemId::new(c as u64));
            if let Some(found) = next_match(&list, &search, current) {
                prop_assert!(Some(found) != current);
                let text = list.iter().find(|(id, _)| *id == found).map(|(_, t)| *t);
                prop_assert!(text.is_some());
            }
        }
    }
}
