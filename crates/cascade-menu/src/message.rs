//! Messages reported to the host.

use crate::focus::FocusTarget;
use cascade_core::{ItemId, NodeId};
use serde::{Deserialize, Serialize};

/// Outcome of an interaction, returned from every call that can transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuMessage {
    /// A menu level opened or closed
    OpenChanged {
        /// Menu level
        node: NodeId,
        /// New state
        open: bool,
    },
    /// An action item was activated
    ItemSelected {
        /// Item
        item: ItemId,
        /// Action ID
        action: String,
    },
    /// A checkbox item was toggled
    CheckboxToggled {
        /// Item
        item: ItemId,
        /// Action ID
        action: String,
        /// New state
        checked: bool,
    },
    /// A radio item was selected
    RadioChanged {
        /// Item
        item: ItemId,
        /// Group name
        group: String,
        /// Selected value
        value: String,
    },
    /// Focus moved; the host blurs `from` and focuses `to`
    FocusMoved {
        /// Previous target
        from: Option<FocusTarget>,
        /// New target
        to: Option<FocusTarget>,
    },
}

impl MenuMessage {
    /// Whether this message closes the given node.
    #[must_use]
    pub fn is_close_of(&self, node: NodeId) -> bool {
        matches!(self, Self::OpenChanged { node: n, open: false } if *n == node)
    }

    /// Whether this message opens the given node.
    #[must_use]
    pub fn is_open_of(&self, node: NodeId) -> bool {
        matches!(self, Self::OpenChanged { node: n, open: true } if *n == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_predicates() {
        let open = MenuMessage::OpenChanged {
            node: NodeId::new(1),
            open: true,
        };
        assert!(open.is_open_of(NodeId::new(1)));
        assert!(!open.is_close_of(NodeId::new(1)));
        assert!(!open.is_open_of(NodeId::new(2)));
    }

    #[test]
    fn test_serialize_selected() {
        let msg = MenuMessage::ItemSelected {
            item: ItemId::new(3),
            action: "new-tab".to_string(),
        };
        let json = serde_json::to_string(&msg).expect("serialize");
        assert!(json.contains("new-tab"));
        let back: MenuMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, msg);
    }
}
