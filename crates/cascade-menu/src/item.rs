//! Registered menu items.

use crate::registry::CollectionItem;
use cascade_core::{AccessibleRole, CheckedState, NodeId};
use serde::{Deserialize, Serialize};

/// What an item does when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Plain action
    Action {
        /// Action ID reported on selection
        action: String,
    },
    /// Opens the given submenu
    SubmenuTrigger(NodeId),
    /// Checkable item
    Checkbox {
        /// Action ID
        action: String,
        /// Current state
        checked: bool,
    },
    /// Member of a radio group
    Radio {
        /// Group name (scoped to the owning menu level)
        group: String,
        /// Value reported when selected
        value: String,
        /// Whether this is the selected member
        checked: bool,
    },
    /// Separator line
    Separator,
    /// Group label
    Label,
}

/// One entry of a menu level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Visible label
    pub label: String,
    /// Text matched by typeahead instead of the label
    pub text_value: Option<String>,
    /// Keyboard shortcut hint
    pub shortcut: Option<String>,
    /// Whether the item is disabled
    pub disabled: bool,
    /// Item kind
    pub kind: ItemKind,
    /// Menu level that owns the item
    pub owner: NodeId,
}

impl MenuItem {
    /// Create an item.
    #[must_use]
    pub fn new(label: impl Into<String>, kind: ItemKind, owner: NodeId) -> Self {
        Self {
            label: label.into(),
            text_value: None,
            shortcut: None,
            disabled: false,
            kind,
            owner,
        }
    }

    /// Whether the item takes part in focus and hover (not a separator or label).
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        !matches!(self.kind, ItemKind::Separator | ItemKind::Label)
    }

    /// Submenu opened by this item.
    #[must_use]
    pub const fn submenu(&self) -> Option<NodeId> {
        match self.kind {
            ItemKind::SubmenuTrigger(node) => Some(node),
            _ => None,
        }
    }

    /// Text used for typeahead matching.
    #[must_use]
    pub fn typeahead_text(&self) -> &str {
        self.text_value.as_deref().unwrap_or(&self.label)
    }

    /// Checked state of checkbox and radio items.
    #[must_use]
    pub const fn checked(&self) -> Option<bool> {
        match self.kind {
            ItemKind::Checkbox { checked, .. } | ItemKind::Radio { checked, .. } => Some(checked),
            _ => None,
        }
    }

    /// Accessible role for this item.
    #[must_use]
    pub const fn role(&self) -> AccessibleRole {
        match self.kind {
            ItemKind::Action { .. } | ItemKind::SubmenuTrigger(_) => AccessibleRole::MenuItem,
            ItemKind::Checkbox { .. } => AccessibleRole::MenuItemCheckbox,
            ItemKind::Radio { .. } => AccessibleRole::MenuItemRadio,
            ItemKind::Separator => AccessibleRole::Separator,
            ItemKind::Label => AccessibleRole::Label,
        }
    }

    /// Checked state in accessibility terms.
    #[must_use]
    pub fn checked_state(&self) -> Option<CheckedState> {
        self.checked().map(CheckedState::from)
    }
}

impl CollectionItem for MenuItem {
    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_navigable(&self) -> bool {
        self.is_interactive() && !self.disabled
    }
}
