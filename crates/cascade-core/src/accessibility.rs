//! Accessibility output for menu surfaces.
//!
//! Menus publish a flat list of [`AccessibleNode`]s describing every open
//! surface and its entries. An accessibility layer maps these onto platform
//! roles (ARIA `menu`, `menuitem`, `menuitemcheckbox`, ...).

use crate::geometry::Rect;
use crate::handle::{ItemId, NodeId};
use serde::{Deserialize, Serialize};

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button that opens a menu
    Button,
    /// Menu surface
    Menu,
    /// Plain menu item (actions and submenu triggers)
    MenuItem,
    /// Checkable menu item
    MenuItemCheckbox,
    /// Radio menu item
    MenuItemRadio,
    /// Visual separator
    Separator,
    /// Non-interactive group label
    Label,
}

/// Checked state for checkable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckedState {
    /// Not checked
    Unchecked,
    /// Checked
    Checked,
}

impl From<bool> for CheckedState {
    fn from(checked: bool) -> Self {
        if checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

/// Layout orientation announced for a menu surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Items stacked vertically
    #[default]
    Vertical,
    /// Items laid out horizontally
    Horizontal,
}

/// What an accessible node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessibleTarget {
    /// The element that opens the root menu
    Trigger,
    /// A menu surface
    Surface(NodeId),
    /// An entry within a surface
    Item(ItemId),
}

/// An accessible element describing part of an open menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessibleNode {
    /// What this node describes.
    pub target: AccessibleTarget,
    /// Owning surface for items, parent surface for surfaces.
    pub parent: Option<NodeId>,
    /// Accessible role.
    pub role: AccessibleRole,
    /// Accessible name (label).
    pub name: Option<String>,
    /// Bounding rectangle.
    pub bounds: Rect,
    /// Whether the element is currently focused.
    pub focused: bool,
    /// Whether the element is disabled.
    pub disabled: bool,
    /// Checked state (for checkbox and radio items).
    pub checked: Option<CheckedState>,
    /// Whether the element is expanded (for submenu triggers).
    pub expanded: Option<bool>,
    /// Whether activating the element opens a menu.
    pub has_popup: bool,
    /// Orientation (for surfaces).
    pub orientation: Option<Orientation>,
}

impl AccessibleNode {
    /// Create a node for a menu surface.
    #[must_use]
    pub const fn surface(node: NodeId, parent: Option<NodeId>, bounds: Rect) -> Self {
        Self {
            target: AccessibleTarget::Surface(node),
            parent,
            role: AccessibleRole::Menu,
            name: None,
            bounds,
            focused: false,
            disabled: false,
            checked: None,
            expanded: None,
            has_popup: false,
            orientation: Some(Orientation::Vertical),
        }
    }

    /// Create a node for the root trigger.
    #[must_use]
    pub const fn trigger(role: AccessibleRole, bounds: Rect, expanded: bool) -> Self {
        Self {
            target: AccessibleTarget::Trigger,
            parent: None,
            role,
            name: None,
            bounds,
            focused: false,
            disabled: false,
            checked: None,
            expanded: Some(expanded),
            has_popup: true,
            orientation: None,
        }
    }

    /// Create a node for a menu entry.
    #[must_use]
    pub fn item(item: ItemId, owner: NodeId, role: AccessibleRole, name: &str, bounds: Rect) -> Self {
        Self {
            target: AccessibleTarget::Item(item),
            parent: Some(owner),
            role,
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
            bounds,
            focused: false,
            disabled: false,
            checked: None,
            expanded: None,
            has_popup: false,
            orientation: None,
        }
    }

    /// Whether the element can receive focus.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        !self.disabled
            && matches!(
                self.role,
                AccessibleRole::MenuItem
                    | AccessibleRole::MenuItemCheckbox
                    | AccessibleRole::MenuItemRadio
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_from_bool() {
        assert_eq!(CheckedState::from(true), CheckedState::Checked);
        assert_eq!(CheckedState::from(false), CheckedState::Unchecked);
    }

    #[test]
    fn test_surface_node() {
        let node = AccessibleNode::surface(NodeId::new(1), Some(NodeId::new(0)), Rect::default());
        assert_eq!(node.role, AccessibleRole::Menu);
        assert_eq!(node.orientation, Some(Orientation::Vertical));
        assert_eq!(node.target, AccessibleTarget::Surface(NodeId::new(1)));
        assert!(!node.is_focusable());
    }

    #[test]
    fn test_trigger_node() {
        let node = AccessibleNode::trigger(AccessibleRole::Button, Rect::new(0.0, 0.0, 80.0, 32.0), true);
        assert_eq!(node.target, AccessibleTarget::Trigger);
        assert_eq!(node.expanded, Some(true));
        assert!(node.has_popup);
        assert!(node.parent.is_none());
    }

    #[test]
    fn test_item_node() {
        let node = AccessibleNode::item(
            ItemId::new(4),
            NodeId::new(0),
            AccessibleRole::MenuItemCheckbox,
            "Show Grid",
            Rect::default(),
        );
        assert_eq!(node.name.as_deref(), Some("Show Grid"));
        assert_eq!(node.parent, Some(NodeId::new(0)));
        assert!(node.is_focusable());
    }

    #[test]
    fn test_disabled_and_separator_not_focusable() {
        let mut node = AccessibleNode::item(
            ItemId::new(1),
            NodeId::new(0),
            AccessibleRole::MenuItem,
            "Print",
            Rect::default(),
        );
        node.disabled = true;
        assert!(!node.is_focusable());

        let sep = AccessibleNode::item(
            ItemId::new(2),
            NodeId::new(0),
            AccessibleRole::Separator,
            "",
            Rect::default(),
        );
        assert!(sep.name.is_none());
        assert!(!sep.is_focusable());
    }
}
