//! Declarative menu definitions.
//!
//! A menu is described as a list of [`MenuEntry`] values, built in code or
//! loaded from YAML:
//!
//! ```yaml
//! items:
//!   - { type: action, label: New Tab, action: new-tab }
//!   - { type: separator }
//!   - type: submenu
//!     label: Bookmarks →
//!     items:
//!       - { type: action, label: Inbox, action: inbox }
//! ```

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};

/// One entry of a menu definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEntry {
    /// Action item
    Action {
        /// Item label
        label: String,
        /// Unique action ID
        action: String,
        /// Whether item is disabled
        #[serde(default)]
        disabled: bool,
        /// Optional keyboard shortcut display
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shortcut: Option<String>,
        /// Typeahead text overriding the label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_value: Option<String>,
    },
    /// Checkable item
    Checkbox {
        /// Item label
        label: String,
        /// Action ID
        action: String,
        /// Whether checked
        #[serde(default)]
        checked: bool,
        /// Whether disabled
        #[serde(default)]
        disabled: bool,
        /// Typeahead text overriding the label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_value: Option<String>,
    },
    /// Radio item
    Radio {
        /// Item label
        label: String,
        /// Group name
        group: String,
        /// Value reported when selected
        value: String,
        /// Whether selected
        #[serde(default)]
        checked: bool,
        /// Whether disabled
        #[serde(default)]
        disabled: bool,
        /// Typeahead text overriding the label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_value: Option<String>,
    },
    /// Separator line
    Separator,
    /// Non-interactive group label
    Label {
        /// Label text
        label: String,
    },
    /// Structural wrapper; its entries take part in the parent's order
    Group {
        /// Wrapped entries
        items: Vec<MenuEntry>,
    },
    /// Submenu
    Submenu {
        /// Submenu label
        label: String,
        /// Child items
        items: Vec<MenuEntry>,
        /// Whether disabled
        #[serde(default)]
        disabled: bool,
        /// Typeahead text overriding the label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_value: Option<String>,
    },
}

impl MenuEntry {
    /// Create a new action item.
    #[must_use]
    pub fn action(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Action {
            label: label.into(),
            action: action.into(),
            disabled: false,
            shortcut: None,
            text_value: None,
        }
    }

    /// Create a new checkbox item.
    #[must_use]
    pub fn checkbox(label: impl Into<String>, action: impl Into<String>, checked: bool) -> Self {
        Self::Checkbox {
            label: label.into(),
            action: action.into(),
            checked,
            disabled: false,
            text_value: None,
        }
    }

    /// Create a new radio item.
    #[must_use]
    pub fn radio(
        label: impl Into<String>,
        group: impl Into<String>,
        value: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self::Radio {
            label: label.into(),
            group: group.into(),
            value: value.into(),
            checked,
            disabled: false,
            text_value: None,
        }
    }

    /// Create a separator.
    #[must_use]
    pub const fn separator() -> Self {
        Self::Separator
    }

    /// Create a group label.
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label {
            label: label.into(),
        }
    }

    /// Create a structural group.
    #[must_use]
    pub const fn group(items: Vec<Self>) -> Self {
        Self::Group { items }
    }

    /// Create a submenu.
    #[must_use]
    pub fn submenu(label: impl Into<String>, items: Vec<Self>) -> Self {
        Self::Submenu {
            label: label.into(),
            items,
            disabled: false,
            text_value: None,
        }
    }

    /// Set disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        match &mut self {
            Self::Action { disabled: d, .. }
            | Self::Checkbox { disabled: d, .. }
            | Self::Radio { disabled: d, .. }
            | Self::Submenu { disabled: d, .. } => *d = disabled,
            Self::Separator | Self::Label { .. } | Self::Group { .. } => {}
        }
        self
    }

    /// Set shortcut (for action items).
    #[must_use]
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        if let Self::Action { shortcut: s, .. } = &mut self {
            *s = Some(shortcut.into());
        }
        self
    }

    /// Set the typeahead text.
    #[must_use]
    pub fn text_value(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Action { text_value, .. }
            | Self::Checkbox { text_value, .. }
            | Self::Radio { text_value, .. }
            | Self::Submenu { text_value, .. } => *text_value = Some(text.into()),
            Self::Separator | Self::Label { .. } | Self::Group { .. } => {}
        }
        self
    }

    /// Visible label, if the entry has one.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        match self {
            Self::Action { label, .. }
            | Self::Checkbox { label, .. }
            | Self::Radio { label, .. }
            | Self::Label { label }
            | Self::Submenu { label, .. } => Some(label),
            Self::Separator | Self::Group { .. } => None,
        }
    }

    /// Check if this entry is selectable (interactive and not disabled).
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        match self {
            Self::Action { disabled, .. }
            | Self::Checkbox { disabled, .. }
            | Self::Radio { disabled, .. }
            | Self::Submenu { disabled, .. } => !*disabled,
            Self::Separator | Self::Label { .. } | Self::Group { .. } => false,
        }
    }
}

/// Check a list of entries: every submenu must have at least one entry.
pub fn validate_entries(entries: &[MenuEntry]) -> Result<()> {
    for entry in entries {
        match entry {
            MenuEntry::Submenu { label, items, .. } => {
                if items.is_empty() {
                    return Err(MenuError::EmptySubmenu {
                        label: label.clone(),
                    });
                }
                validate_entries(items)?;
            }
            MenuEntry::Group { items } => validate_entries(items)?,
            _ => {}
        }
    }
    Ok(())
}

/// A complete menu: configuration plus entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuDefinition {
    /// Configuration
    #[serde(default)]
    pub config: MenuConfig,
    /// Root entries
    pub items: Vec<MenuEntry>,
}

impl MenuDefinition {
    /// Create a definition with default configuration.
    #[must_use]
    pub fn new(items: Vec<MenuEntry>) -> Self {
        Self {
            config: MenuConfig::default(),
            items,
        }
    }

    /// Parse and validate a definition from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definition: Self = serde_yaml_ng::from_str(yaml)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Validate configuration and entries.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        validate_entries(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::Direction;

    #[test]
    fn test_action_builder() {
        let entry = MenuEntry::action("Cut", "edit.cut").shortcut("⌘X");
        match entry {
            MenuEntry::Action {
                label,
                action,
                disabled,
                shortcut,
                text_value,
            } => {
                assert_eq!(label, "Cut");
                assert_eq!(action, "edit.cut");
                assert!(!disabled);
                assert_eq!(shortcut.as_deref(), Some("⌘X"));
                assert!(text_value.is_none());
            }
            _ => panic!("Expected Action"),
        }
    }

    #[test]
    fn test_disabled_and_selectable() {
        assert!(MenuEntry::action("a", "a").is_selectable());
        assert!(!MenuEntry::action("a", "a").disabled(true).is_selectable());
        assert!(!MenuEntry::separator().is_selectable());
        assert!(!MenuEntry::label("Group").is_selectable());
        assert!(!MenuEntry::submenu("S", vec![MenuEntry::separator()])
            .disabled(true)
            .is_selectable());
        // no-ops on entries without the flag
        assert_eq!(MenuEntry::separator().disabled(true), MenuEntry::Separator);
    }

    #[test]
    fn test_text_value_and_label() {
        let entry = MenuEntry::checkbox("✓ Grid", "grid", false).text_value("Grid");
        assert!(matches!(
            &entry,
            MenuEntry::Checkbox { text_value: Some(t), .. } if t == "Grid"
        ));
        assert_eq!(entry.label_text(), Some("✓ Grid"));
        assert_eq!(MenuEntry::separator().label_text(), None);
    }

    #[test]
    fn test_validate_empty_submenu() {
        let entries = vec![MenuEntry::submenu(
            "Outer",
            vec![MenuEntry::submenu("Inner", vec![])],
        )];
        let err = validate_entries(&entries).unwrap_err();
        assert!(matches!(err, MenuError::EmptySubmenu { label } if label == "Inner"));
    }

    #[test]
    fn test_definition_from_yaml() {
        let yaml = r"
config:
  direction: rtl
items:
  - { type: action, label: New Tab, action: new-tab }
  - { type: separator }
  - type: group
    items:
      - { type: radio, label: Small, group: size, value: s, checked: true }
      - { type: radio, label: Large, group: size, value: l }
  - type: submenu
    label: Bookmarks →
    items:
      - { type: action, label: Inbox, action: inbox, disabled: true }
";
        let def = MenuDefinition::from_yaml(yaml).expect("valid definition");
        assert_eq!(def.config.direction, Direction::Rtl);
        assert_eq!(def.items.len(), 4);
        assert_eq!(def.items[0], MenuEntry::action("New Tab", "new-tab"));
        assert!(matches!(&def.items[2], MenuEntry::Group { items } if items.len() == 2));
        assert!(matches!(
            &def.items[3],
            MenuEntry::Submenu { items, .. } if !items[0].is_selectable()
        ));
    }

    #[test]
    fn test_definition_rejects_empty_submenu() {
        let yaml = "items:\n  - { type: submenu, label: Empty, items: [] }\n";
        assert!(matches!(
            MenuDefinition::from_yaml(yaml),
            Err(MenuError::EmptySubmenu { .. })
        ));
    }

    #[test]
    fn test_definition_rejects_unknown_type() {
        let yaml = "items:\n  - { type: slider, label: Volume }\n";
        assert!(matches!(MenuDefinition::from_yaml(yaml), Err(MenuError::Yaml(_))));
    }
}
