//! Error types for cascade-menu.

use cascade_core::{ItemId, NodeId};
use thiserror::Error;

/// Errors raised while building or configuring a menu.
///
/// Interaction races (stale handles, orphaned timers, double opens) are
/// resolved in place and never reach this type.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Node handle does not belong to this tree.
    #[error("unknown menu node: {0}")]
    UnknownNode(NodeId),

    /// Item handle is not registered in this tree.
    #[error("unknown menu item: {0}")]
    UnknownItem(ItemId),

    /// A submenu was declared without any entries.
    #[error("submenu `{label}` has no items")]
    EmptySubmenu {
        /// Label of the offending submenu trigger.
        label: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// YAML parse failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parse failure.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl MenuError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_handles_display() {
        let err = MenuError::UnknownNode(NodeId::new(4));
        assert_eq!(err.to_string(), "unknown menu node: node#4");
        let err = MenuError::UnknownItem(ItemId::new(9));
        assert_eq!(err.to_string(), "unknown menu item: item#9");
    }

    #[test]
    fn test_empty_submenu_display() {
        let err = MenuError::EmptySubmenu {
            label: "History →".to_string(),
        };
        assert!(err.to_string().contains("History →"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = MenuError::invalid("metrics.item_height", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: metrics.item_height must be positive"
        );
    }

    #[test]
    fn test_yaml_error_from() {
        let yaml_err = serde_yaml_ng::from_str::<Vec<u32>>("{ not: [a list").unwrap_err();
        let err: MenuError = yaml_err.into();
        assert!(matches!(err, MenuError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML error"));
    }

    #[test]
    fn test_toml_error_from() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: MenuError = toml_err.into();
        assert!(matches!(err, MenuError::Toml(_)));
    }
}
