//! Menu configuration.
//!
//! Every field has a default, so a configuration file only needs to name
//! the values it changes:
//!
//! ```yaml
//! direction: rtl
//! open_delay_ms: 150
//! metrics:
//!   width: 240
//! ```

use crate::error::{MenuError, Result};
use crate::item::ItemKind;
use crate::positioning::Placement;
use cascade_core::Direction;
use serde::{Deserialize, Serialize};

/// Reference vertical layout of a menu surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Height of actionable rows (actions, checkboxes, radios, submenu triggers)
    pub item_height: f32,
    /// Height of a separator row
    pub separator_height: f32,
    /// Height of a group label row
    pub label_height: f32,
    /// Inner padding of the surface
    pub padding: f32,
    /// Surface width
    pub width: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            item_height: 32.0,
            separator_height: 9.0, // 1px line + 4px padding each side
            label_height: 24.0,
            padding: 5.0,
            width: 200.0,
        }
    }
}

impl LayoutMetrics {
    /// Row height for an entry kind.
    #[must_use]
    pub const fn row_height(&self, kind: &ItemKind) -> f32 {
        match kind {
            ItemKind::Separator => self.separator_height,
            ItemKind::Label => self.label_height,
            _ => self.item_height,
        }
    }
}

/// Interaction and layout settings shared by a menu tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Reading direction
    pub direction: Direction,
    /// Hover dwell before a submenu opens
    pub open_delay_ms: u64,
    /// Touch/pen press duration that opens a context menu
    pub long_press_ms: u64,
    /// Idle time after which the typeahead buffer clears
    pub typeahead_timeout_ms: u64,
    /// Vertical bleed of the pointer grace polygon
    pub grace_padding: f32,
    /// Block pointer interaction outside open surfaces
    pub modal: bool,
    /// Reference layout
    pub metrics: LayoutMetrics,
    /// Root placement for dropdown menus
    pub dropdown_placement: Placement,
    /// Root placement for context menus (direction-aware default when unset)
    pub context_placement: Option<Placement>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            open_delay_ms: 100,
            long_press_ms: 700,
            typeahead_timeout_ms: 1000,
            grace_padding: 5.0,
            modal: true,
            metrics: LayoutMetrics::default(),
            dropdown_placement: Placement::dropdown(),
            context_placement: None,
        }
    }
}

impl MenuConfig {
    /// Parse a configuration from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from TOML and validate it.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the reading direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let m = &self.metrics;
        for (field, value) in [
            ("metrics.item_height", m.item_height),
            ("metrics.width", m.width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MenuError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        for (field, value) in [
            ("metrics.separator_height", m.separator_height),
            ("metrics.label_height", m.label_height),
            ("metrics.padding", m.padding),
            ("grace_padding", self.grace_padding),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MenuError::invalid(
                    field,
                    format!("must not be negative, got {value}"),
                ));
            }
        }
        if m.padding * 2.0 >= m.width {
            return Err(MenuError::invalid(
                "metrics.padding",
                "leaves no room for items",
            ));
        }
        if self.typeahead_timeout_ms == 0 {
            return Err(MenuError::invalid("typeahead_timeout_ms", "must be non-zero"));
        }
        if self.long_press_ms == 0 {
            return Err(MenuError::invalid("long_press_ms", "must be non-zero"));
        }
        for (field, placement) in [
            ("dropdown_placement", Some(&self.dropdown_placement)),
            ("context_placement", self.context_placement.as_ref()),
        ] {
            if let Some(p) = placement {
                if !(p.collision_padding.is_finite() && p.collision_padding >= 0.0) {
                    return Err(MenuError::invalid(field, "collision_padding must not be negative"));
                }
            }
        }
        Ok(())
    }

    /// Root placement for context menus.
    #[must_use]
    pub fn context_placement(&self) -> Placement {
        self.context_placement
            .unwrap_or_else(|| Placement::context(self.direction))
    }

    /// Placement of submenus next to their trigger items.
    #[must_use]
    pub fn submenu_placement(&self) -> Placement {
        Placement::submenu(self.direction, self.metrics.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positioning::Side;

    #[test]
    fn test_defaults() {
        let config = MenuConfig::default();
        assert_eq!(config.direction, Direction::Ltr);
        assert_eq!(config.open_delay_ms, 100);
        assert_eq!(config.long_press_ms, 700);
        assert_eq!(config.typeahead_timeout_ms, 1000);
        assert_eq!(config.grace_padding, 5.0);
        assert!(config.modal);
        assert_eq!(config.metrics.item_height, 32.0);
        assert_eq!(config.metrics.separator_height, 9.0);
        assert_eq!(config.metrics.padding, 5.0);
        assert_eq!(config.metrics.width, 200.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_row_heights() {
        let m = LayoutMetrics::default();
        assert_eq!(
            m.row_height(&ItemKind::Action {
                action: "a".into()
            }),
            32.0
        );
        assert_eq!(m.row_height(&ItemKind::Separator), 9.0);
        assert_eq!(m.row_height(&ItemKind::Label), 24.0);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = MenuConfig::from_yaml(
            "direction: rtl\nopen_delay_ms: 150\nmetrics:\n  width: 240\n",
        )
        .expect("valid yaml");
        assert_eq!(config.direction, Direction::Rtl);
        assert_eq!(config.open_delay_ms, 150);
        assert_eq!(config.metrics.width, 240.0);
        assert_eq!(config.metrics.item_height, 32.0);
        assert_eq!(config.long_press_ms, 700);
    }

    #[test]
    fn test_from_toml() {
        let config = MenuConfig::from_toml(
            "typeahead_timeout_ms = 500\nmodal = false\n[metrics]\npadding = 4.0\n",
        )
        .expect("valid toml");
        assert_eq!(config.typeahead_timeout_ms, 500);
        assert!(!config.modal);
        assert_eq!(config.metrics.padding, 4.0);
        assert_eq!(config.submenu_placement().side_offset, 4.0);
        assert_eq!(config.submenu_placement().align_offset, -4.0);
    }

    #[test]
    fn test_from_yaml_rejects_negative_metrics() {
        let err = MenuConfig::from_yaml("metrics:\n  item_height: -1\n").unwrap_err();
        assert!(matches!(
            err,
            MenuError::InvalidConfig {
                field: "metrics.item_height",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MenuConfig::default();
        config.grace_padding = -2.0;
        assert!(config.validate().is_err());

        let mut config = MenuConfig::default();
        config.metrics.padding = 150.0;
        assert!(config.validate().is_err());

        let mut config = MenuConfig::default();
        config.typeahead_timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = MenuConfig::default();
        config.context_placement = Some(Placement::dropdown().with_collision_padding(-1.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let err = MenuConfig::from_yaml("open_delay_ms: [1, 2").unwrap_err();
        assert!(matches!(err, MenuError::Yaml(_)));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = MenuConfig::from_toml("open_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, MenuError::Toml(_)));
    }

    #[test]
    fn test_context_placement_follows_direction() {
        let ltr = MenuConfig::default();
        assert_eq!(ltr.context_placement().side, Side::Right);
        let rtl = MenuConfig::default().with_direction(Direction::Rtl);
        assert_eq!(rtl.context_placement().side, Side::Left);
        assert_eq!(rtl.submenu_placement().side, Side::Left);

        let mut fixed = MenuConfig::default().with_direction(Direction::Rtl);
        fixed.context_placement = Some(Placement::context(Direction::Ltr));
        assert_eq!(fixed.context_placement().side, Side::Right);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = MenuConfig::default().with_direction(Direction::Rtl);
        let yaml = config.to_yaml().expect("serialize");
        let back = MenuConfig::from_yaml(&yaml).expect("parse");
        assert_eq!(config, back);
    }
}
