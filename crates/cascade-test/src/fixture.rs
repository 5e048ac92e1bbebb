//! Menu fixtures shared by the behavioural suites.

use cascade_core::{Direction, Rect};
use cascade_menu::{ContextMenu, DropdownMenu, MenuDefinition};

/// Label of the dropdown trigger button.
pub const TRIGGER_LABEL: &str = "Open";

/// Collision boundary used by the submenu scenarios.
pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 550.0, 660.0);

/// Trigger at the leading edge in left-to-right layouts.
pub const LTR_TRIGGER: Rect = Rect::new(10.0, 10.0, 80.0, 32.0);

/// Trigger at the leading edge in right-to-left layouts.
pub const RTL_TRIGGER: Rect = Rect::new(460.0, 10.0, 80.0, 32.0);

/// A file-menu style tree two submenu levels deep, with disabled entries at
/// both the item and the trigger level.
pub const SUBMENUS: &str = r"
items:
  - { type: action, label: New Tab, action: new-tab }
  - { type: action, label: New Window, action: new-window }
  - { type: separator }
  - type: submenu
    label: Bookmarks →
    items:
      - { type: action, label: Inbox, action: inbox }
      - { type: action, label: Calendar, action: calendar }
      - { type: separator }
      - type: submenu
        label: Modulz →
        items:
          - { type: action, label: Stitches, action: stitches }
          - { type: action, label: Radix, action: radix }
      - { type: action, label: Notion, action: notion }
  - type: submenu
    label: Tools →
    items:
      - { type: action, label: Save Page As…, action: save-page }
      - { type: action, label: Create Shortcut…, action: create-shortcut }
      - { type: action, label: Name Window…, action: name-window }
      - { type: separator }
      - { type: action, label: Developer Tools, action: developer-tools }
  - type: submenu
    label: History →
    disabled: true
    items:
      - { type: action, label: Github, action: github }
      - { type: action, label: Google, action: google }
  - { type: separator }
  - { type: action, label: Print…, action: print, disabled: true }
";

/// The submenus definition.
pub fn submenus() -> MenuDefinition {
    MenuDefinition::from_yaml(SUBMENUS).expect("fixture definition is valid")
}

/// A closed dropdown over [`SUBMENUS`], with the trigger at the leading
/// edge for `direction`.
pub fn submenus_dropdown(direction: Direction) -> DropdownMenu {
    let mut definition = submenus();
    definition.config = definition.config.with_direction(direction);
    let trigger = if direction.is_rtl() {
        RTL_TRIGGER
    } else {
        LTR_TRIGGER
    };
    DropdownMenu::from_definition(&definition)
        .expect("fixture tree is valid")
        .with_viewport(VIEWPORT)
        .with_trigger_rect(trigger)
}

/// A closed context menu over [`SUBMENUS`] covering the whole viewport.
pub fn submenus_context_menu(direction: Direction) -> ContextMenu {
    let mut definition = submenus();
    definition.config = definition.config.with_direction(direction);
    ContextMenu::from_definition(&definition, VIEWPORT)
        .expect("fixture tree is valid")
        .with_viewport(VIEWPORT)
}
