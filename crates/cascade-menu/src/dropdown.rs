//! Dropdown menu: a root menu opened from a trigger button.

use crate::config::MenuConfig;
use crate::entry::{MenuDefinition, MenuEntry};
use crate::error::Result;
use crate::focus::FocusTarget;
use crate::message::MenuMessage;
use crate::node::CloseReason;
use crate::tree::{MenuTree, OpenFocus, RootAnchoring};
use cascade_core::{
    AccessibleNode, AccessibleRole, Event, ItemId, Key, MouseButton, Rect, Timestamp,
};
use tracing::debug;

/// A menu anchored below a trigger button.
///
/// The trigger toggles the menu on a primary press and opens it from the
/// keyboard (Enter, Space, Down focus the first item; Up the last). Every
/// other event goes to the [`MenuTree`].
#[derive(Debug, Clone)]
pub struct DropdownMenu {
    tree: MenuTree,
}

impl DropdownMenu {
    /// Create a closed dropdown.
    pub fn new(entries: &[MenuEntry], config: MenuConfig) -> Result<Self> {
        let mut tree = MenuTree::new(entries, config)?;
        tree.set_root_anchoring(RootAnchoring::Trigger);
        Ok(Self { tree })
    }

    /// Create a closed dropdown from a definition.
    pub fn from_definition(definition: &MenuDefinition) -> Result<Self> {
        Self::new(&definition.items, definition.config.clone())
    }

    /// Set the trigger rectangle.
    #[must_use]
    pub fn with_trigger_rect(mut self, rect: Rect) -> Self {
        self.tree.set_trigger_rect(rect);
        self
    }

    /// Set the collision boundary.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.tree.set_viewport(viewport);
        self
    }

    /// Underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Underlying tree, mutably.
    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.tree.is_root_open()
    }

    /// Open with the surface focused.
    pub fn open(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.tree.open(OpenFocus::Content, now)
    }

    /// Close and return focus to the trigger.
    pub fn close(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.tree.close(now)
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        if self.is_open() {
            self.tree.close_with(CloseReason::TriggerToggle, now)
        } else {
            self.open(now)
        }
    }

    /// Fire due timers.
    pub fn advance(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.tree.advance(now)
    }

    /// Move focus to an item of an open level.
    pub fn focus_item(&mut self, id: ItemId) -> Result<Vec<MenuMessage>> {
        self.tree.focus_item(id)
    }

    /// Move focus to the trigger button.
    pub fn focus_trigger(&mut self) -> Vec<MenuMessage> {
        self.tree.focus_trigger()
    }

    /// Process one input event.
    pub fn handle_event(&mut self, event: &Event, now: Timestamp) -> Vec<MenuMessage> {
        let mut messages = self.tree.advance(now);
        match *event {
            Event::PointerDown {
                position, button, ..
            } if self.tree.trigger_rect().hit(&position)
                && matches!(button, None | Some(MouseButton::Left)) =>
            {
                debug!("trigger pressed");
                messages.extend(self.toggle(now));
            }
            Event::KeyDown { key, .. }
                if self.tree.focus_target() == Some(FocusTarget::Trigger)
                    && self.trigger_key(key, now, &mut messages) => {}
            _ => messages.extend(self.tree.handle_event(event, now)),
        }
        messages
    }

    /// Keys pressed while the trigger has focus; `false` if not handled.
    fn trigger_key(&mut self, key: Key, now: Timestamp, messages: &mut Vec<MenuMessage>) -> bool {
        let focus = match key {
            Key::Enter | Key::Space if self.is_open() => {
                messages.extend(self.toggle(now));
                return true;
            }
            Key::Enter | Key::Space | Key::Down => OpenFocus::First,
            Key::Up => OpenFocus::Last,
            _ => return false,
        };
        debug!(?key, "opened from keyboard");
        messages.extend(self.tree.open(focus, now));
        true
    }

    /// Accessible description: the trigger button followed by the open
    /// surfaces.
    #[must_use]
    pub fn accessibility_snapshot(&self) -> Vec<AccessibleNode> {
        let mut trigger = AccessibleNode::trigger(
            AccessibleRole::Button,
            self.tree.trigger_rect(),
            self.is_open(),
        );
        trigger.focused = self.tree.focus_target() == Some(FocusTarget::Trigger);
        let mut out = vec![trigger];
        out.extend(self.tree.accessibility_snapshot());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ROOT;
    use cascade_core::{Direction, Point};

    fn dropdown() -> DropdownMenu {
        DropdownMenu::new(
            &[
                MenuEntry::action("Cut", "cut"),
                MenuEntry::action("Copy", "copy"),
                MenuEntry::action("Paste", "paste").disabled(true),
            ],
            MenuConfig::default(),
        )
        .expect("valid menu")
        .with_trigger_rect(Rect::new(10.0, 10.0, 80.0, 32.0))
        .with_viewport(Rect::new(0.0, 0.0, 550.0, 660.0))
    }

    const TRIGGER: Point = Point::new(50.0, 26.0);

    #[test]
    fn test_trigger_press_toggles() {
        let mut menu = dropdown();
        let msgs = menu.handle_event(&Event::mouse_down(TRIGGER, MouseButton::Left), Timestamp::ZERO);
        assert!(msgs.iter().any(|m| m.is_open_of(ROOT)));
        assert_eq!(menu.tree().focus_target(), Some(FocusTarget::Content(ROOT)));

        let msgs = menu.handle_event(
            &Event::mouse_down(TRIGGER, MouseButton::Left),
            Timestamp::from_millis(10),
        );
        assert!(msgs.iter().any(|m| m.is_close_of(ROOT)));
        assert_eq!(menu.tree().focus_target(), Some(FocusTarget::Trigger));
    }

    #[test]
    fn test_right_press_on_trigger_ignored() {
        let mut menu = dropdown();
        let msgs = menu.handle_event(&Event::mouse_down(TRIGGER, MouseButton::Right), Timestamp::ZERO);
        assert!(msgs.is_empty());
        assert!(!menu.is_open());
    }

    #[test]
    fn test_keyboard_open_focuses_first_or_last() {
        let mut menu = dropdown();
        menu.tree_mut().focus_trigger();
        menu.handle_event(&Event::key(Key::Down), Timestamp::ZERO);
        let cut = menu.tree().find_item("Cut");
        assert_eq!(menu.tree().focused_item(), cut);

        menu.close(Timestamp::ZERO);
        menu.handle_event(&Event::key(Key::Up), Timestamp::ZERO);
        // Paste is disabled
        assert_eq!(menu.tree().focused_item(), menu.tree().find_item("Copy"));
    }

    #[test]
    fn test_enter_on_trigger_while_open_closes() {
        let mut menu = dropdown();
        menu.open(Timestamp::ZERO);
        menu.tree_mut().focus_trigger();
        menu.handle_event(&Event::key(Key::Enter), Timestamp::ZERO);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_surface_below_trigger() {
        let mut menu = dropdown();
        menu.open(Timestamp::ZERO);
        let surface = menu.tree().surface_rect(ROOT).expect("open");
        assert_eq!(surface.origin(), Point::new(10.0, 47.0));
    }

    #[test]
    fn test_snapshot_starts_with_trigger() {
        let mut menu = dropdown();
        let closed = menu.accessibility_snapshot();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].role, AccessibleRole::Button);
        assert_eq!(closed[0].expanded, Some(false));

        menu.open(Timestamp::ZERO);
        let open = menu.accessibility_snapshot();
        assert_eq!(open[0].expanded, Some(true));
        assert_eq!(open[1].role, AccessibleRole::Menu);
        assert_eq!(open.len(), 5);
        assert!(open[4].disabled);
    }

    #[test]
    fn test_rtl_aligns_to_trigger_start() {
        let config = MenuConfig::default().with_direction(Direction::Rtl);
        let mut menu = DropdownMenu::new(&[MenuEntry::action("A", "a")], config)
            .expect("valid menu")
            .with_trigger_rect(Rect::new(460.0, 10.0, 80.0, 32.0))
            .with_viewport(Rect::new(0.0, 0.0, 550.0, 660.0));
        menu.open(Timestamp::ZERO);
        let surface = menu.tree().surface_rect(ROOT).expect("open");
        assert_eq!(surface.right(), 540.0);
    }
}
