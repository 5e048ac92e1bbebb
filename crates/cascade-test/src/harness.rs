//! Simulation harness for menu hosts.

use cascade_core::{Event, ItemId, Key, MouseButton, Point, PointerType, Rect, Timestamp};
use cascade_menu::{ContextMenu, DropdownMenu, FocusTarget, MenuMessage, MenuTree};
use tracing::trace;

/// Something that owns a [`MenuTree`] and routes input to it.
pub trait MenuHost {
    /// The menu tree.
    fn tree(&self) -> &MenuTree;

    /// The menu tree, mutably.
    fn tree_mut(&mut self) -> &mut MenuTree;

    /// Process one input event.
    fn handle_event(&mut self, event: &Event, now: Timestamp) -> Vec<MenuMessage>;

    /// Trigger button bounds, for hosts that have one.
    fn trigger_rect(&self) -> Option<Rect> {
        None
    }
}

impl MenuHost for DropdownMenu {
    fn tree(&self) -> &MenuTree {
        Self::tree(self)
    }

    fn tree_mut(&mut self) -> &mut MenuTree {
        Self::tree_mut(self)
    }

    fn handle_event(&mut self, event: &Event, now: Timestamp) -> Vec<MenuMessage> {
        Self::handle_event(self, event, now)
    }

    fn trigger_rect(&self) -> Option<Rect> {
        Some(self.tree().trigger_rect())
    }
}

impl MenuHost for ContextMenu {
    fn tree(&self) -> &MenuTree {
        Self::tree(self)
    }

    fn tree_mut(&mut self) -> &mut MenuTree {
        Self::tree_mut(self)
    }

    fn handle_event(&mut self, event: &Event, now: Timestamp) -> Vec<MenuMessage> {
        Self::handle_event(self, event, now)
    }
}

/// Drives a menu host by item label against a virtual clock.
///
/// Every message the host emits is kept in a log that tests can inspect
/// with [`Harness::messages`].
pub struct Harness<H: MenuHost> {
    host: H,
    now: Timestamp,
    pointer: Point,
    trigger_label: String,
    messages: Vec<MenuMessage>,
}

impl<H: MenuHost> Harness<H> {
    /// Create a harness at time zero with the pointer at the origin.
    pub fn new(host: H) -> Self {
        Self {
            host,
            now: Timestamp::ZERO,
            pointer: Point::new(0.0, 0.0),
            trigger_label: crate::fixture::TRIGGER_LABEL.to_string(),
            messages: Vec::new(),
        }
    }

    /// Set the label that refers to the trigger button.
    #[must_use]
    pub fn trigger_label(mut self, label: impl Into<String>) -> Self {
        self.trigger_label = label.into();
        self
    }

    /// The host under test.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host under test, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The host's tree.
    pub fn tree(&self) -> &MenuTree {
        self.host.tree()
    }

    /// Current virtual time.
    pub const fn now(&self) -> Timestamp {
        self.now
    }

    /// Last pointer position.
    pub const fn pointer(&self) -> Point {
        self.pointer
    }

    /// Every message emitted so far.
    pub fn messages(&self) -> &[MenuMessage] {
        &self.messages
    }

    /// Drain the message log.
    pub fn take_messages(&mut self) -> Vec<MenuMessage> {
        std::mem::take(&mut self.messages)
    }

    // === Lookup ===

    /// Item with the given label.
    ///
    /// # Panics
    ///
    /// Panics if no item has that label.
    pub fn item(&self, label: &str) -> ItemId {
        self.tree()
            .find_item(label)
            .unwrap_or_else(|| panic!("no item labelled '{label}'"))
    }

    /// Bounds of a visible item, or of the trigger.
    ///
    /// # Panics
    ///
    /// Panics if the label is not on screen.
    pub fn bounds(&self, label: &str) -> Rect {
        if label == self.trigger_label {
            if let Some(rect) = self.host.trigger_rect() {
                return rect;
            }
        }
        let id = self.item(label);
        self.tree()
            .item_rect(id)
            .unwrap_or_else(|| panic!("'{label}' is not visible"))
    }

    /// Whether an item is on screen.
    pub fn is_visible(&self, label: &str) -> bool {
        self.tree()
            .find_item(label)
            .is_some_and(|id| self.tree().is_item_visible(id))
    }

    /// Whether an item holds focus.
    pub fn is_focused(&self, label: &str) -> bool {
        let focused = self.tree().focused_item();
        focused.is_some() && focused == self.tree().find_item(label)
    }

    // === Time ===

    /// Advance the virtual clock, firing due timers.
    pub fn tick(&mut self, ms: u64) -> &mut Self {
        self.now = self.now.after(ms);
        let now = self.now;
        let msgs = self.host.tree_mut().advance(now);
        self.messages.extend(msgs);
        self
    }

    /// Advance past the submenu open delay.
    pub fn settle(&mut self) -> &mut Self {
        let delay = self.tree().config().open_delay_ms;
        self.tick(delay)
    }

    // === Event Simulation ===

    /// Deliver a raw event.
    pub fn send(&mut self, event: &Event) -> &mut Self {
        if let Some(position) = event.position() {
            self.pointer = position;
        }
        let now = self.now;
        let msgs = self.host.handle_event(event, now);
        self.messages.extend(msgs);
        self
    }

    /// Move the mouse to a point.
    pub fn move_to(&mut self, point: Point) -> &mut Self {
        trace!(x = point.x, y = point.y, "harness pointer move");
        self.send(&Event::pointer_move(point))
    }

    /// Give an item keyboard focus, or the trigger for the trigger label.
    ///
    /// # Panics
    ///
    /// Panics if the item is unknown.
    pub fn focus(&mut self, label: &str) -> &mut Self {
        let msgs = if label == self.trigger_label {
            self.host.tree_mut().focus_trigger()
        } else {
            let id = self.item(label);
            self.host
                .tree_mut()
                .focus_item(id)
                .unwrap_or_else(|e| panic!("cannot focus '{label}': {e}"))
        };
        self.messages.extend(msgs);
        self
    }

    /// Focus an item, hover its centre, then wait out the open delay.
    pub fn pointer_over(&mut self, label: &str) -> &mut Self {
        self.focus(label);
        let center = self.bounds(label).center();
        self.move_to(center).settle()
    }

    /// Hover the right edge of an item, then leave through its bottom-left
    /// corner.
    pub fn pointer_exit_right_to_left(&mut self, label: &str) -> &mut Self {
        self.focus(label);
        let rect = self.bounds(label);
        self.move_to(Point::new(rect.right() - 1.0, rect.center().y));
        self.move_to(rect.bottom_left())
    }

    /// Hover the left edge of an item, then leave through its bottom-right
    /// corner.
    pub fn pointer_exit_left_to_right(&mut self, label: &str) -> &mut Self {
        self.focus(label);
        let rect = self.bounds(label);
        self.move_to(Point::new(rect.left(), rect.center().y));
        self.move_to(rect.bottom_right())
    }

    /// Primary click at a point.
    pub fn click_at(&mut self, point: Point) -> &mut Self {
        self.move_to(point);
        self.send(&Event::mouse_down(point, MouseButton::Left));
        self.send(&Event::mouse_up(point, MouseButton::Left))
    }

    /// Primary click on the centre of an item or the trigger.
    pub fn click(&mut self, label: &str) -> &mut Self {
        let center = self.bounds(label).center();
        self.click_at(center)
    }

    /// Primary click at the far corner of the viewport.
    pub fn click_outside(&mut self) -> &mut Self {
        let viewport = self.tree().viewport();
        let corner = Point::new(viewport.right() - 1.0, viewport.bottom() - 1.0);
        self.click_at(corner)
    }

    /// Secondary click at a point.
    pub fn right_click_at(&mut self, point: Point) -> &mut Self {
        self.move_to(point);
        self.send(&Event::mouse_down(point, MouseButton::Right));
        self.send(&Event::mouse_up(point, MouseButton::Right))
    }

    /// Touch down at a point and hold for `ms`.
    pub fn long_press_at(&mut self, point: Point, ms: u64) -> &mut Self {
        self.send(&Event::PointerDown {
            pointer_type: PointerType::Touch,
            position: point,
            button: None,
        });
        self.tick(ms);
        self.send(&Event::PointerUp {
            pointer_type: PointerType::Touch,
            position: point,
            button: None,
        })
    }

    /// Press a key on whatever holds focus.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.send(&Event::key(key))
    }

    /// Focus an item, then press a key on it.
    pub fn key_on(&mut self, label: &str, key: Key) -> &mut Self {
        self.focus(label);
        self.press_key(key)
    }

    /// Type characters one key at a time.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.press_key(Key::from_char(c));
        }
        self
    }

    // === Assertions ===

    /// Assert that an item is on screen.
    ///
    /// # Panics
    ///
    /// Panics if the item is hidden.
    pub fn assert_visible(&self, label: &str) -> &Self {
        assert!(self.is_visible(label), "Expected '{label}' to be visible");
        self
    }

    /// Assert that an item is not on screen.
    ///
    /// # Panics
    ///
    /// Panics if the item is shown.
    pub fn assert_not_visible(&self, label: &str) -> &Self {
        assert!(!self.is_visible(label), "Expected '{label}' not to be visible");
        self
    }

    /// Assert that an item holds focus.
    ///
    /// # Panics
    ///
    /// Panics if focus is elsewhere.
    pub fn assert_focused(&self, label: &str) -> &Self {
        assert!(
            self.is_focused(label),
            "Expected '{label}' to be focused, focus is on {:?}",
            self.tree().focus_target()
        );
        self
    }

    /// Assert that an item does not hold focus.
    ///
    /// # Panics
    ///
    /// Panics if the item is focused.
    pub fn assert_not_focused(&self, label: &str) -> &Self {
        assert!(!self.is_focused(label), "Expected '{label}' not to be focused");
        self
    }

    /// Assert that the trigger holds focus.
    ///
    /// # Panics
    ///
    /// Panics if focus is elsewhere.
    pub fn assert_trigger_focused(&self) -> &Self {
        assert_eq!(self.tree().focus_target(), Some(FocusTarget::Trigger));
        self
    }

    /// Assert whether the root menu is open.
    ///
    /// # Panics
    ///
    /// Panics on mismatch.
    pub fn assert_open(&self, open: bool) -> &Self {
        assert_eq!(
            self.tree().is_root_open(),
            open,
            "Expected root menu open = {open}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use cascade_core::Direction;

    #[test]
    fn test_tick_advances_clock() {
        let mut h = Harness::new(fixture::submenus_dropdown(Direction::Ltr));
        h.tick(40).tick(60);
        assert_eq!(h.now(), Timestamp::from_millis(100));
    }

    #[test]
    fn test_click_trigger_opens() {
        let mut h = Harness::new(fixture::submenus_dropdown(Direction::Ltr));
        h.click(fixture::TRIGGER_LABEL);
        h.assert_open(true).assert_visible("New Tab");
        assert!(!h.messages().is_empty());
        assert_eq!(h.pointer(), fixture::LTR_TRIGGER.center());
    }

    #[test]
    fn test_focus_trigger_label() {
        let mut h = Harness::new(fixture::submenus_dropdown(Direction::Ltr));
        h.focus(fixture::TRIGGER_LABEL);
        h.assert_trigger_focused();
    }

    #[test]
    #[should_panic(expected = "no item labelled")]
    fn test_unknown_label_panics() {
        let h = Harness::new(fixture::submenus_dropdown(Direction::Ltr));
        let _ = h.item("Nope");
    }

    #[test]
    fn test_take_messages_drains_log() {
        let mut h = Harness::new(fixture::submenus_dropdown(Direction::Ltr));
        h.click(fixture::TRIGGER_LABEL);
        assert!(!h.take_messages().is_empty());
        assert!(h.messages().is_empty());
    }
}
