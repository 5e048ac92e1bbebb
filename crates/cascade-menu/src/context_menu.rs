//! Context menu: a root menu opened at the pointer inside a target area.

use crate::config::MenuConfig;
use crate::entry::{MenuDefinition, MenuEntry};
use crate::error::Result;
use crate::message::MenuMessage;
use crate::tree::{MenuTree, OpenFocus, RootAnchoring};
use cascade_core::{
    AccessibleNode, Event, ItemId, MouseButton, Point, PointerType, Rect, Timestamp,
};
use tracing::debug;

/// A menu opened by a secondary click, or a touch/pen long press, inside
/// its target area.
#[derive(Debug, Clone)]
pub struct ContextMenu {
    tree: MenuTree,
    area: Rect,
}

impl ContextMenu {
    /// Create a closed context menu for a target area.
    pub fn new(entries: &[MenuEntry], config: MenuConfig, area: Rect) -> Result<Self> {
        let mut tree = MenuTree::new(entries, config)?;
        tree.set_root_anchoring(RootAnchoring::Pointer);
        Ok(Self { tree, area })
    }

    /// Create a closed context menu from a definition.
    pub fn from_definition(definition: &MenuDefinition, area: Rect) -> Result<Self> {
        Self::new(&definition.items, definition.config.clone(), area)
    }

    /// Set the collision boundary.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.tree.set_viewport(viewport);
        self
    }

    /// Target area.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Move or resize the target area.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
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

    /// Open at a point, or move an open menu there.
    pub fn open_at(&mut self, point: Point, now: Timestamp) -> Vec<MenuMessage> {
        self.tree.cancel_long_press();
        self.tree.open_at(point, OpenFocus::Content, now)
    }

    /// Close the menu.
    pub fn close(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.tree.close(now)
    }

    /// Fire due timers, including a pending long press.
    pub fn advance(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.tree.advance(now)
    }

    /// Move focus to an item of an open level.
    pub fn focus_item(&mut self, id: ItemId) -> Result<Vec<MenuMessage>> {
        self.tree.focus_item(id)
    }

    /// Process one input event.
    pub fn handle_event(&mut self, event: &Event, now: Timestamp) -> Vec<MenuMessage> {
        let mut messages = self.tree.advance(now);
        match *event {
            Event::PointerDown {
                pointer_type: PointerType::Mouse,
                position,
                button: Some(MouseButton::Right),
            } if self.in_area(&position) => {
                debug!(x = position.x, y = position.y, "context menu requested");
                messages.extend(self.open_at(position, now));
            }
            Event::PointerDown {
                pointer_type,
                position,
                ..
            } if pointer_type.is_touch_or_pen() && self.in_area(&position) => {
                messages.extend(self.tree.handle_event(event, now));
                self.tree.start_long_press(position, now);
            }
            Event::PointerMove { pointer_type, .. }
            | Event::PointerUp { pointer_type, .. }
            | Event::PointerCancel { pointer_type }
                if pointer_type.is_touch_or_pen() =>
            {
                if self.tree.cancel_long_press() {
                    debug!("long press cancelled");
                }
                messages.extend(self.tree.handle_event(event, now));
            }
            _ => messages.extend(self.tree.handle_event(event, now)),
        }
        messages
    }

    /// Accessible description of the open surfaces.
    #[must_use]
    pub fn accessibility_snapshot(&self) -> Vec<AccessibleNode> {
        self.tree.accessibility_snapshot()
    }

    /// Inside the target area and not over an open surface.
    fn in_area(&self, point: &Point) -> bool {
        self.area.hit(point) && !self.tree.is_over_surface(point)
    }
}
