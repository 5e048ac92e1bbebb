//! Pointer handling: hover focus, delayed submenu opening, the grace region
//! between a trigger and its submenu, outside presses and activation.

use super::{GraceIntent, Hit, MenuTree, OpenFocus, ROOT};
use crate::focus::FocusTarget;
use crate::intent::{HorizontalSide, IntentVerdict, PointerIntentRegion};
use crate::item::MenuItem;
use crate::node::CloseReason;
use cascade_core::{ItemId, MouseButton, NodeId, Point, PointerType};
use tracing::{debug, trace};

impl MenuTree {
    pub(super) fn on_pointer_move(&mut self, pointer_type: PointerType, position: Point) {
        let direction = self.pointer.direction.update(position);
        if pointer_type.is_touch_or_pen() || !self.is_root_open() {
            return;
        }

        let hit = self.hit_test(&position);
        let hovered = match hit {
            Hit::Item { item, .. } if self.item(item).is_some_and(MenuItem::is_interactive) => {
                Some(item)
            }
            _ => None,
        };
        let previous = std::mem::replace(&mut self.pointer.hovered, hovered);
        let left = previous.filter(|p| hovered != Some(*p));
        if let Some(item) = left {
            self.leave_trigger(item);
        }

        if self.track_intent(&position, direction, hit) {
            return;
        }

        match (hit, hovered) {
            (Hit::Item { node, item }, Some(_)) => self.hover_item(node, item),
            _ => {
                if let Some(item) = left {
                    self.leave_item(item);
                }
            }
        }
    }

    pub(super) fn on_pointer_down(&mut self, position: Point) {
        if !self.is_root_open() {
            return;
        }
        if self.hit_test(&position) == Hit::Outside {
            debug!(x = position.x, y = position.y, "pointer down outside menu");
            self.close_node(ROOT, CloseReason::OutsidePointer);
        }
    }

    pub(super) fn on_pointer_up(&mut self, position: Point, button: Option<MouseButton>) {
        if !self.is_root_open() || button.is_some_and(|b| b != MouseButton::Left) {
            return;
        }
        let Hit::Item { item, .. } = self.hit_test(&position) else {
            return;
        };
        let Some(entry) = self.item(item) else {
            return;
        };
        if entry.disabled || !entry.is_interactive() {
            return;
        }
        match entry.submenu() {
            Some(sub) => {
                self.move_focus(FocusTarget::Item(item));
                self.open_node(sub, OpenFocus::Keep);
            }
            None => self.activate(item),
        }
    }

    /// Pointer arrived on an interactive item.
    fn hover_item(&mut self, node: NodeId, id: ItemId) {
        let Some(item) = self.item(id) else {
            return;
        };
        let disabled = item.disabled;
        let sub = item.submenu().filter(|_| !disabled);

        if disabled {
            self.move_focus(FocusTarget::Content(node));
        } else {
            self.move_focus(FocusTarget::Item(id));
        }
        self.cancel_pending_opens(sub);

        if let Some(sub) = sub {
            if self.is_open(sub) {
                return;
            }
            if self.reopen == Some(sub) {
                trace!(node = %sub, "reopening submenu");
                self.open_node(sub, OpenFocus::Keep);
            } else {
                self.schedule_open(sub);
            }
        }
    }

    /// Pointer left an item for padding, a separator, or outside.
    fn leave_item(&mut self, id: ItemId) {
        if self.ring.current() != Some(FocusTarget::Item(id)) {
            return;
        }
        if let Some(owner) = self.owner_of(id) {
            self.move_focus(FocusTarget::Content(owner));
        }
    }

    /// Pointer left an item; if it triggers an open submenu, start tracking
    /// whether the pointer is heading there.
    fn leave_trigger(&mut self, id: ItemId) {
        let Some(sub) = self.item(id).and_then(MenuItem::submenu) else {
            return;
        };
        if let Some(token) = self.nodes[sub.index()].open_timer.take() {
            trace!(node = %sub, "pending open cancelled");
            self.timers.cancel(token);
        }
        if !self.is_open(sub) {
            return;
        }
        let Some(placement) = self.nodes[sub.index()].placement else {
            return;
        };
        let (Some(trigger), Some(side)) = (self.item_rect(id), HorizontalSide::from_side(placement.side))
        else {
            return;
        };
        trace!(node = %sub, ?side, "tracking pointer intent");
        self.intent = Some(GraceIntent {
            node: sub,
            region: PointerIntentRegion::new(trigger, placement.rect, side, self.config.grace_padding),
        });
    }

    /// Returns `true` when the pointer is inside the grace region heading
    /// for the submenu; hover handling is suppressed meanwhile.
    fn track_intent(&mut self, position: &Point, direction: Option<HorizontalSide>, hit: Hit) -> bool {
        let Some(intent) = &self.intent else {
            return false;
        };
        let sub = intent.node;
        let over_content = match hit {
            Hit::Item { node, .. } | Hit::Content(node) => self.is_within(node, sub),
            Hit::Outside => false,
        };
        let over_trigger =
            matches!(hit, Hit::Item { item, .. } if self.nodes[sub.index()].trigger == Some(item));
        let verdict = intent
            .region
            .evaluate(position, direction, over_content, over_trigger);
        trace!(node = %sub, ?verdict, x = position.x, y = position.y, "pointer intent");

        match verdict {
            IntentVerdict::ReachedContent | IntentVerdict::ReturnedToTrigger => {
                self.intent = None;
                false
            }
            IntentVerdict::MovingToward => true,
            IntentVerdict::Away => {
                self.intent = None;
                self.close_node(sub, CloseReason::PointerAway);
                false
            }
        }
    }
}
