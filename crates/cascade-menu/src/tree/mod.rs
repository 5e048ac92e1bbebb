//! Menu tree: every level of one menu and the interaction state between them.
//!
//! The tree owns the levels ([`MenuNode`]s), the single focus target, the
//! typeahead matcher, the pointer-intent tracker and the timer queue. All
//! transitions run synchronously inside [`MenuTree::handle_event`],
//! [`MenuTree::advance`] and the focus and open/close calls; each returns
//! the [`MenuMessage`]s it produced.

mod build;
mod keyboard;
mod pointer;

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::focus::{FocusRing, FocusTarget};
use crate::intent::{PointerDirection, PointerIntentRegion};
use crate::item::MenuItem;
use crate::layout;
use crate::message::MenuMessage;
use crate::node::{CloseReason, MenuNode, NodeState};
use crate::positioning::{Anchor, Placement, Positioner};
use crate::timer::{Timer, TimerKind, TimerQueue, TimerToken};
use crate::typeahead::Typeahead;
use cascade_core::{
    AccessibleNode, Direction, Event, ItemId, NodeId, Point, Rect, Size, Timestamp,
};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Handle of the root level.
pub const ROOT: NodeId = NodeId::new(0);

/// What the root surface is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootAnchoring {
    /// The trigger rectangle (dropdown menus)
    #[default]
    Trigger,
    /// The pointer position the menu was opened at (context menus)
    Pointer,
}

/// Where focus goes when a level opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFocus {
    /// Leave focus where it is (pointer opens)
    Keep,
    /// Focus the surface with no item highlighted
    Content,
    /// Focus the first enabled item
    First,
    /// Focus the last enabled item
    Last,
}

/// Result of hit testing a point against the open surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Over an item row
    Item {
        /// Level owning the item
        node: NodeId,
        /// Item under the pointer
        item: ItemId,
    },
    /// Over a surface but not over an item row
    Content(NodeId),
    /// Not over any open surface
    Outside,
}

#[derive(Debug, Clone, Default)]
struct PointerState {
    direction: PointerDirection,
    hovered: Option<ItemId>,
}

#[derive(Debug, Clone)]
struct GraceIntent {
    node: NodeId,
    region: PointerIntentRegion,
}

/// All levels of one menu plus their shared interaction state.
#[derive(Debug, Clone)]
pub struct MenuTree {
    config: MenuConfig,
    nodes: Vec<MenuNode>,
    owners: HashMap<ItemId, NodeId>,
    ring: FocusRing,
    typeahead: Typeahead,
    typeahead_timer: Option<TimerToken>,
    long_press: Option<TimerToken>,
    timers: TimerQueue,
    pointer: PointerState,
    intent: Option<GraceIntent>,
    reopen: Option<NodeId>,
    viewport: Rect,
    trigger_rect: Rect,
    root_anchoring: RootAnchoring,
    now: Timestamp,
    outbox: Vec<MenuMessage>,
}

impl MenuTree {
    // =========================================================================
    // Accessors
    // =========================================================================

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Reading direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.config.direction
    }

    /// Last time seen from the host.
    #[must_use]
    pub const fn now(&self) -> Timestamp {
        self.now
    }

    /// Collision boundary for surfaces.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Rectangle of the element that opens the root menu.
    #[must_use]
    pub const fn trigger_rect(&self) -> Rect {
        self.trigger_rect
    }

    /// What the root surface is anchored to.
    #[must_use]
    pub const fn root_anchoring(&self) -> RootAnchoring {
        self.root_anchoring
    }

    /// A level of the tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.index()).filter(|node| !node.detached)
    }

    /// All attached levels, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &MenuNode> {
        self.nodes.iter().filter(|node| !node.detached)
    }

    /// An item of any level.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        let owner = self.owners.get(&id)?;
        self.nodes.get(owner.index())?.registry.get(id)
    }

    /// Level owning an item.
    #[must_use]
    pub fn owner_of(&self, id: ItemId) -> Option<NodeId> {
        self.owners.get(&id).copied()
    }

    /// First item with the given label, searching levels root first and
    /// each level in document order.
    #[must_use]
    pub fn find_item(&self, label: &str) -> Option<ItemId> {
        self.nodes().find_map(|node| {
            node.registry
                .iter()
                .find(|(id, item)| item.label == label && self.owners.contains_key(id))
                .map(|(id, _)| id)
        })
    }

    /// Whether a level is shown.
    #[must_use]
    pub fn is_open(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(MenuNode::is_open)
    }

    /// Whether the root menu is shown.
    #[must_use]
    pub fn is_root_open(&self) -> bool {
        self.is_open(ROOT)
    }

    /// Whether an item's level is shown.
    #[must_use]
    pub fn is_item_visible(&self, id: ItemId) -> bool {
        self.owner_of(id).is_some_and(|owner| self.is_open(owner))
    }

    /// Observable state of a level.
    #[must_use]
    pub fn node_state(&self, id: NodeId) -> Option<NodeState> {
        let node = self.node(id)?;
        Some(if !node.open {
            NodeState::Closed
        } else if self.intent.as_ref().is_some_and(|g| g.node == id) {
            NodeState::PendingClose
        } else {
            match node.focus.focused_index(&node.registry) {
                Some(index) => NodeState::OpenFocused(index),
                None => NodeState::OpenNoFocus,
            }
        })
    }

    /// Current focus target.
    #[must_use]
    pub const fn focus_target(&self) -> Option<FocusTarget> {
        self.ring.current()
    }

    /// Focused item, if focus is on an item.
    #[must_use]
    pub const fn focused_item(&self) -> Option<ItemId> {
        match self.ring.current() {
            Some(FocusTarget::Item(id)) => Some(id),
            _ => None,
        }
    }

    /// Item under the pointer.
    #[must_use]
    pub const fn hovered_item(&self) -> Option<ItemId> {
        self.pointer.hovered
    }

    /// Level whose keyboard handling is active: the owner of the focus target.
    #[must_use]
    pub fn active_node(&self) -> Option<NodeId> {
        match self.ring.current()? {
            FocusTarget::Content(node) => Some(node),
            FocusTarget::Item(item) => self.owner_of(item),
            FocusTarget::Trigger => None,
        }
    }

    /// Open levels from the root down to the deepest open submenu.
    #[must_use]
    pub fn open_chain(&self) -> Vec<NodeId> {
        let mut chain = Vec::new();
        if !self.is_root_open() {
            return chain;
        }
        let mut current = ROOT;
        loop {
            chain.push(current);
            let next = self.nodes[current.index()]
                .children
                .iter()
                .copied()
                .find(|child| self.is_open(*child));
            match next {
                Some(child) => current = child,
                None => break,
            }
        }
        chain
    }

    /// Surface rectangle of an open level.
    #[must_use]
    pub fn surface_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        if !node.open {
            return None;
        }
        node.placement.map(|p| p.rect)
    }

    /// Row rectangle of an item whose level is open.
    #[must_use]
    pub fn item_rect(&self, id: ItemId) -> Option<Rect> {
        let owner = self.owner_of(id)?;
        self.frames(owner)
            .into_iter()
            .find(|(item, _)| *item == id)
            .map(|(_, rect)| rect)
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    /// Whether a touch/pen long press is waiting to fire.
    #[must_use]
    pub fn long_press_pending(&self) -> bool {
        self.long_press.is_some_and(|t| self.timers.is_pending(t))
    }

    // =========================================================================
    // Geometry input
    // =========================================================================

    /// Set the collision boundary and re-place open surfaces.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.reposition_open();
    }

    /// Set the trigger rectangle and re-place open surfaces.
    pub fn set_trigger_rect(&mut self, rect: Rect) {
        self.trigger_rect = rect;
        self.reposition_open();
    }

    /// Set what the root surface is anchored to.
    pub fn set_root_anchoring(&mut self, anchoring: RootAnchoring) {
        self.root_anchoring = anchoring;
    }

    /// Change the reading direction and re-place open surfaces.
    pub fn set_direction(&mut self, direction: Direction) {
        self.config.direction = direction;
        self.reposition_open();
    }

    /// Override the measured size of a level's surface.
    pub fn set_content_size(&mut self, id: NodeId, size: Option<Size>) -> Result<()> {
        self.nodes
            .get_mut(id.index())
            .ok_or(MenuError::UnknownNode(id))?
            .content_size = size;
        self.reposition_open();
        Ok(())
    }

    /// Override an item's row frame, relative to its surface origin.
    pub fn set_item_frame(&mut self, id: ItemId, frame: Option<Rect>) -> Result<()> {
        let owner = self.owner_of(id).ok_or(MenuError::UnknownItem(id))?;
        let frames = &mut self.nodes[owner.index()].item_frames;
        match frame {
            Some(frame) => frames.insert(id, frame),
            None => frames.remove(&id),
        };
        self.reposition_open();
        Ok(())
    }

    // =========================================================================
    // Host operations
    // =========================================================================

    /// Process one input event at `now`. Due timers fire first.
    pub fn handle_event(&mut self, event: &Event, now: Timestamp) -> Vec<MenuMessage> {
        self.run_timers(now);
        match *event {
            Event::PointerMove {
                pointer_type,
                position,
            } => self.on_pointer_move(pointer_type, position),
            Event::PointerDown { position, .. } => self.on_pointer_down(position),
            Event::PointerUp {
                position, button, ..
            } => self.on_pointer_up(position, button),
            Event::PointerCancel { .. } => {}
            Event::KeyDown { key, modifiers } => self.on_key(key, modifiers),
        }
        self.take_messages()
    }

    /// Fire every timer due at `now`.
    pub fn advance(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.run_timers(now);
        self.take_messages()
    }

    /// Open the root menu anchored per [`RootAnchoring`].
    pub fn open(&mut self, focus: OpenFocus, now: Timestamp) -> Vec<MenuMessage> {
        self.run_timers(now);
        self.open_node(ROOT, focus);
        self.take_messages()
    }

    /// Open the root menu at a pointer position; re-anchors if already open.
    pub fn open_at(&mut self, point: Point, focus: OpenFocus, now: Timestamp) -> Vec<MenuMessage> {
        self.run_timers(now);
        self.open_root_at(point, focus);
        self.take_messages()
    }

    /// Close the whole menu; focus returns to the trigger.
    pub fn close(&mut self, now: Timestamp) -> Vec<MenuMessage> {
        self.run_timers(now);
        self.close_node(ROOT, CloseReason::Host);
        self.take_messages()
    }

    /// Close the whole menu with a specific reason.
    pub(crate) fn close_with(&mut self, reason: CloseReason, now: Timestamp) -> Vec<MenuMessage> {
        self.run_timers(now);
        self.close_node(ROOT, reason);
        self.take_messages()
    }

    /// Move focus to an item. Unknown items are an error; items that cannot
    /// take focus (disabled, separators, closed levels) are ignored.
    pub fn focus_item(&mut self, id: ItemId) -> Result<Vec<MenuMessage>> {
        let owner = self.owner_of(id).ok_or(MenuError::UnknownItem(id))?;
        let focusable = self.is_open(owner)
            && self.item(id).is_some_and(|item| item.is_interactive() && !item.disabled);
        if focusable {
            self.move_focus(FocusTarget::Item(id));
        }
        Ok(self.take_messages())
    }

    /// Move focus to the trigger.
    pub fn focus_trigger(&mut self) -> Vec<MenuMessage> {
        self.set_focus(Some(FocusTarget::Trigger));
        self.take_messages()
    }

    /// Start a long-press timer that opens the root at `position`.
    pub fn start_long_press(&mut self, position: Point, now: Timestamp) {
        self.run_timers(now);
        self.cancel_long_press();
        let token = self.timers.schedule(
            self.now.after(self.config.long_press_ms),
            TimerKind::LongPress(position),
            ROOT,
            self.nodes[ROOT.index()].generation,
        );
        trace!(x = position.x, y = position.y, "long press started");
        self.long_press = Some(token);
    }

    /// Cancel a pending long press; `true` if one was pending.
    pub fn cancel_long_press(&mut self) -> bool {
        self.long_press
            .take()
            .is_some_and(|token| self.timers.cancel(token))
    }

    /// Whether a pointer event at `point` is blocked by the open modal menu.
    #[must_use]
    pub fn blocks_pointer_at(&self, point: &Point) -> bool {
        self.config.modal && self.is_root_open() && self.hit_test(point) == Hit::Outside
    }

    /// Whether `point` is over any open surface.
    #[must_use]
    pub fn is_over_surface(&self, point: &Point) -> bool {
        self.hit_test(point) != Hit::Outside
    }

    /// Hit test the open surfaces, deepest first.
    #[must_use]
    pub fn hit_test(&self, point: &Point) -> Hit {
        for id in self.open_chain().into_iter().rev() {
            let Some(surface) = self.surface_rect(id) else {
                continue;
            };
            if !surface.hit(point) {
                continue;
            }
            return match layout::item_at(&self.frames(id), point) {
                Some(item) => Hit::Item { node: id, item },
                None => Hit::Content(id),
            };
        }
        Hit::Outside
    }

    /// Accessible description of the open surfaces and their items.
    #[must_use]
    pub fn accessibility_snapshot(&self) -> Vec<AccessibleNode> {
        let focus = self.ring.current();
        let mut out = Vec::new();
        for id in self.open_chain() {
            let node = &self.nodes[id.index()];
            let Some(surface) = self.surface_rect(id) else {
                continue;
            };
            let mut menu = AccessibleNode::surface(id, node.parent, surface);
            menu.focused = focus == Some(FocusTarget::Content(id));
            menu.name = node
                .trigger
                .and_then(|t| self.item(t))
                .map(|t| t.label.clone());
            out.push(menu);

            for (item_id, frame) in self.frames(id) {
                let Some(item) = node.registry.get(item_id) else {
                    continue;
                };
                let mut a11y = AccessibleNode::item(item_id, id, item.role(), &item.label, frame);
                a11y.focused = focus == Some(FocusTarget::Item(item_id));
                a11y.disabled = item.disabled;
                a11y.checked = item.checked_state();
                if let Some(sub) = item.submenu() {
                    a11y.has_popup = true;
                    a11y.expanded = Some(self.is_open(sub));
                }
                out.push(a11y);
            }
        }
        out
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn take_messages(&mut self) -> Vec<MenuMessage> {
        std::mem::take(&mut self.outbox)
    }

    fn emit(&mut self, message: MenuMessage) {
        self.outbox.push(message);
    }

    fn run_timers(&mut self, now: Timestamp) {
        while let Some(timer) = self.timers.pop_due(now) {
            self.now = self.now.max(timer.deadline);
            self.fire(timer);
        }
        self.now = self.now.max(now);
    }

    fn fire(&mut self, timer: Timer) {
        let live = self
            .node(timer.owner)
            .is_some_and(|owner| owner.generation == timer.generation);
        if !live {
            trace!(owner = %timer.owner, kind = ?timer.kind, "orphaned timer ignored");
            return;
        }
        match timer.kind {
            TimerKind::OpenSubmenu(sub) => {
                if let Some(node) = self.nodes.get_mut(sub.index()) {
                    if node.open_timer == Some(timer.token) {
                        node.open_timer = None;
                    }
                }
                let trigger_enabled = self
                    .node(sub)
                    .and_then(MenuNode::trigger)
                    .and_then(|t| self.item(t))
                    .is_some_and(|t| !t.disabled);
                if self.is_open(timer.owner) && trigger_enabled {
                    trace!(node = %sub, "open delay elapsed");
                    self.open_node(sub, OpenFocus::Keep);
                }
            }
            TimerKind::LongPress(position) => {
                if self.long_press == Some(timer.token) {
                    self.long_press = None;
                }
                trace!(x = position.x, y = position.y, "long press fired");
                self.open_root_at(position, OpenFocus::Content);
            }
            TimerKind::TypeaheadReset => {
                if self.typeahead_timer == Some(timer.token) {
                    self.typeahead_timer = None;
                    self.typeahead.reset();
                }
            }
        }
    }

    fn open_root_at(&mut self, point: Point, focus: OpenFocus) {
        let root = &mut self.nodes[ROOT.index()];
        root.anchor_point = Some(point);
        if root.open {
            let children: Vec<NodeId> = root.children.clone();
            for child in children {
                self.close_node(child, CloseReason::Host);
            }
            self.place(ROOT);
            debug!(x = point.x, y = point.y, "menu re-anchored");
            self.apply_open_focus(ROOT, focus);
        } else {
            self.open_node(ROOT, focus);
        }
    }

    /// Open a level. Opening an open level only applies `focus`.
    pub(crate) fn open_node(&mut self, id: NodeId, focus: OpenFocus) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.open {
            self.apply_open_focus(id, focus);
            return;
        }
        if let Some(parent) = node.parent {
            if !self.is_open(parent) {
                return;
            }
            let siblings: Vec<NodeId> = self.nodes[parent.index()]
                .children
                .iter()
                .copied()
                .filter(|c| *c != id && self.is_open(*c))
                .collect();
            for sibling in siblings {
                self.close_node(sibling, CloseReason::SiblingFocus);
            }
        }

        let node = &mut self.nodes[id.index()];
        if let Some(token) = node.open_timer.take() {
            self.timers.cancel(token);
        }
        node.open = true;
        self.place(id);
        self.reopen = None;
        debug!(node = %id, ?focus, "menu opened");
        self.emit(MenuMessage::OpenChanged { node: id, open: true });
        self.apply_open_focus(id, focus);
    }

    fn apply_open_focus(&mut self, id: NodeId, focus: OpenFocus) {
        let registry = &self.nodes[id.index()].registry;
        let target = match focus {
            OpenFocus::Keep => return,
            OpenFocus::Content => None,
            OpenFocus::First => registry.first_navigable(),
            OpenFocus::Last => registry.last_navigable(),
        };
        self.move_focus(target.map_or(FocusTarget::Content(id), FocusTarget::Item));
    }

    /// Close a level and everything open beneath it.
    ///
    /// Focus inside the closed branch falls back to the branch's trigger.
    pub(crate) fn close_node(&mut self, id: NodeId, reason: CloseReason) {
        if !self.is_open(id) {
            return;
        }
        let focus_inside = self
            .ring
            .current()
            .is_some_and(|target| self.target_within(target, id));
        self.close_branch(id, reason);

        if focus_inside {
            let fallback = match (self.nodes[id.index()].trigger, reason) {
                (Some(trigger), _) => Some(FocusTarget::Item(trigger)),
                (None, CloseReason::OutsidePointer) => None,
                (None, _) => Some(FocusTarget::Trigger),
            };
            self.set_focus(fallback);
        }
    }

    fn close_branch(&mut self, id: NodeId, reason: CloseReason) {
        let children: Vec<NodeId> = self.nodes[id.index()].children.clone();
        for child in &children {
            if self.is_open(*child) {
                self.close_branch(*child, reason);
            }
        }
        for child in &children {
            if let Some(token) = self.nodes[child.index()].open_timer.take() {
                self.timers.cancel(token);
            }
        }
        self.timers
            .cancel_where(|t| t.owner == id && !matches!(t.kind, TimerKind::LongPress(_)));

        let node = &mut self.nodes[id.index()];
        let is_root = node.parent.is_none();
        node.reset();

        if self.intent.as_ref().is_some_and(|g| g.node == id) {
            self.intent = None;
        }
        if self.typeahead.scope() == Some(id) {
            self.typeahead.reset();
        }
        if is_root {
            self.reopen = None;
            self.pointer.hovered = None;
        } else if matches!(reason, CloseReason::SiblingFocus | CloseReason::PointerAway) {
            self.reopen = Some(id);
        }
        debug!(node = %id, ?reason, "menu closed");
        self.emit(MenuMessage::OpenChanged {
            node: id,
            open: false,
        });
    }

    /// Move focus and close any open submenu the new target is outside of.
    ///
    /// A submenu stays open while focus is inside it or on its own trigger.
    pub(crate) fn move_focus(&mut self, target: FocusTarget) {
        self.set_focus(Some(target));
        for id in self.open_chain().into_iter().skip(1) {
            let on_trigger = self.nodes[id.index()].trigger.map(FocusTarget::Item) == Some(target);
            if !on_trigger && !self.target_within(target, id) {
                self.close_node(id, CloseReason::SiblingFocus);
                break;
            }
        }
    }

    fn set_focus(&mut self, target: Option<FocusTarget>) {
        let Some(change) = self.ring.move_to(target) else {
            return;
        };
        if let Some(FocusTarget::Item(blurred)) = change.blurred {
            if let Some(owner) = self.owner_of(blurred) {
                self.nodes[owner.index()].focus.focus_none();
            }
        }
        match target {
            Some(FocusTarget::Item(item)) => {
                if let Some(owner) = self.owner_of(item) {
                    let node = &mut self.nodes[owner.index()];
                    node.focus.focus_item(&node.registry, item);
                }
            }
            Some(FocusTarget::Content(id)) => {
                if let Some(node) = self.nodes.get_mut(id.index()) {
                    node.focus.focus_none();
                }
            }
            Some(FocusTarget::Trigger) | None => {}
        }
        debug!(from = ?change.blurred, to = ?change.focused, "focus moved");
        self.emit(MenuMessage::FocusMoved {
            from: change.blurred,
            to: change.focused,
        });
    }

    /// Whether a focus target lies in the branch rooted at `node`.
    fn target_within(&self, target: FocusTarget, node: NodeId) -> bool {
        let owner = match target {
            FocusTarget::Content(owner) => owner,
            FocusTarget::Item(item) => match self.owner_of(item) {
                Some(owner) => owner,
                None => return false,
            },
            FocusTarget::Trigger => return false,
        };
        self.is_within(owner, node)
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn is_within(&self, mut node: NodeId, ancestor: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.node(node).and_then(MenuNode::parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn schedule_open(&mut self, sub: NodeId) {
        let Some(node) = self.node(sub) else {
            return;
        };
        if node.open_timer.is_some_and(|t| self.timers.is_pending(t)) {
            return;
        }
        let Some(parent) = node.parent else {
            return;
        };
        let generation = self.nodes[parent.index()].generation;
        let token = self.timers.schedule(
            self.now.after(self.config.open_delay_ms),
            TimerKind::OpenSubmenu(sub),
            parent,
            generation,
        );
        trace!(node = %sub, "submenu open scheduled");
        self.nodes[sub.index()].open_timer = Some(token);
    }

    fn cancel_pending_opens(&mut self, except: Option<NodeId>) {
        for node in &mut self.nodes {
            if Some(node.id) == except {
                continue;
            }
            if let Some(token) = node.open_timer.take() {
                self.timers.cancel(token);
            }
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn place(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let (anchor, placement) = match node.parent {
            None => match self.root_anchoring {
                RootAnchoring::Trigger => (
                    Anchor::Rect(self.trigger_rect),
                    self.config.dropdown_placement,
                ),
                RootAnchoring::Pointer => (
                    Anchor::Point(node.anchor_point.unwrap_or(self.trigger_rect.origin())),
                    self.config.context_placement(),
                ),
            },
            Some(_) => {
                let Some(trigger) = node.trigger.and_then(|t| self.item_rect(t)) else {
                    return;
                };
                (Anchor::Rect(trigger), self.submenu_placement())
            }
        };
        let size = self.surface_size(id);
        let resolved = Positioner::resolve(
            &anchor,
            size,
            self.viewport,
            &placement,
            self.config.direction,
        );
        trace!(
            node = %id,
            side = ?resolved.side,
            x = resolved.rect.x,
            y = resolved.rect.y,
            "surface placed"
        );
        self.nodes[id.index()].placement = Some(resolved);
    }

    fn submenu_placement(&self) -> Placement {
        self.config.submenu_placement()
    }

    fn reposition_open(&mut self) {
        for id in self.open_chain() {
            self.place(id);
        }
    }

    fn surface_size(&self, id: NodeId) -> Size {
        let node = &self.nodes[id.index()];
        node.content_size.unwrap_or_else(|| {
            layout::content_size(&self.config.metrics, node.registry.iter().map(|(_, item)| item))
        })
    }

    /// Absolute row frames of an open level, in document order.
    fn frames(&self, id: NodeId) -> Vec<(ItemId, Rect)> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let Some(surface) = node.placement.filter(|_| node.open).map(|p| p.rect) else {
            return Vec::new();
        };
        layout::item_frames(&self.config.metrics, surface.width, node.registry.iter())
            .into_iter()
            .map(|(item, frame)| {
                let frame = node.item_frames.get(&item).copied().unwrap_or(frame);
                (item, frame.translate(surface.x, surface.y))
            })
            .collect()
    }
}
