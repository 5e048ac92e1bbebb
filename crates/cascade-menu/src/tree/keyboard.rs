//! Keyboard handling inside open menus, typeahead and item activation.

use super::{MenuTree, OpenFocus, ROOT};
use crate::focus::{FocusState, FocusTarget};
use crate::item::{ItemKind, MenuItem};
use crate::message::MenuMessage;
use crate::node::CloseReason;
use crate::registry::ItemRegistry;
use crate::timer::TimerKind;
use cascade_core::{ItemId, Key, Modifiers, NodeId};
use tracing::{debug, info};

impl MenuTree {
    pub(super) fn on_key(&mut self, key: Key, modifiers: Modifiers) {
        // Escape closes an open menu wherever focus sits, the trigger included.
        if key == Key::Escape && self.is_root_open() {
            self.typeahead.reset();
            self.close_node(ROOT, CloseReason::Escape);
            return;
        }
        let Some(node) = self.active_node() else {
            return;
        };
        if !self.is_open(node) {
            return;
        }
        let current = self.focused_item();

        if let Some(ch) = key.printable() {
            let searching = self.typeahead.is_searching(self.now);
            if !modifiers.has_command() && (ch != ' ' || searching) {
                self.typeahead_key(node, ch, current);
                return;
            }
        }

        let direction = self.config.direction;
        match key {
            Key::Down => self.step(node, |focus, registry| focus.focus_next(registry)),
            Key::Up => self.step(node, |focus, registry| focus.focus_previous(registry)),
            Key::Home | Key::PageUp => self.step(node, |focus, registry| focus.focus_first(registry)),
            Key::End | Key::PageDown => self.step(node, |focus, registry| focus.focus_last(registry)),
            Key::Enter | Key::Space => {
                if let Some(item) = current {
                    self.select(item);
                }
            }
            k if k == direction.open_key() => {
                if let Some(sub) = current.and_then(|item| self.enabled_submenu(item)) {
                    self.open_node(sub, OpenFocus::First);
                }
            }
            k if k == direction.close_key() => {
                if node != ROOT {
                    self.close_node(node, CloseReason::BackKey);
                }
            }
            _ => {}
        }
    }

    /// Move the highlight of `node` with a focus controller operation.
    fn step(
        &mut self,
        node: NodeId,
        op: impl FnOnce(&mut FocusState, &ItemRegistry<MenuItem>) -> Option<ItemId>,
    ) {
        let level = &self.nodes[node.index()];
        let mut focus = level.focus;
        if let Some(target) = op(&mut focus, &level.registry) {
            self.move_focus(FocusTarget::Item(target));
        }
    }

    fn typeahead_key(&mut self, node: NodeId, ch: char, current: Option<ItemId>) {
        let registry = &self.nodes[node.index()].registry;
        let candidates: Vec<(ItemId, &str)> = registry
            .navigable()
            .map(|(id, item)| (id, item.typeahead_text()))
            .collect();
        let found = self
            .typeahead
            .on_key_press(ch, &candidates, current, node, self.now);

        if let Some(token) = self.typeahead_timer.take() {
            self.timers.cancel(token);
        }
        let generation = self.nodes[node.index()].generation;
        self.typeahead_timer = Some(self.timers.schedule(
            self.now.after(self.config.typeahead_timeout_ms),
            TimerKind::TypeaheadReset,
            node,
            generation,
        ));
        if let Some(item) = found {
            self.move_focus(FocusTarget::Item(item));
        }
    }

    fn enabled_submenu(&self, item: ItemId) -> Option<NodeId> {
        self.item(item)
            .filter(|i| !i.disabled)
            .and_then(MenuItem::submenu)
    }

    /// Enter/Space: open a submenu trigger focused on its first item,
    /// activate anything else.
    fn select(&mut self, item: ItemId) {
        match self.enabled_submenu(item) {
            Some(sub) => self.open_node(sub, OpenFocus::First),
            None => self.activate(item),
        }
    }

    /// Activate an item, report it, and close the whole menu.
    pub(super) fn activate(&mut self, id: ItemId) {
        let Some(owner) = self.owner_of(id) else {
            return;
        };
        let Some(item) = self.item(id).filter(|i| !i.disabled) else {
            return;
        };
        let label = item.label.clone();
        let message = match item.kind.clone() {
            ItemKind::Action { action } => MenuMessage::ItemSelected { item: id, action },
            ItemKind::Checkbox { action, checked } => {
                if let Some(ItemKind::Checkbox { checked: state, .. }) = self.nodes[owner.index()]
                    .registry
                    .get_mut(id)
                    .map(|i| &mut i.kind)
                {
                    *state = !checked;
                }
                MenuMessage::CheckboxToggled {
                    item: id,
                    action,
                    checked: !checked,
                }
            }
            ItemKind::Radio { group, value, .. } => {
                self.check_radio(owner, id, &group);
                MenuMessage::RadioChanged {
                    item: id,
                    group,
                    value,
                }
            }
            ItemKind::SubmenuTrigger(_) | ItemKind::Separator | ItemKind::Label => return,
        };
        info!(item = %id, label = %label, "item activated");
        self.emit(message);
        self.close_node(ROOT, CloseReason::Activated);
    }

    /// Check `id` and uncheck the rest of its group within `owner`.
    fn check_radio(&mut self, owner: NodeId, id: ItemId, group: &str) {
        let registry = &mut self.nodes[owner.index()].registry;
        let members: Vec<ItemId> = registry.ordered().to_vec();
        for member in members {
            if let Some(ItemKind::Radio {
                group: g, checked, ..
            }) = registry.get_mut(member).map(|i| &mut i.kind)
            {
                if g.as_str() == group {
                    *checked = member == id;
                }
            }
        }
        debug!(item = %id, group, "radio checked");
    }
}
