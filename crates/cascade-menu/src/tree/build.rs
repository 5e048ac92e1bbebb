//! Tree construction and runtime item changes.

use super::{MenuTree, PointerState, ROOT};
use crate::config::MenuConfig;
use crate::entry::{validate_entries, MenuDefinition, MenuEntry};
use crate::error::{MenuError, Result};
use crate::focus::{FocusRing, FocusTarget};
use crate::item::{ItemKind, MenuItem};
use crate::message::MenuMessage;
use crate::node::{CloseReason, MenuNode};
use crate::registry::DocumentPosition;
use crate::timer::TimerQueue;
use crate::typeahead::Typeahead;
use cascade_core::{ItemId, NodeId, Rect, Timestamp};
use std::collections::HashMap;
use tracing::debug;

impl MenuTree {
    /// Build a closed tree from entries.
    pub fn new(entries: &[MenuEntry], config: MenuConfig) -> Result<Self> {
        config.validate()?;
        validate_entries(entries)?;
        let typeahead = Typeahead::new(config.typeahead_timeout_ms);
        let mut tree = Self {
            config,
            nodes: vec![MenuNode::new(ROOT, None, None)],
            owners: HashMap::new(),
            ring: FocusRing::default(),
            typeahead,
            typeahead_timer: None,
            long_press: None,
            timers: TimerQueue::new(),
            pointer: PointerState::default(),
            intent: None,
            reopen: None,
            viewport: Rect::new(0.0, 0.0, f32::MAX, f32::MAX),
            trigger_rect: Rect::default(),
            root_anchoring: super::RootAnchoring::Trigger,
            now: Timestamp::ZERO,
            outbox: Vec::new(),
        };
        tree.add_entries(ROOT, entries, None)?;
        debug!(nodes = tree.nodes.len(), items = tree.owners.len(), "menu tree built");
        Ok(tree)
    }

    /// Build a closed tree from a definition.
    pub fn from_definition(definition: &MenuDefinition) -> Result<Self> {
        Self::new(&definition.items, definition.config.clone())
    }

    /// Insert an entry into a level at a document position.
    ///
    /// Returns the new item, or `None` for a group (its entries are
    /// registered beneath `position`).
    pub fn insert_item(
        &mut self,
        node: NodeId,
        entry: &MenuEntry,
        position: DocumentPosition,
    ) -> Result<Option<ItemId>> {
        if self.node(node).is_none() {
            return Err(MenuError::UnknownNode(node));
        }
        validate_entries(std::slice::from_ref(entry))?;
        let id = self.add_entry(node, entry, position)?;
        self.reposition_open();
        Ok(id)
    }

    /// Remove an item. Removing a submenu trigger closes and detaches its
    /// submenu; focus on the removed item falls back to its level's trigger,
    /// or to the root surface while the root is open.
    pub fn remove_item(&mut self, id: ItemId) -> Result<Vec<MenuMessage>> {
        let owner = self.owner_of(id).ok_or(MenuError::UnknownItem(id))?;
        if let Some(sub) = self.item(id).and_then(MenuItem::submenu) {
            self.close_node(sub, CloseReason::TriggerRemoved);
            if let Some(node) = self.nodes.get_mut(sub.index()) {
                if let Some(token) = node.open_timer.take() {
                    self.timers.cancel(token);
                }
            }
            self.nodes[owner.index()].children.retain(|c| *c != sub);
            for detached in self.branch(sub) {
                self.nodes[detached.index()].detached = true;
                let items: Vec<ItemId> = self.nodes[detached.index()].registry.ordered().to_vec();
                for item in items {
                    self.owners.remove(&item);
                }
            }
            if self.reopen == Some(sub) {
                self.reopen = None;
            }
        }

        let was_focused = self.ring.current() == Some(FocusTarget::Item(id));
        let node = &mut self.nodes[owner.index()];
        node.registry.unregister(id);
        node.item_frames.remove(&id);
        if node.focus.focused() == Some(id) {
            node.focus.focus_none();
        }
        let fallback = match node.trigger {
            Some(trigger) => FocusTarget::Item(trigger),
            None if node.open => FocusTarget::Content(ROOT),
            None => FocusTarget::Trigger,
        };
        self.owners.remove(&id);
        if self.pointer.hovered == Some(id) {
            self.pointer.hovered = None;
        }
        if was_focused {
            self.set_focus(Some(fallback));
        }
        debug!(item = %id, node = %owner, "item removed");
        self.reposition_open();
        Ok(self.take_messages())
    }

    /// Enable or disable an item. Disabling the focused item moves focus to
    /// its surface; disabling a submenu trigger closes its submenu.
    pub fn set_item_disabled(&mut self, id: ItemId, disabled: bool) -> Result<Vec<MenuMessage>> {
        let owner = self.owner_of(id).ok_or(MenuError::UnknownItem(id))?;
        self.nodes[owner.index()].registry.set_disabled(id, disabled);
        if disabled {
            if let Some(sub) = self.item(id).and_then(MenuItem::submenu) {
                self.close_node(sub, CloseReason::Host);
                if let Some(token) = self.nodes[sub.index()].open_timer.take() {
                    self.timers.cancel(token);
                }
            }
            if self.ring.current() == Some(FocusTarget::Item(id)) {
                self.move_focus(FocusTarget::Content(owner));
            }
        }
        Ok(self.take_messages())
    }

    /// `node` and every level beneath it.
    fn branch(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = vec![node];
        let mut index = 0;
        while let Some(current) = out.get(index).copied() {
            if let Some(n) = self.node(current) {
                out.extend_from_slice(&n.children);
            }
            index += 1;
        }
        out
    }

    fn add_entries(
        &mut self,
        node: NodeId,
        entries: &[MenuEntry],
        parent: Option<&DocumentPosition>,
    ) -> Result<()> {
        for (index, entry) in entries.iter().enumerate() {
            let index = u32::try_from(index)
                .map_err(|_| MenuError::invalid("items", "too many entries"))?;
            let position = match parent {
                Some(parent) => parent.child(index),
                None => DocumentPosition::at(index),
            };
            self.add_entry(node, entry, position)?;
        }
        Ok(())
    }

    fn add_entry(
        &mut self,
        node: NodeId,
        entry: &MenuEntry,
        position: DocumentPosition,
    ) -> Result<Option<ItemId>> {
        let item = match entry {
            MenuEntry::Group { items } => {
                self.add_entries(node, items, Some(&position))?;
                return Ok(None);
            }
            MenuEntry::Submenu {
                label,
                items,
                disabled,
                text_value,
            } => {
                let child = NodeId::new(self.nodes.len() as u64);
                let mut trigger = MenuItem::new(label.clone(), ItemKind::SubmenuTrigger(child), node);
                trigger.disabled = *disabled;
                trigger.text_value.clone_from(text_value);
                let id = self.register(node, trigger, position)?;
                self.nodes.push(MenuNode::new(child, Some(node), Some(id)));
                self.nodes[node.index()].children.push(child);
                self.add_entries(child, items, None)?;
                return Ok(Some(id));
            }
            MenuEntry::Action {
                label,
                action,
                disabled,
                shortcut,
                text_value,
            } => {
                let mut item = MenuItem::new(
                    label.clone(),
                    ItemKind::Action {
                        action: action.clone(),
                    },
                    node,
                );
                item.disabled = *disabled;
                item.shortcut.clone_from(shortcut);
                item.text_value.clone_from(text_value);
                item
            }
            MenuEntry::Checkbox {
                label,
                action,
                checked,
                disabled,
                text_value,
            } => {
                let mut item = MenuItem::new(
                    label.clone(),
                    ItemKind::Checkbox {
                        action: action.clone(),
                        checked: *checked,
                    },
                    node,
                );
                item.disabled = *disabled;
                item.text_value.clone_from(text_value);
                item
            }
            MenuEntry::Radio {
                label,
                group,
                value,
                checked,
                disabled,
                text_value,
            } => {
                let mut item = MenuItem::new(
                    label.clone(),
                    ItemKind::Radio {
                        group: group.clone(),
                        value: value.clone(),
                        checked: *checked,
                    },
                    node,
                );
                item.disabled = *disabled;
                item.text_value.clone_from(text_value);
                item
            }
            MenuEntry::Separator => MenuItem::new("", ItemKind::Separator, node),
            MenuEntry::Label { label } => MenuItem::new(label.clone(), ItemKind::Label, node),
        };
        self.register(node, item, position).map(Some)
    }

    fn register(&mut self, node: NodeId, item: MenuItem, position: DocumentPosition) -> Result<ItemId> {
        let level = self
            .nodes
            .get_mut(node.index())
            .ok_or(MenuError::UnknownNode(node))?;
        let id = level.registry.register(item, position);
        self.owners.insert(id, node);
        Ok(id)
    }
}
