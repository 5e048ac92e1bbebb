//! One level of a menu tree.

use crate::focus::FocusState;
use crate::item::MenuItem;
use crate::positioning::ResolvedPlacement;
use crate::registry::ItemRegistry;
use crate::timer::TimerToken;
use cascade_core::{ItemId, NodeId, Point, Rect, Size};
use std::collections::HashMap;

/// Observable state of a menu level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not shown
    Closed,
    /// Shown with no item highlighted
    OpenNoFocus,
    /// Shown with the item at this document index highlighted
    OpenFocused(usize),
    /// Shown while the pointer travels toward it; closes unless it arrives
    PendingClose,
}

impl NodeState {
    /// Whether the level is shown.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Why a level closed. Reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Escape key
    Escape,
    /// An item was activated
    Activated,
    /// Pointer pressed outside every open surface
    OutsidePointer,
    /// Close arrow inside a submenu
    BackKey,
    /// Pointer left the trigger moving away from the submenu
    PointerAway,
    /// Focus moved to a sibling of the trigger
    SiblingFocus,
    /// The trigger toggled the menu shut
    TriggerToggle,
    /// The trigger item was removed
    TriggerRemoved,
    /// Closed by the host
    Host,
}

/// One level of the menu tree: the root menu or a submenu.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) trigger: Option<ItemId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) registry: ItemRegistry<MenuItem>,
    pub(crate) focus: FocusState,
    pub(crate) open: bool,
    pub(crate) generation: u64,
    pub(crate) anchor_point: Option<Point>,
    pub(crate) placement: Option<ResolvedPlacement>,
    pub(crate) content_size: Option<Size>,
    pub(crate) item_frames: HashMap<ItemId, Rect>,
    pub(crate) open_timer: Option<TimerToken>,
    /// Set once the trigger item is removed; the level is no longer reachable.
    pub(crate) detached: bool,
}

impl MenuNode {
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, trigger: Option<ItemId>) -> Self {
        Self {
            id,
            parent,
            trigger,
            children: Vec::new(),
            registry: ItemRegistry::with_id_base(id.0 << 32),
            focus: FocusState::default(),
            open: false,
            generation: 0,
            anchor_point: None,
            placement: None,
            content_size: None,
            item_frames: HashMap::new(),
            open_timer: None,
            detached: false,
        }
    }

    /// Node handle.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Whether this is the root menu.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent level.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Item in the parent that opens this level.
    #[must_use]
    pub const fn trigger(&self) -> Option<ItemId> {
        self.trigger
    }

    /// Submenus reachable from this level's items.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Items of this level.
    #[must_use]
    pub const fn registry(&self) -> &ItemRegistry<MenuItem> {
        &self.registry
    }

    /// Whether the level is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Close counter; timers scheduled under an older generation are void.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Pointer position the root was opened at (context menus).
    #[must_use]
    pub const fn anchor_point(&self) -> Option<Point> {
        self.anchor_point
    }

    /// Placement while open.
    #[must_use]
    pub const fn placement(&self) -> Option<&ResolvedPlacement> {
        self.placement.as_ref()
    }

    /// Highlighted item.
    #[must_use]
    pub const fn focused(&self) -> Option<ItemId> {
        self.focus.focused()
    }

    pub(crate) fn reset(&mut self) {
        self.open = false;
        self.generation += 1;
        self.focus.focus_none();
        self.placement = None;
        self.open_timer = None;
    }
}
