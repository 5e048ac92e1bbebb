//! Headless dropdown and context menus for Cascade.
//!
//! A [`MenuTree`] holds the root menu and every nested submenu. Hosts feed it
//! input [`Event`](cascade_core::Event)s with a [`Timestamp`](cascade_core::Timestamp)
//! and render what it reports: open surfaces and their rectangles, the focus
//! target and an accessibility snapshot. [`DropdownMenu`] and [`ContextMenu`]
//! add the two ways of opening the root.
//!
//! ```
//! use cascade_core::{Event, Key, Rect, Timestamp};
//! use cascade_menu::{DropdownMenu, MenuConfig, MenuEntry, MenuMessage};
//!
//! let mut menu = DropdownMenu::new(
//!     &[MenuEntry::action("New Tab", "new-tab"), MenuEntry::action("Print", "print")],
//!     MenuConfig::default(),
//! )
//! .unwrap()
//! .with_trigger_rect(Rect::new(10.0, 10.0, 80.0, 32.0));
//!
//! menu.tree_mut().focus_trigger();
//! menu.handle_event(&Event::key(Key::Down), Timestamp::ZERO);
//! let msgs = menu.handle_event(&Event::key(Key::Enter), Timestamp::ZERO);
//! assert!(matches!(&msgs[0], MenuMessage::ItemSelected { action, .. } if action == "new-tab"));
//! assert!(!menu.is_open());
//! ```

pub mod config;
pub mod context_menu;
pub mod dropdown;
pub mod entry;
pub mod error;
pub mod focus;
pub mod intent;
pub mod item;
pub mod layout;
pub mod message;
pub mod node;
pub mod positioning;
pub mod registry;
pub mod timer;
pub mod tree;
pub mod typeahead;

pub use config::{LayoutMetrics, MenuConfig};
pub use context_menu::ContextMenu;
pub use dropdown::DropdownMenu;
pub use entry::{validate_entries, MenuDefinition, MenuEntry};
pub use error::{MenuError, Result};
pub use focus::{FocusChange, FocusRing, FocusState, FocusTarget};
pub use intent::{HorizontalSide, IntentVerdict, PointerDirection, PointerIntentRegion};
pub use item::{ItemKind, MenuItem};
pub use message::MenuMessage;
pub use node::{CloseReason, MenuNode, NodeState};
pub use positioning::{Align, Anchor, Placement, Positioner, ResolvedPlacement, Side};
pub use registry::{CollectionItem, DocumentPosition, ItemRegistry, Step};
pub use timer::{Timer, TimerKind, TimerQueue, TimerToken};
pub use tree::{Hit, MenuTree, OpenFocus, RootAnchoring, ROOT};
pub use typeahead::{next_match, Typeahead};
