//! Test harness for Cascade menus.
//!
//! [`Harness`] drives a [`MenuHost`] the way a user would: by label, with a
//! virtual clock. Nothing here touches the real time or a renderer.
//!
//! ```
//! use cascade_core::Direction;
//! use cascade_test::{fixture, Harness};
//!
//! let mut harness = Harness::new(fixture::submenus_dropdown(Direction::Ltr));
//! harness.click(fixture::TRIGGER_LABEL);
//! harness.pointer_over("Bookmarks →");
//! harness.assert_visible("Inbox").assert_not_focused("Inbox");
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod fixture;
pub mod harness;

pub use harness::{Harness, MenuHost};

use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once. Filtering follows `RUST_LOG`,
/// defaulting to `warn`. Later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
