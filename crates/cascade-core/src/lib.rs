//! Core types for Cascade menu primitives.
//!
//! This crate provides foundational types used throughout Cascade:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Polygon`]
//! - Input events: [`Event`], [`Key`], [`PointerType`]
//! - Reading direction: [`Direction`]
//! - Opaque handles: [`ItemId`], [`NodeId`] and host time [`Timestamp`]
//! - Accessibility output: [`AccessibleNode`]

pub mod accessibility;
mod direction;
mod event;
mod geometry;
mod handle;

pub use accessibility::{
    AccessibleNode, AccessibleRole, AccessibleTarget, CheckedState, Orientation,
};
pub use direction::Direction;
pub use event::{Event, Key, Modifiers, MouseButton, PointerType};
pub use geometry::{Point, Polygon, Rect, Size, EDGE_EPSILON};
pub use handle::{ItemId, NodeId, Timestamp};
