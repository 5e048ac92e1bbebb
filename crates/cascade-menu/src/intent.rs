//! Pointer intent toward an open submenu.
//!
//! When the pointer leaves the trigger of an open submenu it usually crosses
//! sibling items on its way to the submenu. A grace polygon spanning the
//! trigger's near edge and the submenu's near edge tells a diagonal move
//! toward the submenu apart from a move away from it.

use crate::positioning::Side;
use cascade_core::{Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Horizontal side of a submenu relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalSide {
    /// Submenu is to the left
    Left,
    /// Submenu is to the right
    Right,
}

impl HorizontalSide {
    /// Horizontal component of a placement side.
    #[must_use]
    pub const fn from_side(side: Side) -> Option<Self> {
        match side {
            Side::Left => Some(Self::Left),
            Side::Right => Some(Self::Right),
            Side::Top | Side::Bottom => None,
        }
    }
}

/// Last non-zero horizontal movement of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDirection {
    last_x: Option<f32>,
    direction: Option<HorizontalSide>,
}

impl PointerDirection {
    /// Record a new pointer position and return the current direction.
    pub fn update(&mut self, position: Point) -> Option<HorizontalSide> {
        if let Some(last) = self.last_x {
            if position.x > last {
                self.direction = Some(HorizontalSide::Right);
            } else if position.x < last {
                self.direction = Some(HorizontalSide::Left);
            }
        }
        self.last_x = Some(position.x);
        self.direction
    }

    /// Current direction, if the pointer has moved horizontally.
    #[must_use]
    pub const fn current(&self) -> Option<HorizontalSide> {
        self.direction
    }
}

/// Outcome of evaluating a pointer position against a grace region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentVerdict {
    /// Pointer is over the submenu (or deeper): tracking ends, menu stays
    ReachedContent,
    /// Pointer is back on the trigger: tracking ends, menu stays
    ReturnedToTrigger,
    /// Pointer is travelling toward the submenu: keep it open
    MovingToward,
    /// Pointer is going elsewhere: close the submenu
    Away,
}

/// Grace region between a submenu trigger and its open submenu.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerIntentRegion {
    trigger_rect: Rect,
    content_rect: Rect,
    side: HorizontalSide,
    polygon: Polygon,
}

impl PointerIntentRegion {
    /// Build the region for a submenu placed on `side` of its trigger.
    ///
    /// `padding` extends the polygon vertically beyond both rectangles.
    #[must_use]
    pub fn new(trigger_rect: Rect, content_rect: Rect, side: HorizontalSide, padding: f32) -> Self {
        let (trigger_edge, content_edge) = match side {
            HorizontalSide::Right => (trigger_rect.right(), content_rect.left()),
            HorizontalSide::Left => (trigger_rect.left(), content_rect.right()),
        };
        let polygon = Polygon::new(vec![
            Point::new(trigger_edge, trigger_rect.top() - padding),
            Point::new(content_edge, content_rect.top() - padding),
            Point::new(content_edge, content_rect.bottom() + padding),
            Point::new(trigger_edge, trigger_rect.bottom() + padding),
        ]);
        Self {
            trigger_rect,
            content_rect,
            side,
            polygon,
        }
    }

    /// Trigger rectangle.
    #[must_use]
    pub const fn trigger_rect(&self) -> Rect {
        self.trigger_rect
    }

    /// Submenu rectangle.
    #[must_use]
    pub const fn content_rect(&self) -> Rect {
        self.content_rect
    }

    /// Side the submenu sits on.
    #[must_use]
    pub const fn side(&self) -> HorizontalSide {
        self.side
    }

    /// Grace polygon.
    #[must_use]
    pub const fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Inclusive containment in the grace polygon.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.polygon.contains_point(point)
    }

    /// Whether the pointer is heading for the submenu: inside the polygon
    /// and last moving horizontally toward the submenu's side.
    #[must_use]
    pub fn is_moving_toward(&self, point: &Point, direction: Option<HorizontalSide>) -> bool {
        direction == Some(self.side) && self.contains(point)
    }

    /// Classify a pointer position.
    ///
    /// `over_content` and `over_trigger` come from the caller's hit test so
    /// that nested surfaces stacked above the submenu count as content.
    #[must_use]
    pub fn evaluate(
        &self,
        point: &Point,
        direction: Option<HorizontalSide>,
        over_content: bool,
        over_trigger: bool,
    ) -> IntentVerdict {
        if over_content {
            IntentVerdict::ReachedContent
        } else if over_trigger {
            IntentVerdict::ReturnedToTrigger
        } else if self.is_moving_toward(point, direction) {
            IntentVerdict::MovingToward
        } else {
            IntentVerdict::Away
        }
    }
}
