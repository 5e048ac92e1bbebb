//! Placement of menu surfaces relative to an anchor.
//!
//! A surface is placed on one side of its anchor, aligned along the cross
//! axis, then flipped to the opposite side when the preferred side runs out
//! of room and finally shifted to stay inside the collision boundary.

use cascade_core::{Direction, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Side of the anchor a surface is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Above the anchor
    Top,
    /// Right of the anchor
    Right,
    /// Below the anchor
    Bottom,
    /// Left of the anchor
    Left,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Whether the main axis is horizontal.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The side content flows toward in the given direction (`Right` in LTR).
    #[must_use]
    pub const fn inline_end(direction: Direction) -> Self {
        match direction {
            Direction::Ltr => Self::Right,
            Direction::Rtl => Self::Left,
        }
    }
}

/// Alignment along the cross axis.
///
/// `Start` and `End` are logical: for surfaces above or below the anchor,
/// `Start` aligns right edges in RTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Align leading edges
    #[default]
    Start,
    /// Center on the anchor
    Center,
    /// Align trailing edges
    End,
}

/// Requested placement of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Preferred side
    pub side: Side,
    /// Cross-axis alignment
    pub align: Align,
    /// Gap between anchor and surface along the main axis
    pub side_offset: f32,
    /// Shift along the cross axis, away from the aligned edge
    pub align_offset: f32,
    /// Flip and shift to stay inside the boundary
    pub avoid_collisions: bool,
    /// Inset applied to the boundary before collision checks
    pub collision_padding: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self::dropdown()
    }
}

impl Placement {
    /// Root surface of a dropdown: below the trigger, start aligned.
    #[must_use]
    pub const fn dropdown() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Start,
            side_offset: 5.0,
            align_offset: 0.0,
            avoid_collisions: true,
            collision_padding: 0.0,
        }
    }

    /// Root surface of a context menu, anchored at the pointer.
    #[must_use]
    pub const fn context(direction: Direction) -> Self {
        Self {
            side: Side::inline_end(direction),
            align: Align::Start,
            side_offset: 2.0,
            align_offset: 0.0,
            avoid_collisions: true,
            collision_padding: 0.0,
        }
    }

    /// Submenu surface next to its trigger item.
    ///
    /// The negative align offset lifts the surface by its padding so the
    /// first item lines up with the trigger.
    #[must_use]
    pub fn submenu(direction: Direction, padding: f32) -> Self {
        Self {
            side: Side::inline_end(direction),
            align: Align::Start,
            side_offset: padding,
            align_offset: -padding,
            avoid_collisions: true,
            collision_padding: 0.0,
        }
    }

    /// Set the side.
    #[must_use]
    pub const fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Set the alignment.
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the side offset.
    #[must_use]
    pub const fn with_side_offset(mut self, offset: f32) -> Self {
        self.side_offset = offset;
        self
    }

    /// Set the collision padding.
    #[must_use]
    pub const fn with_collision_padding(mut self, padding: f32) -> Self {
        self.collision_padding = padding;
        self
    }
}

/// What a surface is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// An element rectangle (trigger button or submenu trigger item)
    Rect(Rect),
    /// A pointer position (context menus)
    Point(Point),
}

impl Anchor {
    /// Anchor as a rectangle; points become zero-sized rectangles.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::Point(p) => Rect::new(p.x, p.y, 0.0, 0.0),
        }
    }
}

/// Final placement of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlacement {
    /// Surface rectangle in viewport coordinates
    pub rect: Rect,
    /// Side actually used (after any flip)
    pub side: Side,
    /// Alignment used
    pub align: Align,
}

impl ResolvedPlacement {
    /// Whether the surface ended up on the opposite of the requested side.
    #[must_use]
    pub fn flipped_from(&self, requested: Side) -> bool {
        self.side != requested
    }
}

/// Computes surface placements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positioner;

impl Positioner {
    /// Resolve the rectangle, side and alignment of a surface.
    #[must_use]
    pub fn resolve(
        anchor: &Anchor,
        content: Size,
        boundary: Rect,
        placement: &Placement,
        direction: Direction,
    ) -> ResolvedPlacement {
        let anchor = anchor.rect();
        let bounds = boundary.inset(placement.collision_padding);

        let mut side = placement.side;
        if placement.avoid_collisions {
            let needed = main_extent(side, content) + placement.side_offset;
            let room = available_room(side, &anchor, &bounds);
            let opposite_room = available_room(side.opposite(), &anchor, &bounds);
            if needed > room && opposite_room > room {
                side = side.opposite();
            }
        }

        let (x, y) = if side.is_horizontal() {
            let x = match side {
                Side::Right => anchor.right() + placement.side_offset,
                _ => anchor.left() - placement.side_offset - content.width,
            };
            let y = match placement.align {
                Align::Start => anchor.top() + placement.align_offset,
                Align::Center => anchor.center().y - content.height / 2.0 + placement.align_offset,
                Align::End => anchor.bottom() - content.height - placement.align_offset,
            };
            (x, y)
        } else {
            let y = match side {
                Side::Bottom => anchor.bottom() + placement.side_offset,
                _ => anchor.top() - placement.side_offset - content.height,
            };
            let leading_left = matches!(
                (placement.align, direction),
                (Align::Start, Direction::Ltr) | (Align::End, Direction::Rtl)
            );
            let x = match placement.align {
                Align::Center => anchor.center().x - content.width / 2.0 + placement.align_offset,
                _ if leading_left => anchor.left() + placement.align_offset,
                _ => anchor.right() - content.width - placement.align_offset,
            };
            (x, y)
        };

        let mut rect = Rect::new(x, y, content.width, content.height);
        if placement.avoid_collisions {
            rect = shift_into(rect, &bounds);
        }

        ResolvedPlacement {
            rect,
            side,
            align: placement.align,
        }
    }
}

const fn main_extent(side: Side, content: Size) -> f32 {
    if side.is_horizontal() {
        content.width
    } else {
        content.height
    }
}

fn available_room(side: Side, anchor: &Rect, bounds: &Rect) -> f32 {
    match side {
        Side::Top => anchor.top() - bounds.top(),
        Side::Right => bounds.right() - anchor.right(),
        Side::Bottom => bounds.bottom() - anchor.bottom(),
        Side::Left => anchor.left() - bounds.left(),
    }
}

fn shift_into(rect: Rect, bounds: &Rect) -> Rect {
    let clamp = |pos: f32, size: f32, lo: f32, hi: f32| {
        if size >= hi - lo {
            lo
        } else {
            pos.clamp(lo, hi - size)
        }
    };
    Rect::new(
        clamp(rect.x, rect.width, bounds.left(), bounds.right()),
        clamp(rect.y, rect.height, bounds.top(), bounds.bottom()),
        rect.width,
        rect.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 550.0, 660.0);
    const MENU: Size = Size::new(200.0, 220.0);

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert!(Side::Left.is_horizontal());
        assert!(!Side::Bottom.is_horizontal());
        assert_eq!(Side::inline_end(Direction::Ltr), Side::Right);
        assert_eq!(Side::inline_end(Direction::Rtl), Side::Left);
    }

    #[test]
    fn test_anchor_point_is_zero_sized() {
        let rect = Anchor::Point(Point::new(4.0, 9.0)).rect();
        assert_eq!(rect, Rect::new(4.0, 9.0, 0.0, 0.0));
    }

    #[test]
    fn test_dropdown_below_trigger_ltr() {
        let trigger = Anchor::Rect(Rect::new(10.0, 10.0, 80.0, 32.0));
        let placed = Positioner::resolve(
            &trigger,
            MENU,
            VIEWPORT,
            &Placement::dropdown(),
            Direction::Ltr,
        );
        assert_eq!(placed.side, Side::Bottom);
        assert_eq!(placed.rect, Rect::new(10.0, 47.0, 200.0, 220.0));
    }

    #[test]
    fn test_side_offset_moves_away_from_anchor() {
        let trigger = Anchor::Rect(Rect::new(10.0, 10.0, 80.0, 32.0));
        let flush = Positioner::resolve(
            &trigger,
            MENU,
            VIEWPORT,
            &Placement::dropdown().with_side_offset(0.0),
            Direction::Ltr,
        );
        assert_eq!(flush.rect.y, 42.0);
        let spaced = Positioner::resolve(
            &trigger,
            MENU,
            VIEWPORT,
            &Placement::dropdown().with_side_offset(12.0),
            Direction::Ltr,
        );
        assert_eq!(spaced.rect.y, 54.0);
    }

    #[test]
    fn test_dropdown_start_aligns_right_edges_in_rtl() {
        let trigger = Anchor::Rect(Rect::new(460.0, 10.0, 80.0, 32.0));
        let placed = Positioner::resolve(
            &trigger,
            MENU,
            VIEWPORT,
            &Placement::dropdown(),
            Direction::Rtl,
        );
        assert_eq!(placed.rect, Rect::new(340.0, 47.0, 200.0, 220.0));
    }

    #[test]
    fn test_align_end_and_center() {
        let trigger = Anchor::Rect(Rect::new(100.0, 10.0, 80.0, 32.0));
        let end = Positioner::resolve(
            &trigger,
            Size::new(60.0, 50.0),
            VIEWPORT,
            &Placement::dropdown().with_align(Align::End),
            Direction::Ltr,
        );
        assert_eq!(end.rect.right(), 180.0);

        let center = Positioner::resolve(
            &trigger,
            Size::new(100.0, 50.0),
            VIEWPORT,
            &Placement::dropdown().with_align(Align::Center),
            Direction::Ltr,
        );
        assert_eq!(center.rect.center().x, 140.0);
    }

    #[test]
    fn test_submenu_lines_up_first_item() {
        let trigger_item = Anchor::Rect(Rect::new(15.0, 125.0, 190.0, 32.0));
        let placed = Positioner::resolve(
            &trigger_item,
            Size::new(200.0, 147.0),
            VIEWPORT,
            &Placement::submenu(Direction::Ltr, 5.0),
            Direction::Ltr,
        );
        assert_eq!(placed.side, Side::Right);
        assert_eq!(placed.rect, Rect::new(210.0, 120.0, 200.0, 147.0));
    }

    #[test]
    fn test_submenu_flips_when_right_overflows() {
        let trigger_item = Anchor::Rect(Rect::new(215.0, 198.0, 190.0, 32.0));
        let placement = Placement::submenu(Direction::Ltr, 5.0);
        let placed = Positioner::resolve(
            &trigger_item,
            Size::new(200.0, 74.0),
            VIEWPORT,
            &placement,
            Direction::Ltr,
        );
        assert_eq!(placed.side, Side::Left);
        assert!(placed.flipped_from(placement.side));
        assert_eq!(placed.rect, Rect::new(10.0, 193.0, 200.0, 74.0));
    }

    #[test]
    fn test_submenu_flips_back_right_in_rtl() {
        let trigger_item = Anchor::Rect(Rect::new(145.0, 198.0, 190.0, 32.0));
        let placed = Positioner::resolve(
            &trigger_item,
            Size::new(200.0, 74.0),
            VIEWPORT,
            &Placement::submenu(Direction::Rtl, 5.0),
            Direction::Rtl,
        );
        assert_eq!(placed.side, Side::Right);
        assert_eq!(placed.rect.x, 340.0);
    }

    #[test]
    fn test_no_flip_when_opposite_has_less_room() {
        let trigger_item = Anchor::Rect(Rect::new(20.0, 100.0, 400.0, 32.0));
        let placed = Positioner::resolve(
            &trigger_item,
            Size::new(200.0, 74.0),
            VIEWPORT,
            &Placement::submenu(Direction::Ltr, 5.0),
            Direction::Ltr,
        );
        assert_eq!(placed.side, Side::Right);
        // shifted back inside the viewport
        assert_eq!(placed.rect.right(), 550.0);
    }

    #[test]
    fn test_context_menu_at_pointer() {
        let placed = Positioner::resolve(
            &Anchor::Point(Point::new(100.0, 100.0)),
            MENU,
            VIEWPORT,
            &Placement::context(Direction::Ltr),
            Direction::Ltr,
        );
        assert_eq!(placed.rect.origin(), Point::new(102.0, 100.0));

        let placed = Positioner::resolve(
            &Anchor::Point(Point::new(300.0, 100.0)),
            MENU,
            VIEWPORT,
            &Placement::context(Direction::Rtl),
            Direction::Rtl,
        );
        assert_eq!(placed.side, Side::Left);
        assert_eq!(placed.rect.right(), 298.0);
    }

    #[test]
    fn test_context_menu_shifted_up_near_bottom() {
        let placed = Positioner::resolve(
            &Anchor::Point(Point::new(100.0, 600.0)),
            MENU,
            VIEWPORT,
            &Placement::context(Direction::Ltr),
            Direction::Ltr,
        );
        assert_eq!(placed.rect.bottom(), 660.0);
    }

    #[test]
    fn test_collision_padding_insets_boundary() {
        let placed = Positioner::resolve(
            &Anchor::Point(Point::new(0.0, 0.0)),
            Size::new(100.0, 100.0),
            VIEWPORT,
            &Placement::context(Direction::Ltr).with_collision_padding(10.0),
            Direction::Ltr,
        );
        assert_eq!(placed.rect.origin(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_no_collision_handling_when_disabled() {
        let mut placement = Placement::submenu(Direction::Ltr, 5.0);
        placement.avoid_collisions = false;
        let placed = Positioner::resolve(
            &Anchor::Rect(Rect::new(400.0, 0.0, 100.0, 32.0)),
            Size::new(200.0, 50.0),
            VIEWPORT,
            &placement,
            Direction::Ltr,
        );
        assert_eq!(placed.side, Side::Right);
        assert_eq!(placed.rect.x, 505.0);
    }

    #[test]
    fn test_placement_serde_defaults() {
        let placement: Placement = serde_json::from_str(r#"{"side":"top"}"#).expect("parse");
        assert_eq!(placement.side, Side::Top);
        assert_eq!(placement.align, Align::Start);
        assert_eq!(placement.side_offset, 5.0);
    }

    proptest! {
        #[test]
        fn prop_surface_stays_inside_viewport(
            x in 0.0f32..550.0,
            y in 0.0f32..660.0,
            w in 1.0f32..300.0,
            h in 1.0f32..300.0,
            rtl in any::<bool>(),
        ) {
            let direction = if rtl { Direction::Rtl } else { Direction::Ltr };
            let placed = Positioner::resolve(
                &Anchor::Point(Point::new(x, y)),
                Size::new(w, h),
                VIEWPORT,
                &Placement::context(direction),
                direction,
            );
            prop_assert!(placed.rect.left() >= -0.001);
            prop_assert!(placed.rect.top() >= -0.001);
            prop_assert!(placed.rect.right() <= 550.001);
            prop_assert!(placed.rect.bottom() <= 660.001);
        }
    }
}
