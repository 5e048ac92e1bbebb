//! Reference vertical layout of menu surfaces.
//!
//! Rows stack top to bottom inside the surface padding and span its width
//! minus padding. Hosts with their own layout override surface sizes and
//! item frames on the tree instead.

use crate::config::LayoutMetrics;
use crate::item::MenuItem;
use cascade_core::{ItemId, Point, Rect, Size};

/// Size of a surface holding the given items.
pub fn content_size<'a>(metrics: &LayoutMetrics, items: impl IntoIterator<Item = &'a MenuItem>) -> Size {
    let rows: f32 = items
        .into_iter()
        .map(|item| metrics.row_height(&item.kind))
        .sum();
    Size::new(metrics.width, rows + metrics.padding * 2.0)
}

/// Row frames, relative to the surface origin, in the order given.
pub fn item_frames<'a>(
    metrics: &LayoutMetrics,
    surface_width: f32,
    items: impl IntoIterator<Item = (ItemId, &'a MenuItem)>,
) -> Vec<(ItemId, Rect)> {
    let width = (surface_width - metrics.padding * 2.0).max(0.0);
    let mut y = metrics.padding;
    items
        .into_iter()
        .map(|(id, item)| {
            let height = metrics.row_height(&item.kind);
            let frame = Rect::new(metrics.padding, y, width, height);
            y += height;
            (id, frame)
        })
        .collect()
}

/// Item whose frame contains `point` (half-open), frames given in absolute
/// coordinates.
pub fn item_at(frames: &[(ItemId, Rect)], point: &Point) -> Option<ItemId> {
    frames
        .iter()
        .find(|(_, frame)| frame.hit(point))
        .map(|(id, _)| *id)
}
