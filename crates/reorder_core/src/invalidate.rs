use gpui::{Bounds, Pixels, point, size};

use crate::insertion::{InsertionMode, InsertionTarget};
use crate::surface::ListSurface;

/// The rectangle a rendered insertion indicator occupies for `target`.
///
/// The line and its arrowheads straddle the boundary between two rows, so the
/// hovered item's rectangle is unioned with the neighbor the line extends
/// toward: the previous item for `Before` (unless the target is first), the
/// next item for `After` (unless the target is last).
pub fn indicator_region(
    surface: &dyn ListSurface,
    target: InsertionTarget,
) -> Option<Bounds<Pixels>> {
    let mut region = surface.item_bounds(target.ix)?;

    match target.mode {
        InsertionMode::Before if target.ix > 0 => {
            if let Some(prev) = surface.item_bounds(target.ix - 1) {
                region = union(region, prev);
            }
        }
        InsertionMode::After if target.ix + 1 < surface.item_count() => {
            if let Some(next) = surface.item_bounds(target.ix + 1) {
                region = union(region, next);
            }
        }
        _ => {}
    }

    Some(region)
}

fn union(a: Bounds<Pixels>, b: Bounds<Pixels>) -> Bounds<Pixels> {
    let left = a.origin.x.min(b.origin.x);
    let top = a.origin.y.min(b.origin.y);
    let right = (a.origin.x + a.size.width).max(b.origin.x + b.size.width);
    let bottom = (a.origin.y + a.size.height).max(b.origin.y + b.size.height);
    Bounds::new(point(left, top), size(right - left, bottom - top))
}

/// Accumulates the dirty rectangles produced by insertion-target changes.
///
/// The controller pushes the old indicator region before updating the target
/// and the new region after; the host drains the list and requests a repaint
/// only when it is non-empty, so an unchanged target costs nothing.
#[derive(Default)]
pub struct InvalidationTracker {
    regions: Vec<Bounds<Pixels>>,
}

impl InvalidationTracker {
    pub fn push(&mut self, region: Option<Bounds<Pixels>>) {
        if let Some(region) = region {
            self.regions.push(region);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn take(&mut self) -> Vec<Bounds<Pixels>> {
        std::mem::take(&mut self.regions)
    }
}
