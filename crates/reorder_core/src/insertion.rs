use gpui::{Pixels, Point};

use crate::surface::ListSurface;

/// Which side of the hovered item the insertion line is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertionMode {
    Before,
    After,
}

/// Where the dragged item would land at the current pointer position.
///
/// Absence of a target (`Option::None` at the call sites) means the drop is
/// rejected at that position; there is no separate sentinel index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertionTarget {
    pub ix: usize,
    pub mode: InsertionMode,
}

/// Effect proposed to the drag mechanism while hovering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropEffect {
    Move,
    None,
}

/// Compute the insertion target for a pointer position.
///
/// Hit-tests to an item, then compares the pointer against the item's
/// vertical midpoint: at or above the midpoint inserts before the item,
/// below it inserts after. Pure query; no state is touched.
pub fn insertion_target_at(
    surface: &dyn ListSurface,
    position: Point<Pixels>,
) -> (Option<InsertionTarget>, DropEffect) {
    let Some(ix) = surface.index_at(position) else {
        return (None, DropEffect::None);
    };
    let Some(bounds) = surface.item_bounds(ix) else {
        return (None, DropEffect::None);
    };

    let midpoint = bounds.origin.y + bounds.size.height / 2.;
    let mode = if position.y <= midpoint {
        InsertionMode::Before
    } else {
        InsertionMode::After
    };

    (Some(InsertionTarget { ix, mode }), DropEffect::Move)
}

/// Convert a raw hovered-item index into the post-removal insertion index.
///
/// Removing the dragged item first shifts every later index down by one, and
/// an `After` target inserts past the hovered item rather than at it. The
/// `After` adjustment is keyed on the *source* index being non-last, kept
/// as-is from the behavior this widget reproduces.
pub fn resolve_drop_index(drag_ix: usize, target: InsertionTarget, item_count: usize) -> usize {
    let mut drop_ix = target.ix;
    if drag_ix < drop_ix {
        drop_ix -= 1;
    }
    if target.mode == InsertionMode::After && drag_ix + 1 < item_count {
        drop_ix += 1;
    }
    drop_ix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::UniformRows;
    use gpui::{Bounds, point, px, size};

    fn rows() -> UniformRows {
        UniformRows::new(
            Bounds::new(point(px(0.), px(0.)), size(px(200.), px(120.))),
            px(30.),
            px(0.),
            4,
        )
    }

    #[test]
    fn midpoint_splits_before_and_after() {
        let rows = rows();
        // Row 1 spans y 30..60, midpoint 45.
        let (target, effect) = insertion_target_at(&rows, point(px(50.), px(40.)));
        assert_eq!(
            target,
            Some(InsertionTarget {
                ix: 1,
                mode: InsertionMode::Before
            })
        );
        assert_eq!(effect, DropEffect::Move);

        // Exactly at the midpoint still counts as before.
        let (target, _) = insertion_target_at(&rows, point(px(50.), px(45.)));
        assert_eq!(target.unwrap().mode, InsertionMode::Before);

        let (target, _) = insertion_target_at(&rows, point(px(50.), px(46.)));
        assert_eq!(target.unwrap().mode, InsertionMode::After);
    }

    #[test]
    fn miss_rejects_the_drop() {
        let rows = rows();
        let (target, effect) = insertion_target_at(&rows, point(px(50.), px(300.)));
        assert_eq!(target, None);
        assert_eq!(effect, DropEffect::None);
    }

    #[test]
    fn dragging_down_compensates_for_removal() {
        let target = InsertionTarget {
            ix: 2,
            mode: InsertionMode::Before,
        };
        assert_eq!(resolve_drop_index(0, target, 4), 1);
    }

    #[test]
    fn dragging_up_keeps_target_index() {
        let target = InsertionTarget {
            ix: 0,
            mode: InsertionMode::After,
        };
        // Source is the last item, so the after-adjustment does not apply.
        assert_eq!(resolve_drop_index(3, target, 4), 0);
    }

    #[test]
    fn after_adjustment_applies_when_source_is_not_last() {
        let target = InsertionTarget {
            ix: 2,
            mode: InsertionMode::After,
        };
        assert_eq!(resolve_drop_index(0, target, 4), 2);
    }

    #[test]
    fn dropping_around_self_is_a_noop() {
        let before_self = InsertionTarget {
            ix: 1,
            mode: InsertionMode::Before,
        };
        assert_eq!(resolve_drop_index(1, before_self, 4), 1);
    }
}
