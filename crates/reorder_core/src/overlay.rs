use gpui::{Hsla, Pixels, Point, hsla, point, px};

use crate::insertion::{InsertionMode, InsertionTarget};
use crate::surface::ListSurface;

/// Visual configuration for the insertion indicator.
#[derive(Clone, Copy, Debug)]
pub struct IndicatorStyle {
    pub color: Hsla,
    pub thickness: Pixels,
    pub arrow_size: Pixels,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            color: hsla(0., 1., 0.5, 1.),
            thickness: px(1.),
            arrow_size: px(7.),
        }
    }
}

/// Geometry of the insertion indicator: a horizontal line plus a filled
/// triangular arrowhead at each end, both pointing inward.
///
/// Triangle vertices are listed in paint order starting from an outer corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorShape {
    pub start: Point<Pixels>,
    pub end: Point<Pixels>,
    pub start_arrow: [Point<Pixels>; 3],
    pub end_arrow: [Point<Pixels>; 3],
}

/// Compute the indicator geometry for `target`, in window coordinates.
///
/// The line sits on the target item's top edge for `Before` and its bottom
/// edge for `After`. It is anchored to the viewport's left edge regardless of
/// horizontal scroll, and clamped so it never extends past the visible width.
pub fn indicator_shape(
    surface: &dyn ListSurface,
    target: InsertionTarget,
    arrow_size: Pixels,
) -> Option<IndicatorShape> {
    let bounds = surface.item_bounds(target.ix)?;
    let viewport = surface.viewport();

    let y = match target.mode {
        InsertionMode::Before => bounds.origin.y,
        InsertionMode::After => bounds.origin.y + bounds.size.height,
    };

    let x1 = viewport.origin.x;
    let item_right = bounds.origin.x + bounds.size.width;
    let width = (item_right - x1).min(viewport.size.width);
    if width <= px(0.) {
        return None;
    }
    let x2 = x1 + width - px(1.);

    let half = arrow_size / 2.;
    let start_arrow = [
        point(x1, y - half),
        point(x1 + arrow_size, y),
        point(x1, y + half),
    ];
    let end_arrow = [
        point(x2, y - half),
        point(x2 - arrow_size, y),
        point(x2, y + half),
    ];

    Some(IndicatorShape {
        start: point(x1, y),
        end: point(x2, y),
        start_arrow,
        end_arrow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::UniformRows;
    use gpui::{Bounds, size};

    /// Rows wider than the viewport, as under horizontal scroll.
    struct WideRows {
        rows: UniformRows,
        item_width: Pixels,
    }

    impl ListSurface for WideRows {
        fn item_count(&self) -> usize {
            self.rows.count
        }

        fn index_at(&self, position: Point<Pixels>) -> Option<usize> {
            self.rows.index_at(position)
        }

        fn item_bounds(&self, ix: usize) -> Option<Bounds<Pixels>> {
            self.rows.item_bounds(ix).map(|mut bounds| {
                bounds.size.width = self.item_width;
                bounds
            })
        }

        fn viewport(&self) -> Bounds<Pixels> {
            self.rows.bounds
        }
    }

    fn rows(width: Pixels) -> UniformRows {
        UniformRows::new(
            Bounds::new(point(px(10.), px(0.)), size(width, px(120.))),
            px(30.),
            px(0.),
            4,
        )
    }

    #[test]
    fn line_sits_on_the_matching_edge() {
        let rows = rows(px(200.));
        let before = indicator_shape(
            &rows,
            InsertionTarget {
                ix: 1,
                mode: InsertionMode::Before,
            },
            px(7.),
        )
        .unwrap();
        assert_eq!(before.start.y, px(30.));

        let after = indicator_shape(
            &rows,
            InsertionTarget {
                ix: 1,
                mode: InsertionMode::After,
            },
            px(7.),
        )
        .unwrap();
        assert_eq!(after.start.y, px(60.));
    }

    #[test]
    fn line_is_anchored_to_the_viewport_left_edge() {
        let rows = rows(px(200.));
        let shape = indicator_shape(
            &rows,
            InsertionTarget {
                ix: 0,
                mode: InsertionMode::Before,
            },
            px(7.),
        )
        .unwrap();
        assert_eq!(shape.start.x, px(10.));
        assert_eq!(shape.end.x, px(10.) + px(200.) - px(1.));
    }

    #[test]
    fn line_clamps_to_the_viewport_width() {
        let wide = WideRows {
            rows: rows(px(200.)),
            item_width: px(500.),
        };
        let shape = indicator_shape(
            &wide,
            InsertionTarget {
                ix: 0,
                mode: InsertionMode::Before,
            },
            px(7.),
        )
        .unwrap();
        // Item right edge is at x 510; the line stops at the visible width.
        assert_eq!(shape.end.x, px(10.) + px(200.) - px(1.));
        assert_eq!(shape.end_arrow[1], point(shape.end.x - px(7.), px(0.)));
    }

    #[test]
    fn arrowheads_point_inward() {
        let shape = indicator_shape(
            &rows(px(200.)),
            InsertionTarget {
                ix: 0,
                mode: InsertionMode::Before,
            },
            px(8.),
        )
        .unwrap();
        // Tips are the middle vertex of each triangle.
        assert_eq!(shape.start_arrow[1], point(shape.start.x + px(8.), px(0.)));
        assert_eq!(shape.end_arrow[1], point(shape.end.x - px(8.), px(0.)));
        assert_eq!(shape.start_arrow[0].y, px(0.) - px(4.));
        assert_eq!(shape.start_arrow[2].y, px(4.));
    }
}
