use gpui::{Bounds, Pixels, Point, point, size};

/// Geometry queries the host list widget must answer, in window coordinates.
///
/// The controller never inspects item content; it only needs to map a pointer
/// position to a row and a row to its rectangle. A query returning `None` is
/// treated as "no item there", never as an error.
pub trait ListSurface {
    fn item_count(&self) -> usize;

    /// Index of the item under `position`, if any.
    fn index_at(&self, position: Point<Pixels>) -> Option<usize>;

    /// Bounding rectangle of the item at `ix`, if it exists.
    fn item_bounds(&self, ix: usize) -> Option<Bounds<Pixels>>;

    /// The visible area of the list.
    fn viewport(&self) -> Bounds<Pixels>;
}

/// A [`ListSurface`] over uniform-height rows stacked vertically.
///
/// `scroll_offset_y` follows the scroll handle convention: zero when scrolled
/// to the top, increasingly negative as the list scrolls down. Row `ix` then
/// sits at `bounds.origin.y + scroll_offset_y + row_height * ix`.
#[derive(Clone, Copy, Debug)]
pub struct UniformRows {
    pub bounds: Bounds<Pixels>,
    pub row_height: Pixels,
    pub scroll_offset_y: Pixels,
    pub count: usize,
}

impl UniformRows {
    pub fn new(
        bounds: Bounds<Pixels>,
        row_height: Pixels,
        scroll_offset_y: Pixels,
        count: usize,
    ) -> Self {
        Self {
            bounds,
            row_height,
            scroll_offset_y,
            count,
        }
    }
}

impl ListSurface for UniformRows {
    fn item_count(&self) -> usize {
        self.count
    }

    fn index_at(&self, position: Point<Pixels>) -> Option<usize> {
        if !self.bounds.contains(&position) {
            return None;
        }
        if self.row_height <= gpui::px(0.) {
            return None;
        }
        let rel_y = position.y - self.bounds.origin.y - self.scroll_offset_y;
        if rel_y < gpui::px(0.) {
            return None;
        }
        let ix = (rel_y / self.row_height).floor() as usize;
        (ix < self.count).then_some(ix)
    }

    fn item_bounds(&self, ix: usize) -> Option<Bounds<Pixels>> {
        if ix >= self.count {
            return None;
        }
        let top = self.bounds.origin.y + self.scroll_offset_y + self.row_height * ix;
        Some(Bounds::new(
            point(self.bounds.origin.x, top),
            size(self.bounds.size.width, self.row_height),
        ))
    }

    fn viewport(&self) -> Bounds<Pixels> {
        self.bounds
    }
}
