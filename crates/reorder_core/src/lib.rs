//! Drag-to-reorder logic for list widgets.
//!
//! This crate holds the windowing-toolkit-independent half of a reorderable
//! list: the drag lifecycle state machine ([`DragController`]), insertion
//! point computation, dirty-region tracking for the insertion indicator, and
//! the indicator's line/arrowhead geometry. The widget side (row rendering,
//! scrolling, mouse wiring) supplies geometry through the [`ListSurface`]
//! trait and applies the [`ReorderCommand`] the controller produces on drop.

mod controller;
mod events;
mod insertion;
mod invalidate;
mod overlay;
mod surface;

pub use controller::{DragController, DragPhase, ReorderCommand};
pub use events::{CancelHooks, Hooks, ItemDrag, ItemDragging};
pub use insertion::{
    DropEffect, InsertionMode, InsertionTarget, insertion_target_at, resolve_drop_index,
};
pub use invalidate::{InvalidationTracker, indicator_region};
pub use overlay::{IndicatorShape, IndicatorStyle, indicator_shape};
pub use surface::{ListSurface, UniformRows};
