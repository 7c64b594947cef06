//! A selectable list whose items can be reordered by dragging, with an
//! insertion-line indicator drawn between rows while the drag is in flight.

mod element;
mod list;

pub use list::{
    Reorder, ReorderList, ReorderListItem, ReorderListRowState, ReorderListState, move_item,
    reorder_list,
};
