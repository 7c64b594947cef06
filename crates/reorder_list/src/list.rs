use std::{ops::Range, rc::Rc};

use gpui::{
    App, AppContext as _, Bounds, Context, ElementId, Entity, FocusHandle, Hsla,
    InteractiveElement as _, IntoElement, KeyDownEvent, ListSizingBehavior, MouseButton,
    ParentElement as _, Pixels, Point, Render, RenderOnce, SharedString,
    StatefulInteractiveElement as _, StyleRefinement, Styled, UniformListScrollHandle, Window,
    div, prelude::FluentBuilder as _, px, uniform_list,
};
use gpui_component::list::ListItem;
use gpui_component::scroll::{Scrollbar, ScrollbarState};
use gpui_component::StyledExt as _;
use gpui_reorder_core::{
    DragController, DragPhase, Hooks, IndicatorStyle, InsertionMode, ItemDrag, ItemDragging,
    ListSurface as _, UniformRows,
};

use crate::element::IndicatorOverlay;

const CONTEXT: &str = "ReorderList";
const DEFAULT_ROW_HEIGHT: Pixels = px(28.);

/// Create a [`ReorderList`].
pub fn reorder_list<T, R>(state: &Entity<ReorderListState<T>>, render_item: R) -> ReorderList<T>
where
    T: 'static,
    R: Fn(usize, &ReorderListItem<T>, ReorderListRowState, &mut Window, &mut App) -> ListItem
        + 'static,
{
    ReorderList::new(state, render_item)
}

/// Move the item at `from` so it ends up at `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from != to && from < items.len() && to < items.len() {
        let item = items.remove(from);
        items.insert(to, item);
    }
}

/// A single item in a [`ReorderListState`].
#[derive(Clone)]
pub struct ReorderListItem<T> {
    pub id: SharedString,
    pub label: SharedString,
    pub data: T,
    disabled: bool,
}

impl<T> ReorderListItem<T> {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>, data: T) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Per-row flags passed to the `render_item` callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReorderListRowState {
    pub selected: bool,
    /// This row is the source of the drag in flight.
    pub dragging: bool,
    /// The insertion line currently points at this row, on the given side.
    pub insertion: Option<InsertionMode>,
}

/// A completed reorder, reported after the items have been rearranged.
#[derive(Clone, Debug)]
pub struct Reorder {
    pub item_id: SharedString,
    pub from: usize,
    pub to: usize,
    pub mode: InsertionMode,
}

struct ReorderListCallbacks<T> {
    on_reorder: Option<Rc<dyn Fn(&Reorder, &[ReorderListItem<T>])>>,
}

impl<T> Default for ReorderListCallbacks<T> {
    fn default() -> Self {
        Self { on_reorder: None }
    }
}

/// State for a selectable list with drag reordering.
///
/// Rows are fixed-height and laid out by `uniform_list`; the drag gesture is
/// driven by raw pointer events so that both the start and the completion can
/// be vetoed before anything changes.
pub struct ReorderListState<T> {
    focus_handle: FocusHandle,
    items: Vec<ReorderListItem<T>>,
    row_height: Pixels,
    scrollbar_state: ScrollbarState,
    scroll_handle: UniformListScrollHandle,
    selected_ix: Option<usize>,
    pub(crate) controller: DragController,
    pub(crate) indicator_style: IndicatorStyle,
    pub(crate) list_bounds: Bounds<Pixels>,
    insertion_line_color_changed: Hooks<Hsla>,
    callbacks: ReorderListCallbacks<T>,
    render_item: Rc<
        dyn Fn(usize, &ReorderListItem<T>, ReorderListRowState, &mut Window, &mut App) -> ListItem,
    >,
}

impl<T: 'static> ReorderListState<T> {
    pub fn new(cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            items: Vec::new(),
            row_height: DEFAULT_ROW_HEIGHT,
            scrollbar_state: ScrollbarState::default(),
            scroll_handle: UniformListScrollHandle::default(),
            selected_ix: None,
            controller: DragController::new(),
            indicator_style: IndicatorStyle::default(),
            list_bounds: Bounds::default(),
            insertion_line_color_changed: Hooks::default(),
            callbacks: ReorderListCallbacks::default(),
            render_item: Rc::new(|_, _, _, _, _| ListItem::new("reorder-list-empty")),
        }
    }

    pub fn items(mut self, items: impl Into<Vec<ReorderListItem<T>>>) -> Self {
        self.items = items.into();
        self
    }

    pub fn row_height(mut self, height: Pixels) -> Self {
        self.row_height = height;
        self
    }

    /// Enable drag reordering. Off by default; pointer-move never starts a
    /// drag while disabled.
    pub fn allow_item_drag(mut self, allow: bool) -> Self {
        self.controller.set_allow_item_drag(allow);
        self
    }

    pub fn insertion_line_color(mut self, color: Hsla) -> Self {
        self.indicator_style.color = color;
        self
    }

    pub fn insertion_line_thickness(mut self, thickness: Pixels) -> Self {
        self.indicator_style.thickness = thickness;
        self
    }

    pub fn insertion_arrow_size(mut self, arrow_size: Pixels) -> Self {
        self.indicator_style.arrow_size = arrow_size;
        self
    }

    /// Cancelable request raised when a drag is about to start. Return
    /// `false` to keep the gesture from becoming a drag.
    pub fn on_item_dragging(mut self, handler: impl Fn(&ItemDragging) -> bool + 'static) -> Self {
        self.controller.item_dragging.subscribe(handler);
        self
    }

    /// Cancelable request raised on drop, before the items are rearranged.
    /// Return `false` to leave the order untouched.
    pub fn on_item_drag(mut self, handler: impl Fn(&ItemDrag) -> bool + 'static) -> Self {
        self.controller.item_drag.subscribe(handler);
        self
    }

    pub fn on_allow_item_drag_changed(mut self, handler: impl Fn(&bool) + 'static) -> Self {
        self.controller.allow_item_drag_changed.subscribe(handler);
        self
    }

    pub fn on_insertion_line_color_changed(mut self, handler: impl Fn(&Hsla) + 'static) -> Self {
        self.insertion_line_color_changed.subscribe(handler);
        self
    }

    /// Provide a callback invoked after a successful reorder.
    pub fn on_reorder(
        mut self,
        on_reorder: impl Fn(&Reorder, &[ReorderListItem<T>]) + 'static,
    ) -> Self {
        self.callbacks.on_reorder = Some(Rc::new(on_reorder));
        self
    }

    pub fn set_items(&mut self, items: impl Into<Vec<ReorderListItem<T>>>, cx: &mut Context<Self>) {
        self.items = items.into();
        self.selected_ix = None;
        let surface = self.surface();
        self.controller.cancel(&surface);
        self.controller.take_damage();
        cx.notify();
    }

    pub fn items_ref(&self) -> &[ReorderListItem<T>] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_ix
    }

    pub fn set_selected_index(&mut self, ix: Option<usize>, cx: &mut Context<Self>) {
        self.selected_ix = ix;
        cx.notify();
    }

    pub fn is_item_drag_allowed(&self) -> bool {
        self.controller.allow_item_drag()
    }

    pub fn set_allow_item_drag(&mut self, allow: bool, cx: &mut Context<Self>) {
        self.controller.set_allow_item_drag(allow);
        cx.notify();
    }

    pub fn insertion_line_color_value(&self) -> Hsla {
        self.indicator_style.color
    }

    pub fn set_insertion_line_color(&mut self, color: Hsla, cx: &mut Context<Self>) {
        if self.indicator_style.color != color {
            self.indicator_style.color = color;
            self.insertion_line_color_changed.emit(&color);
            cx.notify();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Geometry of the rows as currently laid out and scrolled.
    pub(crate) fn surface(&self) -> UniformRows {
        let scroll_y = self.scroll_handle.0.borrow().base_handle.offset().y;
        UniformRows::new(self.list_bounds, self.row_height, scroll_y, self.items.len())
    }

    fn on_entry_click(
        &mut self,
        ix: usize,
        _event: &gpui::ClickEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.selected_ix = Some(ix);
        cx.notify();
    }

    pub(crate) fn on_mouse_down(
        &mut self,
        position: Point<Pixels>,
        button: MouseButton,
        _cx: &mut Context<Self>,
    ) {
        let surface = self.surface();
        self.controller.mouse_down(&surface, position, button);
    }

    pub(crate) fn on_mouse_move(
        &mut self,
        position: Point<Pixels>,
        left_held: bool,
        cx: &mut Context<Self>,
    ) {
        let surface = self.surface();
        if self.controller.is_dragging() {
            if surface.viewport().contains(&position) {
                self.controller.drag_over(&surface, position);
            } else {
                self.controller.drag_leave(&surface);
            }
            if !self.controller.take_damage().is_empty() {
                cx.notify();
            }
        } else if self.controller.mouse_move(position, left_held) {
            cx.notify();
        }
    }

    pub(crate) fn on_mouse_up(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        let surface = self.surface();
        if !self.controller.is_dragging() {
            // A plain click; drop the armed state.
            self.controller.cancel(&surface);
            return;
        }

        let command = self.controller.on_drop(&surface, position);
        let repaint = !self.controller.take_damage().is_empty();

        if let Some(command) = command {
            move_item(&mut self.items, command.from_ix, command.to_ix);
            self.selected_ix = Some(command.to_ix);
            cx.notify();

            if let Some(on_reorder) = self.callbacks.on_reorder.as_ref() {
                let reorder = Reorder {
                    item_id: self.items[command.to_ix].id.clone(),
                    from: command.from_ix,
                    to: command.to_ix,
                    mode: command.mode,
                };
                on_reorder(&reorder, &self.items);
            }
        } else if repaint {
            cx.notify();
        }
    }

    pub(crate) fn cancel_drag(&mut self, cx: &mut Context<Self>) {
        if self.controller.phase() == DragPhase::Idle {
            return;
        }
        let surface = self.surface();
        self.controller.cancel(&surface);
        if !self.controller.take_damage().is_empty() {
            cx.notify();
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) -> bool {
        match event.keystroke.key.as_str() {
            "escape" => {
                if self.controller.phase() != DragPhase::Idle {
                    self.cancel_drag(cx);
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}

impl<T: 'static> Render for ReorderListState<T> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let render_item = Rc::clone(&self.render_item);
        let row_height = self.row_height;
        let dragging_ix = self
            .controller
            .is_dragging()
            .then(|| self.controller.source_index())
            .flatten();
        let insertion = self
            .controller
            .is_dragging()
            .then(|| self.controller.insertion_target())
            .flatten();

        div()
            .id("reorder-list-state")
            .size_full()
            .relative()
            .child(
                uniform_list("items", self.items.len(), {
                    cx.processor(move |state, visible_range: Range<usize>, window, cx| {
                        let mut rows = Vec::with_capacity(visible_range.len());
                        for ix in visible_range {
                            let item = &state.items[ix];

                            let row_state = ReorderListRowState {
                                selected: Some(ix) == state.selected_ix,
                                dragging: dragging_ix == Some(ix),
                                insertion: insertion.filter(|t| t.ix == ix).map(|t| t.mode),
                            };

                            let list_item = (render_item)(ix, item, row_state, window, cx);
                            let is_disabled = item.is_disabled();

                            let row = div()
                                .id(ix)
                                .relative()
                                .h(row_height)
                                .child(list_item.disabled(is_disabled).selected(row_state.selected))
                                .when(!is_disabled, |this| {
                                    this.on_click(cx.listener(
                                        move |this, click_event, window, cx| {
                                            this.on_entry_click(ix, click_event, window, cx);
                                        },
                                    ))
                                });

                            rows.push(row);
                        }
                        rows
                    })
                })
                .flex_grow()
                .size_full()
                .track_scroll(self.scroll_handle.clone())
                .with_sizing_behavior(ListSizingBehavior::Auto)
                .into_any_element(),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .right_0()
                    .bottom_0()
                    .w(px(12.))
                    .child(Scrollbar::uniform_scroll(
                        &self.scrollbar_state,
                        &self.scroll_handle,
                    )),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .size_full()
                    .child(IndicatorOverlay::new(cx.entity())),
            )
    }
}

/// A selectable list element with pointer-driven drag reordering.
#[derive(IntoElement)]
pub struct ReorderList<T: 'static> {
    id: ElementId,
    state: Entity<ReorderListState<T>>,
    style: StyleRefinement,
    render_item: Rc<
        dyn Fn(usize, &ReorderListItem<T>, ReorderListRowState, &mut Window, &mut App) -> ListItem,
    >,
}

impl<T: 'static> ReorderList<T> {
    pub fn new<R>(state: &Entity<ReorderListState<T>>, render_item: R) -> Self
    where
        R: Fn(usize, &ReorderListItem<T>, ReorderListRowState, &mut Window, &mut App) -> ListItem
            + 'static,
    {
        Self {
            id: ElementId::Name(format!("reorder-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(move |ix, item, row_state, window, cx| {
                render_item(ix, item, row_state, window, cx)
            }),
        }
    }
}

impl<T: 'static> Styled for ReorderList<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for ReorderList<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        let state = self.state.clone();
        self.state
            .update(cx, |state, _| state.render_item = self.render_item);

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .size_full()
            .on_key_down(move |event, _window, cx| {
                state.update(cx, |state, cx| {
                    state.on_key_down(event, cx);
                });
            })
            .child(self.state)
            .refine_style(&self.style)
    }
}
