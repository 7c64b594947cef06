use gpui::{
    App, Bounds, Element, ElementId, Entity, GlobalElementId, Hitbox, HitboxBehavior,
    InspectorElementId, IntoElement, LayoutId, MouseButton, MouseDownEvent, MouseMoveEvent,
    MouseUpEvent, Path, Pixels, Window, fill, point, size,
};
use gpui_reorder_core::indicator_shape;

use crate::list::ReorderListState;

/// Absolute-positioned overlay that paints the insertion indicator above the
/// rows and feeds raw pointer events into the drag state machine.
///
/// The native drag-and-drop mechanism starts a drag unconditionally on the
/// first qualifying move, but here both the start and the drop have to be
/// cancelable, so the gesture is tracked from plain mouse events instead.
pub(crate) struct IndicatorOverlay<T: 'static> {
    state: Entity<ReorderListState<T>>,
}

impl<T: 'static> IndicatorOverlay<T> {
    pub(crate) fn new(state: Entity<ReorderListState<T>>) -> Self {
        Self { state }
    }
}

impl<T: 'static> IntoElement for IndicatorOverlay<T> {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl<T: 'static> Element for IndicatorOverlay<T> {
    type RequestLayoutState = ();
    type PrepaintState = Hitbox;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = gpui::Style::default();
        style.size.width = gpui::relative(1.).into();
        style.size.height = gpui::relative(1.).into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        self.state.update(cx, |state, _| {
            state.list_bounds = bounds;
        });
        // A normal hitbox only answers hover queries; rows underneath keep
        // receiving their click events.
        window.insert_hitbox(bounds, HitboxBehavior::Normal)
    }

    fn paint(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        self.paint_indicator(window, cx);

        window.on_mouse_event({
            let state = self.state.clone();
            let hitbox = prepaint.clone();
            move |event: &MouseDownEvent, phase, window, cx| {
                if !phase.bubble() || !hitbox.is_hovered(window) {
                    return;
                }
                state.update(cx, |this, cx| {
                    this.on_mouse_down(event.position, event.button, cx);
                });
            }
        });

        // Drag tracking must keep working outside the list bounds, so moves
        // and releases are not gated on the hitbox.
        window.on_mouse_event({
            let state = self.state.clone();
            move |event: &MouseMoveEvent, phase, _window, cx| {
                if !phase.bubble() {
                    return;
                }
                let left_held = event.pressed_button == Some(MouseButton::Left);
                state.update(cx, |this, cx| {
                    this.on_mouse_move(event.position, left_held, cx);
                });
            }
        });

        window.on_mouse_event({
            let state = self.state.clone();
            move |event: &MouseUpEvent, phase, _window, cx| {
                if !phase.bubble() || event.button != MouseButton::Left {
                    return;
                }
                state.update(cx, |this, cx| {
                    this.on_mouse_up(event.position, cx);
                });
            }
        });
    }
}

impl<T: 'static> IndicatorOverlay<T> {
    fn paint_indicator(&self, window: &mut Window, cx: &mut App) {
        let state = self.state.read(cx);
        if !state.controller.is_dragging() {
            return;
        }
        let Some(target) = state.controller.insertion_target() else {
            return;
        };

        let style = state.indicator_style;
        let surface = state.surface();
        let Some(shape) = indicator_shape(&surface, target, style.arrow_size) else {
            return;
        };

        let line = Bounds::new(
            point(shape.start.x, shape.start.y - style.thickness / 2.),
            size(
                shape.end.x - shape.start.x + gpui::px(1.),
                style.thickness,
            ),
        );
        window.paint_quad(fill(line, style.color));

        for triangle in [shape.start_arrow, shape.end_arrow] {
            let mut path = Path::new(triangle[0]);
            path.line_to(triangle[1]);
            path.line_to(triangle[2]);
            window.paint_path(path, style.color);
        }
    }
}
