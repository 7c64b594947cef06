use gpui::{Bounds, MouseButton, Pixels, Point, Size, point, px, size};

use crate::events::{CancelHooks, Hooks, ItemDrag, ItemDragging};
use crate::insertion::{DropEffect, insertion_target_at, resolve_drop_index};
use crate::invalidate::{InvalidationTracker, indicator_region};
use crate::surface::ListSurface;
use crate::InsertionTarget;

/// Conventional pointer drag threshold: a 4x4 px box around the press.
const DEFAULT_DRAG_ZONE: Pixels = px(4.);

/// Lifecycle of a pointer-driven reorder gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Left button is down on the list; a drag starts once the pointer moves
    /// outside the drag zone and the host accepts the start request.
    Armed,
    Dragging,
}

/// The accepted outcome of a drop: remove the item at `from_ix`, insert it at
/// `to_ix`, and select it. Produced by [`DragController::on_drop`] and applied
/// by the host, which owns the item sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderCommand {
    pub from_ix: usize,
    pub to_ix: usize,
    pub mode: crate::InsertionMode,
}

/// Orchestrates the drag lifecycle for a single list.
///
/// The host forwards pointer events and supplies geometry through a
/// [`ListSurface`]; the controller tracks the session (origin, source index,
/// phase), recomputes the insertion target on drag-over, records dirty
/// regions for the indicator, and raises the two cancelable requests before a
/// drag starts and before a drop mutates anything. All of it runs
/// synchronously on the UI thread.
pub struct DragController {
    phase: DragPhase,
    origin: Point<Pixels>,
    source_ix: Option<usize>,
    insertion: Option<InsertionTarget>,
    allow_item_drag: bool,
    drag_zone: Size<Pixels>,
    invalidation: InvalidationTracker,

    /// Cancelable: a drag is about to start.
    pub item_dragging: CancelHooks<ItemDragging>,
    /// Cancelable: a drop is about to reorder the sequence.
    pub item_drag: CancelHooks<ItemDrag>,
    pub allow_item_drag_changed: Hooks<bool>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            origin: point(px(0.), px(0.)),
            source_ix: None,
            insertion: None,
            allow_item_drag: false,
            drag_zone: size(DEFAULT_DRAG_ZONE, DEFAULT_DRAG_ZONE),
            invalidation: InvalidationTracker::default(),
            item_dragging: CancelHooks::default(),
            item_drag: CancelHooks::default(),
            allow_item_drag_changed: Hooks::default(),
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn insertion_target(&self) -> Option<InsertionTarget> {
        self.insertion
    }

    /// The hit-tested index recorded at pointer-down; fixed for the session.
    pub fn source_index(&self) -> Option<usize> {
        self.source_ix
    }

    pub fn allow_item_drag(&self) -> bool {
        self.allow_item_drag
    }

    pub fn set_allow_item_drag(&mut self, value: bool) {
        if self.allow_item_drag != value {
            self.allow_item_drag = value;
            self.allow_item_drag_changed.emit(&value);
        }
    }

    pub fn set_drag_zone(&mut self, zone: Size<Pixels>) {
        self.drag_zone = zone;
    }

    /// Drain the dirty rectangles recorded since the last call.
    pub fn take_damage(&mut self) -> Vec<Bounds<Pixels>> {
        self.invalidation.take()
    }

    pub fn has_damage(&self) -> bool {
        !self.invalidation.is_empty()
    }

    /// Pointer-down. A left press arms a potential drag at `position`; any
    /// other button clears the armed state. A press arriving mid-drag ends
    /// that session first, so no insertion target can leak into the next
    /// gesture.
    pub fn mouse_down(
        &mut self,
        surface: &dyn ListSurface,
        position: Point<Pixels>,
        button: MouseButton,
    ) {
        if self.phase == DragPhase::Dragging {
            self.reset(surface);
        }
        if button == MouseButton::Left {
            self.phase = DragPhase::Armed;
            self.origin = position;
            self.source_ix = surface.index_at(position);
        } else {
            self.phase = DragPhase::Idle;
            self.origin = point(px(0.), px(0.));
            self.source_ix = None;
        }
    }

    /// Pointer-move while the left button is held. Returns `true` when a drag
    /// session just started, i.e. the pointer left the drag zone and the
    /// start request was not canceled. A canceled request leaves the session
    /// armed, so a later move may ask again.
    pub fn mouse_move(&mut self, position: Point<Pixels>, left_held: bool) -> bool {
        if !self.allow_item_drag
            || self.phase != DragPhase::Armed
            || !left_held
            || !self.outside_drag_zone(position)
        {
            return false;
        }
        let Some(source_ix) = self.source_ix else {
            // Armed over empty space; nothing to drag.
            return false;
        };
        if !self.item_dragging.emit(&ItemDragging { source_ix }) {
            return false;
        }
        self.phase = DragPhase::Dragging;
        true
    }

    /// Drag-over: recompute the insertion target for `position`. When the
    /// target changed, the old indicator region is invalidated before the
    /// update and the new one after; an unchanged target records nothing.
    pub fn drag_over(&mut self, surface: &dyn ListSurface, position: Point<Pixels>) -> DropEffect {
        if self.phase != DragPhase::Dragging {
            return DropEffect::None;
        }

        let (target, effect) = insertion_target_at(surface, position);
        if target != self.insertion {
            self.invalidation
                .push(self.insertion.and_then(|t| indicator_region(surface, t)));
            self.insertion = target;
            self.invalidation
                .push(target.and_then(|t| indicator_region(surface, t)));
        }
        effect
    }

    /// The pointer left the list while dragging: hide the indicator. The
    /// session itself stays active, so re-entering the list resumes drag-over
    /// and a later drop still completes the gesture.
    pub fn drag_leave(&mut self, surface: &dyn ListSurface) {
        if let Some(target) = self.insertion.take() {
            self.invalidation.push(indicator_region(surface, target));
        }
    }

    /// Drop. Runs the index remap, raises the cancelable completion request,
    /// and returns the command the host should apply. `None` means a
    /// rejected position, a no-op remap, or a canceled request. Whatever
    /// happens, the indicator region is invalidated, the target cleared, and
    /// the session returns to idle.
    pub fn on_drop(
        &mut self,
        surface: &dyn ListSurface,
        position: Point<Pixels>,
    ) -> Option<ReorderCommand> {
        if self.phase != DragPhase::Dragging {
            return None;
        }

        let mut command = None;
        if let (Some(target), Some(drag_ix)) = (self.insertion, self.source_ix) {
            let drop_ix = resolve_drop_index(drag_ix, target, surface.item_count());
            if drop_ix != drag_ix {
                let viewport = surface.viewport();
                let local = point(
                    position.x - viewport.origin.x,
                    position.y - viewport.origin.y,
                );
                let request = ItemDrag {
                    source_ix: drag_ix,
                    dest_ix: drop_ix,
                    mode: target.mode,
                    position: local,
                };
                if self.item_drag.emit(&request) {
                    command = Some(ReorderCommand {
                        from_ix: drag_ix,
                        to_ix: drop_ix,
                        mode: target.mode,
                    });
                }
            }
        }

        self.reset(surface);
        command
    }

    /// Abort the gesture from any phase (e.g. Escape), hiding the indicator.
    pub fn cancel(&mut self, surface: &dyn ListSurface) {
        self.reset(surface);
    }

    fn reset(&mut self, surface: &dyn ListSurface) {
        if let Some(target) = self.insertion.take() {
            self.invalidation.push(indicator_region(surface, target));
        }
        self.phase = DragPhase::Idle;
        self.origin = point(px(0.), px(0.));
        self.source_ix = None;
    }

    fn outside_drag_zone(&self, position: Point<Pixels>) -> bool {
        let zone = Bounds::new(
            point(
                self.origin.x - self.drag_zone.width / 2.,
                self.origin.y - self.drag_zone.height / 2.,
            ),
            self.drag_zone,
        );
        !zone.contains(&position)
    }
}
