//! Input areas and their per-event state machine.
//!
//! An [`InputArea`] is a rectangle that reacts to pointer, keyboard,
//! drag-and-drop and gesture input by emitting signals. Areas live in the
//! compositor's registry and are addressed by [`ObjectId`].
//!
//! # Pointer Signals
//!
//! For each pointer event an area emits at most one of these, checked in
//! order:
//!
//! 1. press inside while nobody holds the pointer: `start_mouse_focus`, then
//!    `mouse_down` (or `mouse_double_click`), then `start_focus` if the area
//!    did not have keyboard focus yet
//! 2. release while the area holds the pointer: `end_mouse_focus`, then
//!    `mouse_click` if the pointer is still inside, then `mouse_up`
//! 3. motion while the area holds the pointer: `mouse_drag`
//! 4. motion inside while nobody holds the pointer: `mouse_move`
//!
//! Hover (`mouse_enter`/`mouse_leave`) is tracked by the compositor across
//! all areas, so at most one area is hovered at a time.

use std::sync::Arc;

use nux_core::logging::targets;
use nux_core::{ObjectId, ObjectRegistry, Signal};

use super::event::{
    EventKind, InputEvent, KeyboardModifiers, MouseButton, MouseButtons, ProcessFlags,
    TraverseFlags,
};
use super::processor::{AreaEventProcessor, MouseSignals};
use super::routing::RoutingState;
use crate::geometry::{Point, Rect};
use crate::gesture::{GestureDeliveryRequest, GestureEvent, GestureSubscription};

/// What an area stands for in the window tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AreaKind {
    /// A plain input rectangle.
    #[default]
    Area,
    /// A widget that may contain other areas.
    View,
    /// A top-level window.
    Window,
}

/// Pointer position relative to the area, with button state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseArgs {
    pub x: f32,
    pub y: f32,
    pub button: Option<MouseButton>,
    pub buttons: MouseButtons,
    pub modifiers: KeyboardModifiers,
}

impl MouseArgs {
    pub(crate) fn new(area: &InputArea, event: &InputEvent) -> Self {
        let local = area.to_local(event.position);
        Self {
            x: local.x,
            y: local.y,
            button: event.button,
            buttons: event.buttons,
            modifiers: event.modifiers,
        }
    }
}

/// Pointer motion relative to the area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionArgs {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub buttons: MouseButtons,
    pub modifiers: KeyboardModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelArgs {
    pub x: f32,
    pub y: f32,
    pub delta: f32,
    pub modifiers: KeyboardModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyArgs {
    /// [`EventKind::KeyDown`] or [`EventKind::KeyUp`].
    pub kind: EventKind,
    pub key_code: u32,
    pub character: Option<char>,
    pub repeat_count: u32,
    pub modifiers: KeyboardModifiers,
}

/// Drag-and-drop position relative to the area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DndArgs {
    pub x: f32,
    pub y: f32,
}

/// Everything an area can tell application code.
#[derive(Debug, Default)]
pub struct AreaSignals {
    pub mouse_down: Signal<MouseArgs>,
    pub mouse_up: Signal<MouseArgs>,
    pub mouse_click: Signal<MouseArgs>,
    pub mouse_double_click: Signal<MouseArgs>,
    pub mouse_move: Signal<MotionArgs>,
    pub mouse_drag: Signal<MotionArgs>,
    pub mouse_enter: Signal<MouseArgs>,
    pub mouse_leave: Signal<MouseArgs>,
    pub mouse_wheel: Signal<WheelArgs>,
    /// A press landed outside an area that asked to hear about it.
    pub mouse_down_outside: Signal<MouseArgs>,
    pub start_mouse_focus: Signal<()>,
    pub end_mouse_focus: Signal<()>,
    /// Keyboard focus gained.
    pub start_focus: Signal<()>,
    /// Keyboard focus lost.
    pub end_focus: Signal<()>,
    pub key_pressed: Signal<KeyArgs>,
    pub key_released: Signal<KeyArgs>,
    /// Every key event, after `key_pressed` or `key_released`.
    pub key_event: Signal<KeyArgs>,
    pub dnd_enter: Signal<DndArgs>,
    pub dnd_leave: Signal<DndArgs>,
    pub dnd_move: Signal<DndArgs>,
    pub dnd_drop: Signal<DndArgs>,
    pub gesture_event: Signal<GestureEvent>,
}

/// The platform side of drag-and-drop.
pub trait DndPlatform {
    /// The drag moved onto an area that accepts drops.
    fn area_entered(&mut self, area: ObjectId);
    /// The drag left the area it was over.
    fn area_left(&mut self, area: ObjectId);
    /// The payload was dropped on `area`.
    fn drop_performed(&mut self, area: ObjectId, position: Point);
}

/// A [`DndPlatform`] that ignores everything.
#[derive(Debug, Default)]
pub struct NoDndPlatform;

impl DndPlatform for NoDndPlatform {
    fn area_entered(&mut self, _area: ObjectId) {}
    fn area_left(&mut self, _area: ObjectId) {}
    fn drop_performed(&mut self, _area: ObjectId, _position: Point) {}
}

/// A rectangle that reacts to input.
#[derive(Debug)]
pub struct InputArea {
    kind: AreaKind,
    geometry: Rect,
    visible: bool,
    enabled: bool,
    pub(crate) has_keyboard_focus: bool,
    capture_mouse_down_anywhere_else: bool,
    double_click_enabled: bool,
    accepts_drops: bool,
    gesture_subscriptions: Vec<GestureSubscription>,
    gesture_exclusivity: bool,
    pub(crate) processor: AreaEventProcessor,
    signals: Arc<AreaSignals>,
}

impl InputArea {
    /// Creates a visible, enabled area.
    pub fn new(kind: AreaKind, geometry: Rect) -> Self {
        Self {
            kind,
            geometry,
            visible: true,
            enabled: true,
            has_keyboard_focus: false,
            capture_mouse_down_anywhere_else: false,
            double_click_enabled: false,
            accepts_drops: false,
            gesture_subscriptions: Vec::new(),
            gesture_exclusivity: false,
            processor: AreaEventProcessor::new(),
            signals: Arc::new(AreaSignals::default()),
        }
    }

    #[inline]
    pub fn kind(&self) -> AreaKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: AreaKind) {
        self.kind = kind;
    }

    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    pub fn is_point_inside(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }

    /// Converts window coordinates to area coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.geometry.x, point.y - self.geometry.y)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn has_keyboard_focus(&self) -> bool {
        self.has_keyboard_focus
    }

    /// Whether the area holds the pointer.
    #[inline]
    pub fn has_mouse_focus(&self) -> bool {
        self.processor.has_mouse_focus()
    }

    /// Whether the last pointer event seen by the area was inside it.
    #[inline]
    pub fn is_mouse_inside(&self) -> bool {
        self.processor.is_mouse_inside()
    }

    /// Ask for `mouse_down_outside` when a press lands anywhere else.
    pub fn set_capture_mouse_down_anywhere_else(&mut self, capture: bool) {
        self.capture_mouse_down_anywhere_else = capture;
    }

    pub fn is_capture_mouse_down_anywhere_else(&self) -> bool {
        self.capture_mouse_down_anywhere_else
    }

    /// Report second presses as `mouse_double_click` instead of `mouse_down`.
    pub fn set_double_click_enabled(&mut self, enabled: bool) {
        self.double_click_enabled = enabled;
    }

    pub fn is_double_click_enabled(&self) -> bool {
        self.double_click_enabled
    }

    pub fn set_accepts_drops(&mut self, accepts: bool) {
        self.accepts_drops = accepts;
    }

    pub fn accepts_drops(&self) -> bool {
        self.accepts_drops
    }

    pub fn add_gesture_subscription(&mut self, subscription: GestureSubscription) {
        self.gesture_subscriptions.push(subscription);
    }

    pub fn clear_gesture_subscriptions(&mut self) {
        self.gesture_subscriptions.clear();
    }

    pub fn gesture_subscriptions(&self) -> &[GestureSubscription] {
        &self.gesture_subscriptions
    }

    pub fn gesture_subscriptions_mut(&mut self) -> &mut [GestureSubscription] {
        &mut self.gesture_subscriptions
    }

    /// Whether any active subscription matches `event`.
    pub fn wants_gesture(&self, event: &GestureEvent) -> bool {
        self.gesture_subscriptions.iter().any(|s| s.matches(event))
    }

    /// Claim gestures exclusively once they are delivered.
    pub fn set_gesture_exclusivity(&mut self, exclusive: bool) {
        self.gesture_exclusivity = exclusive;
    }

    pub fn gesture_exclusivity(&self) -> bool {
        self.gesture_exclusivity
    }

    #[inline]
    pub fn signals(&self) -> &Arc<AreaSignals> {
        &self.signals
    }

    /// Emits `gesture_event` and answers with the area's delivery request.
    pub fn handle_gesture_event(&self, event: &GestureEvent) -> GestureDeliveryRequest {
        self.signals.gesture_event.emit(event.clone());
        if self.gesture_exclusivity {
            GestureDeliveryRequest::Exclusivity
        } else {
            GestureDeliveryRequest::None
        }
    }
}

/// Mutable routing state an area needs while it processes an event.
pub(crate) struct AreaContext<'a> {
    pub(crate) areas: &'a mut ObjectRegistry<InputArea>,
    pub(crate) routing: &'a mut RoutingState,
    pub(crate) dnd: &'a mut dyn DndPlatform,
    pub(crate) drag_threshold: f32,
}

/// Whether exclusive input mode keeps `id` from seeing an event.
pub(crate) fn is_excluded(
    areas: &ObjectRegistry<InputArea>,
    routing: &RoutingState,
    id: ObjectId,
    kind: EventKind,
    process: ProcessFlags,
) -> bool {
    if kind.is_dnd() || process.contains(ProcessFlags::CYCLE_EXCLUSIVE) {
        return false;
    }
    match routing.exclusive_area {
        Some(exclusive) => !areas.is_ancestor_of(exclusive, id),
        None => false,
    }
}

/// Runs one area's state machine for `event` and returns the updated
/// traversal flags.
pub(crate) fn process_area_event(
    cx: &mut AreaContext<'_>,
    id: ObjectId,
    event: &InputEvent,
    traverse: TraverseFlags,
    process: ProcessFlags,
) -> TraverseFlags {
    let Some(area) = cx.areas.get(id) else {
        tracing::trace!(target: targets::INPUT, area = ?id, "event for destroyed area");
        return traverse;
    };
    if !area.visible || !area.enabled {
        return traverse;
    }
    if is_excluded(cx.areas, cx.routing, id, event.kind, process) {
        return traverse;
    }

    if event.kind.is_dnd() {
        return process_dnd_event(cx, id, event, traverse);
    }

    let mut ret = traverse;
    if event.kind.is_mouse() {
        ret = process_mouse_event(cx, id, event, ret, process);
    }
    if event.kind.is_key() {
        ret = process_key_event(cx, id, event, ret);
    }
    ret
}

fn process_mouse_event(
    cx: &mut AreaContext<'_>,
    id: ObjectId,
    event: &InputEvent,
    traverse: TraverseFlags,
    process: ProcessFlags,
) -> TraverseFlags {
    let is_press = event.kind == EventKind::MouseDown;

    if process.contains(ProcessFlags::DO_NOT_PROCESS) || traverse.contains(TraverseFlags::MOUSE_EVENT_SOLVED) {
        let Some(area) = cx.areas.get_mut(id) else {
            return traverse;
        };
        let geometry = area.geometry;
        area.processor.process_mouse_in_out(event, &geometry);
        if cx.routing.mouse_owner != Some(id) {
            area.processor.set_mouse_focus(false);
        }
        let inside = area.processor.is_mouse_inside();
        if is_press {
            press_elsewhere(cx, id, event, inside);
        }
        if event.kind == EventKind::WindowExitFocus {
            cx.routing.lose_key_focus(cx.areas, id);
        }
        return traverse;
    }

    let Some(area) = cx.areas.get_mut(id) else {
        return traverse;
    };
    let geometry = area.geometry;
    let mouse_signals = area.processor.process(event, &geometry, true, cx.drag_threshold);
    let inside = area.processor.is_mouse_inside();
    let holds_pointer = area.processor.has_mouse_focus();
    let had_keyboard_focus = area.has_keyboard_focus;
    let double_click = event.double_click && area.double_click_enabled;
    let delta = area.processor.delta();
    let args = MouseArgs::new(area, event);
    let signals = Arc::clone(&area.signals);

    let motion = MotionArgs {
        x: args.x,
        y: args.y,
        dx: delta.x,
        dy: delta.y,
        buttons: event.buttons,
        modifiers: event.modifiers,
    };

    let mut ret = traverse;
    let owner = cx.routing.mouse_owner;

    if mouse_signals.contains(MouseSignals::DOWN) {
        if owner.is_none() {
            cx.routing.mouse_owner = Some(id);
            tracing::debug!(target: targets::FOCUS, area = ?id, "mouse focus acquired");
            signals.start_mouse_focus.emit(());
            if double_click {
                signals.mouse_double_click.emit(args);
            } else {
                signals.mouse_down.emit(args);
            }
            if !had_keyboard_focus {
                cx.routing.set_key_focus(cx.areas, Some(id));
            }
            ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
        } else if owner != Some(id) {
            // Another area holds the pointer; this press is not ours.
            if let Some(area) = cx.areas.get_mut(id) {
                area.processor.set_mouse_focus(false);
            }
        }
    } else if mouse_signals.contains(MouseSignals::UP) {
        tracing::debug!(target: targets::FOCUS, area = ?id, "mouse focus released");
        signals.end_mouse_focus.emit(());
        if inside {
            signals.mouse_click.emit(args);
        }
        signals.mouse_up.emit(args);
        if owner == Some(id) {
            cx.routing.mouse_owner = None;
        }
        ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
    } else if mouse_signals.contains(MouseSignals::MOVE) && holds_pointer {
        signals.mouse_drag.emit(motion);
        ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
    } else if event.kind == EventKind::MouseMove && holds_pointer {
        // Held but still under the drag threshold
        ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
    } else if mouse_signals.contains(MouseSignals::MOVE) && owner.is_none() && inside {
        signals.mouse_move.emit(motion);
        ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
    } else if mouse_signals.contains(MouseSignals::WHEEL) {
        signals.mouse_wheel.emit(WheelArgs {
            x: args.x,
            y: args.y,
            delta: event.wheel_delta,
            modifiers: event.modifiers,
        });
        ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
    }

    if is_press && !mouse_signals.contains(MouseSignals::DOWN) {
        press_elsewhere(cx, id, event, inside);
    }
    if event.kind == EventKind::WindowExitFocus {
        cx.routing.lose_key_focus(cx.areas, id);
    }
    // An area under the pointer solves the event unless another area holds
    // the pointer.
    if inside && cx.routing.mouse_owner.is_none() {
        ret |= TraverseFlags::MOUSE_EVENT_SOLVED;
    }
    ret
}

/// A press that did not land on `id`.
fn press_elsewhere(cx: &mut AreaContext<'_>, id: ObjectId, event: &InputEvent, inside: bool) {
    let Some(area) = cx.areas.get(id) else {
        return;
    };
    if area.capture_mouse_down_anywhere_else && !inside {
        let args = MouseArgs::new(area, event);
        let signals = Arc::clone(&area.signals);
        signals.mouse_down_outside.emit(args);
    }
    cx.routing.lose_key_focus(cx.areas, id);
}

fn process_key_event(
    cx: &mut AreaContext<'_>,
    id: ObjectId,
    event: &InputEvent,
    traverse: TraverseFlags,
) -> TraverseFlags {
    let Some(area) = cx.areas.get(id) else {
        return traverse;
    };
    let grabbed = cx.routing.keyboard_grab_area() == Some(id);
    if !area.has_keyboard_focus && !grabbed {
        return traverse;
    }

    let args = KeyArgs {
        kind: event.kind,
        key_code: event.key_code,
        character: event.character,
        repeat_count: event.repeat_count,
        modifiers: event.modifiers,
    };
    let signals = Arc::clone(&area.signals);
    tracing::trace!(target: targets::INPUT, area = ?id, key_code = event.key_code, kind = ?event.kind, "key event");
    match event.kind {
        EventKind::KeyDown => signals.key_pressed.emit(args),
        _ => signals.key_released.emit(args),
    }
    signals.key_event.emit(args);
    traverse | TraverseFlags::KEY_EVENT_SOLVED
}

fn process_dnd_event(
    cx: &mut AreaContext<'_>,
    id: ObjectId,
    event: &InputEvent,
    traverse: TraverseFlags,
) -> TraverseFlags {
    let Some(area) = cx.areas.get(id) else {
        return traverse;
    };
    if !area.accepts_drops {
        return traverse;
    }
    let inside = area.geometry.contains(event.position);
    let local = area.to_local(event.position);
    let args = DndArgs {
        x: local.x,
        y: local.y,
    };
    let signals = Arc::clone(&area.signals);
    let current = cx.routing.dnd_area;
    let solved = traverse.contains(TraverseFlags::MOUSE_EVENT_SOLVED);

    match event.kind {
        EventKind::DndMove => {
            if inside && !solved {
                if current != Some(id) {
                    if let Some(previous) = current {
                        leave_dnd_area(cx, previous, event);
                    }
                    cx.routing.dnd_area = Some(id);
                    tracing::debug!(target: targets::DND, area = ?id, "drag entered area");
                    signals.dnd_enter.emit(args);
                    cx.dnd.area_entered(id);
                }
                signals.dnd_move.emit(args);
                return traverse | TraverseFlags::MOUSE_EVENT_SOLVED;
            }
            if current == Some(id) {
                leave_dnd_area(cx, id, event);
            }
            traverse
        }
        EventKind::DndDrop if current == Some(id) => {
            tracing::debug!(target: targets::DND, area = ?id, "drop");
            cx.routing.dnd_area = None;
            signals.dnd_drop.emit(args);
            cx.dnd.drop_performed(id, event.position);
            traverse | TraverseFlags::MOUSE_EVENT_SOLVED
        }
        _ => traverse,
    }
}

pub(crate) fn leave_dnd_area(cx: &mut AreaContext<'_>, id: ObjectId, event: &InputEvent) {
    if cx.routing.dnd_area == Some(id) {
        cx.routing.dnd_area = None;
    }
    let Some(area) = cx.areas.get(id) else {
        return;
    };
    let local = area.to_local(event.position);
    let signals = Arc::clone(&area.signals);
    tracing::debug!(target: targets::DND, area = ?id, "drag left area");
    signals.dnd_leave.emit(DndArgs {
        x: local.x,
        y: local.y,
    });
    cx.dnd.area_left(id);
}
