//! Per-window input routing.
//!
//! The [`WindowCompositor`] owns every [`InputArea`] of a window tree, the
//! routing state that says which area holds each input resource, and the
//! [`GestureBroker`]. Platform events enter through
//! [`WindowCompositor::process_event`] and recognizer events through
//! [`WindowCompositor::dispatch_gesture_event`].
//!
//! # Dispatch Order
//!
//! Mouse events are offered to areas front to back: windows front-most
//! first (only the top modal window while one is open), and within a window
//! children front-most first, each before its parent. A pointer grab or a
//! held pointer short-circuits the traversal. Keyboard events go to the top
//! of the keyboard grab stack, or else to the keyboard focus owner.
//!
//! # Example
//!
//! ```
//! use nux::geometry::Rect;
//! use nux::input::{AreaKind, InputArea, InputEvent, MouseButton, WindowCompositor};
//!
//! let mut compositor = WindowCompositor::new();
//! let window = compositor.add_window(InputArea::new(AreaKind::Window, Rect::new(0.0, 0.0, 200.0, 200.0)));
//! let button = compositor
//!     .add_area(window, InputArea::new(AreaKind::Area, Rect::new(10.0, 10.0, 50.0, 20.0)))
//!     .unwrap();
//!
//! compositor.process_event(&InputEvent::mouse_down(20.0, 15.0, MouseButton::Left));
//! assert_eq!(compositor.mouse_focus_area(), Some(button));
//! assert_eq!(compositor.key_focus_area(), Some(button));
//! ```

use std::fmt;
use std::sync::Arc;

use nux_core::logging::targets;
use nux_core::{ObjectId, ObjectRegistry, RegistryTreeDebug, ThreadAffinity};
use parking_lot::Mutex;

use super::area::{
    AreaContext, AreaKind, DndPlatform, InputArea, NoDndPlatform, is_excluded, leave_dnd_area,
    process_area_event,
};
use super::click::ClickTracker;
use super::event::{EventKind, InputEvent, ProcessFlags, TraverseFlags};
use super::routing::RoutingState;
use crate::config::InputConfig;
use crate::error::Result;
use crate::geometry::Point;
use crate::gesture::{
    GestureBroker, GestureDeliveryRequest, GestureEvent, GestureEventKind, GestureTarget,
    GestureTargetHost,
};

/// Queues areas for destruction from inside signal handlers.
///
/// Handlers run while the compositor is dispatching and cannot reach it
/// mutably. Queued areas are destroyed once the current dispatch returns.
#[derive(Debug, Clone, Default)]
pub struct AreaDestroyer {
    queue: Arc<Mutex<Vec<ObjectId>>>,
}

impl AreaDestroyer {
    pub fn destroy_later(&self, area: ObjectId) {
        self.queue.lock().push(area);
    }

    fn take(&self) -> Vec<ObjectId> {
        std::mem::take(&mut *self.queue.lock())
    }
}

/// Input arbiter of one window tree.
pub struct WindowCompositor {
    areas: ObjectRegistry<InputArea>,
    routing: RoutingState,
    broker: GestureBroker,
    config: InputConfig,
    clicks: ClickTracker,
    /// Front-most first.
    windows: Vec<ObjectId>,
    modal_windows: Vec<ObjectId>,
    dnd: Box<dyn DndPlatform>,
    thread_affinity: ThreadAffinity,
    torn_down: bool,
    destroyer: AreaDestroyer,
}

impl WindowCompositor {
    /// Creates a compositor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            areas: ObjectRegistry::new(),
            routing: RoutingState::new(),
            broker: GestureBroker::new(),
            clicks: ClickTracker::new(&config),
            config,
            windows: Vec::new(),
            modal_windows: Vec::new(),
            dnd: Box::new(NoDndPlatform),
            thread_affinity: ThreadAffinity::current(),
            torn_down: false,
            destroyer: AreaDestroyer::default(),
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Replaces the platform side of drag-and-drop.
    pub fn set_dnd_platform(&mut self, platform: Box<dyn DndPlatform>) {
        self.dnd = platform;
    }

    // =========================================================================
    // Areas and windows
    // =========================================================================

    pub fn areas(&self) -> &ObjectRegistry<InputArea> {
        &self.areas
    }

    pub fn area(&self, id: ObjectId) -> Option<&InputArea> {
        self.areas.get(id)
    }

    pub fn area_mut(&mut self, id: ObjectId) -> Option<&mut InputArea> {
        self.areas.get_mut(id)
    }

    /// Registers a top-level window in front of the others.
    pub fn add_window(&mut self, mut window: InputArea) -> ObjectId {
        window.set_kind(AreaKind::Window);
        let id = self.areas.insert(window);
        self.windows.insert(0, id);
        tracing::debug!(target: targets::INPUT, window = ?id, "window added");
        id
    }

    /// Adds `area` in front of `parent`'s other children.
    pub fn add_area(&mut self, parent: ObjectId, area: InputArea) -> Result<ObjectId> {
        Ok(self.areas.insert_child(parent, area)?)
    }

    /// Destroys `id` and its subtree, dropping every reference to them.
    ///
    /// Returns the destroyed ids.
    pub fn destroy_area(&mut self, id: ObjectId) -> Result<Vec<ObjectId>> {
        let destroyed = self.areas.destroy(id)?;
        tracing::debug!(target: targets::INPUT, area = ?id, count = destroyed.len(), "areas destroyed");

        if let Some(dnd_area) = self.routing.dnd_area
            && destroyed.contains(&dnd_area)
        {
            self.dnd.area_left(dnd_area);
        }
        self.routing.forget(|id| destroyed.contains(&id));
        self.windows.retain(|id| !destroyed.contains(id));
        self.modal_windows.retain(|id| !destroyed.contains(id));
        for &dead in &destroyed {
            self.broker.target_destroyed(GestureTarget::Area(dead));
        }
        Ok(destroyed)
    }

    /// A handle that destroys areas once the current dispatch is over.
    pub fn area_destroyer(&self) -> AreaDestroyer {
        self.destroyer.clone()
    }

    /// Registered windows, front-most first.
    pub fn windows(&self) -> &[ObjectId] {
        &self.windows
    }

    pub fn move_window_to_front(&mut self, window: ObjectId) -> bool {
        let Some(index) = self.windows.iter().position(|&id| id == window) else {
            return false;
        };
        let id = self.windows.remove(index);
        self.windows.insert(0, id);
        true
    }

    pub fn move_window_to_back(&mut self, window: ObjectId) -> bool {
        let Some(index) = self.windows.iter().position(|&id| id == window) else {
            return false;
        };
        let id = self.windows.remove(index);
        self.windows.push(id);
        true
    }

    /// Makes `window` the only window receiving mouse events until it is
    /// stopped. Modal windows stack.
    pub fn start_modal_window(&mut self, window: ObjectId) -> bool {
        if !self.windows.contains(&window) {
            return false;
        }
        self.modal_windows.push(window);
        self.move_window_to_front(window);
        tracing::debug!(target: targets::FOCUS, window = ?window, "modal window started");
        true
    }

    pub fn stop_modal_window(&mut self, window: ObjectId) -> bool {
        match self.modal_windows.iter().rposition(|&id| id == window) {
            Some(index) => {
                self.modal_windows.remove(index);
                tracing::debug!(target: targets::FOCUS, window = ?window, "modal window stopped");
                true
            }
            None => false,
        }
    }

    /// The window receiving mouse events exclusively, if any.
    pub fn modal_window(&self) -> Option<ObjectId> {
        self.modal_windows.last().copied()
    }

    /// Text dump of the area tree for debugging.
    pub fn dump_area_tree(&self) -> Result<String> {
        let dump = RegistryTreeDebug::new().format_all(&self.areas, |area| {
            format!("{:?} {:?}", area.kind(), area.geometry())
        })?;
        Ok(dump)
    }

    // =========================================================================
    // Routing state
    // =========================================================================

    pub fn routing(&self) -> &RoutingState {
        &self.routing
    }

    /// The area holding the pointer.
    pub fn mouse_focus_area(&self) -> Option<ObjectId> {
        self.routing.mouse_owner()
    }

    /// Hands the pointer to `area`, or frees it with `None`.
    ///
    /// Returns `false` if `area` is dead.
    pub fn set_mouse_focus_area(&mut self, area: Option<ObjectId>) -> bool {
        if let Some(id) = area
            && !self.areas.contains(id)
        {
            return false;
        }
        if let Some(previous) = self.routing.mouse_owner
            && area != Some(previous)
            && let Some(old) = self.areas.get_mut(previous)
        {
            old.processor.set_mouse_focus(false);
        }
        if let Some(id) = area
            && let Some(new) = self.areas.get_mut(id)
        {
            new.processor.set_mouse_focus(true);
        }
        self.routing.mouse_owner = area;
        tracing::debug!(target: targets::FOCUS, area = ?area, "mouse focus set");
        true
    }

    /// The area under the pointer.
    pub fn mouse_over_area(&self) -> Option<ObjectId> {
        self.routing.mouse_over()
    }

    pub fn key_focus_area(&self) -> Option<ObjectId> {
        self.routing.key_focus()
    }

    /// Moves keyboard focus to `area`.
    ///
    /// The previous owner receives `end_focus` before `area` receives
    /// `start_focus`. Returns `false` and changes nothing if `area` is dead or
    /// already focused. `None` takes focus away and returns `false`.
    pub fn set_key_focus_area(&mut self, area: Option<ObjectId>) -> bool {
        self.routing.set_key_focus(&mut self.areas, area)
    }

    pub fn dnd_area(&self) -> Option<ObjectId> {
        self.routing.dnd_area()
    }

    /// Sets the drag-and-drop target, telling the platform about the change.
    ///
    /// Returns `false` if `area` is dead.
    pub fn set_dnd_area(&mut self, area: Option<ObjectId>) -> bool {
        if let Some(id) = area
            && !self.areas.contains(id)
        {
            return false;
        }
        let previous = self.routing.dnd_area;
        if previous == area {
            return true;
        }
        if let Some(old) = previous {
            self.dnd.area_left(old);
        }
        self.routing.dnd_area = area;
        if let Some(new) = area {
            self.dnd.area_entered(new);
        }
        true
    }

    /// Grabs the pointer for `area`. Fails if `area` is dead or already on
    /// top of the grab stack.
    pub fn grab_pointer_add(&mut self, area: ObjectId) -> bool {
        if !self.areas.contains(area) {
            return false;
        }
        let pushed = self.routing.pointer_grabs.push(area);
        tracing::debug!(target: targets::FOCUS, area = ?area, pushed, "pointer grab");
        pushed
    }

    /// Releases the topmost pointer grab held by `area`.
    pub fn grab_pointer_remove(&mut self, area: ObjectId) -> bool {
        let removed = self.routing.pointer_grabs.remove(area);
        tracing::debug!(target: targets::FOCUS, area = ?area, removed, "pointer grab released");
        removed
    }

    pub fn pointer_grab_area(&self) -> Option<ObjectId> {
        self.routing.pointer_grab_area()
    }

    pub fn grab_keyboard_add(&mut self, area: ObjectId) -> bool {
        if !self.areas.contains(area) {
            return false;
        }
        let pushed = self.routing.keyboard_grabs.push(area);
        tracing::debug!(target: targets::FOCUS, area = ?area, pushed, "keyboard grab");
        pushed
    }

    pub fn grab_keyboard_remove(&mut self, area: ObjectId) -> bool {
        let removed = self.routing.keyboard_grabs.remove(area);
        tracing::debug!(target: targets::FOCUS, area = ?area, removed, "keyboard grab released");
        removed
    }

    pub fn keyboard_grab_area(&self) -> Option<ObjectId> {
        self.routing.keyboard_grab_area()
    }

    /// Restricts input to `area` and its descendants, or lifts the
    /// restriction with `None`. Drag-and-drop is never restricted.
    pub fn set_exclusive_input_area(&mut self, area: Option<ObjectId>) -> bool {
        if let Some(id) = area
            && !self.areas.contains(id)
        {
            return false;
        }
        self.routing.exclusive_area = area;
        tracing::debug!(target: targets::FOCUS, area = ?area, "exclusive input area");
        true
    }

    pub fn exclusive_input_area(&self) -> Option<ObjectId> {
        self.routing.exclusive_area()
    }

    /// Makes `area` hold the pointer as if it had been pressed at `(x, y)`.
    ///
    /// A previous holder is released first.
    pub fn force_start_focus(&mut self, area: ObjectId, x: f32, y: f32) -> bool {
        if !self.areas.contains(area) {
            return false;
        }
        if let Some(previous) = self.routing.mouse_owner
            && previous != area
        {
            self.release_mouse_owner(previous);
        }
        let Some(target) = self.areas.get_mut(area) else {
            return false;
        };
        let geometry = target.geometry();
        target.processor.force_mouse_focus(Point::new(x, y), &geometry);
        let signals = Arc::clone(target.signals());
        self.routing.mouse_owner = Some(area);
        tracing::debug!(target: targets::FOCUS, area = ?area, x, y, "mouse focus forced on");
        signals.start_mouse_focus.emit(());
        true
    }

    /// Releases a hold on the pointer with the pointer at `(x, y)`.
    pub fn force_stop_focus(&mut self, area: ObjectId, x: f32, y: f32) -> bool {
        let Some(target) = self.areas.get_mut(area) else {
            return false;
        };
        let geometry = target.geometry();
        target
            .processor
            .process_mouse_in_out(&InputEvent::mouse_move(x, y), &geometry);
        tracing::debug!(target: targets::FOCUS, area = ?area, x, y, "mouse focus forced off");
        self.release_mouse_owner(area);
        true
    }

    fn release_mouse_owner(&mut self, area: ObjectId) {
        if self.routing.mouse_owner == Some(area) {
            self.routing.mouse_owner = None;
        }
        let Some(target) = self.areas.get_mut(area) else {
            return;
        };
        target.processor.stop_mouse_focus();
        let signals = Arc::clone(target.signals());
        signals.end_mouse_focus.emit(());
    }

    /// Drops the mouse owner without notifying it. A release always ends the
    /// hold, whether or not the owner handled it.
    fn clear_mouse_owner(&mut self) {
        let Some(owner) = self.routing.mouse_owner.take() else {
            return;
        };
        if let Some(area) = self.areas.get_mut(owner) {
            area.processor.set_mouse_focus(false);
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Routes one platform event.
    pub fn process_event(&mut self, event: &InputEvent) {
        self.process_event_with(event, ProcessFlags::NONE);
    }

    #[tracing::instrument(skip_all, target = "nux::input", level = "trace", fields(kind = ?event.kind))]
    pub fn process_event_with(&mut self, event: &InputEvent, flags: ProcessFlags) {
        self.thread_affinity.debug_assert_same_thread();
        if self.torn_down {
            tracing::trace!(target: targets::INPUT, "event after teardown dropped");
            return;
        }

        if event.kind.is_dnd() {
            self.dispatch_dnd_event(event, flags);
        } else if event.kind.is_key() {
            self.dispatch_key_event(event, flags);
        } else {
            self.dispatch_mouse_event(event, flags);
        }
        self.drain_destroy_queue();
    }

    fn deliver(
        &mut self,
        id: ObjectId,
        event: &InputEvent,
        traverse: TraverseFlags,
        flags: ProcessFlags,
    ) -> TraverseFlags {
        let mut cx = AreaContext {
            areas: &mut self.areas,
            routing: &mut self.routing,
            dnd: &mut *self.dnd,
            drag_threshold: self.config.drag_threshold,
        };
        process_area_event(&mut cx, id, event, traverse, flags)
    }

    /// Mouse traversal roots: the modal window, or every visible window.
    fn traversal_roots(&self) -> Vec<ObjectId> {
        if let Some(modal) = self.modal_window() {
            return vec![modal];
        }
        self.windows
            .iter()
            .copied()
            .filter(|&id| self.areas.get(id).is_some_and(InputArea::is_visible))
            .collect()
    }

    /// Children front-most first, each subtree before its root. Hidden
    /// subtrees are skipped.
    fn traversal_order(&self, root: ObjectId) -> Vec<ObjectId> {
        let mut order = Vec::new();
        self.collect_traversal_order(root, &mut order);
        order
    }

    fn collect_traversal_order(&self, id: ObjectId, order: &mut Vec<ObjectId>) {
        if !self.areas.get(id).is_some_and(InputArea::is_visible) {
            return;
        }
        if let Ok(children) = self.areas.children(id) {
            for &child in children.iter().rev() {
                self.collect_traversal_order(child, order);
            }
        }
        order.push(id);
    }

    fn is_hover_candidate(&self, id: ObjectId, event: &InputEvent, flags: ProcessFlags) -> bool {
        self.areas.get(id).is_some_and(|area| {
            area.is_visible() && area.is_enabled() && area.is_point_inside(event.position)
        }) && !is_excluded(&self.areas, &self.routing, id, event.kind, flags)
    }

    fn dispatch_mouse_event(&mut self, event: &InputEvent, flags: ProcessFlags) {
        if event.kind == EventKind::WindowExitFocus {
            self.window_exit_focus(event, flags);
            return;
        }

        let mut event = event.clone();
        if event.kind == EventKind::MouseDown
            && !event.double_click
            && let Some(button) = event.button
        {
            event.double_click = self.clicks.register_press(button, event.position, event.timestamp);
        }

        if let Some(grab) = self.routing.pointer_grab_area()
            && self.areas.contains(grab)
        {
            tracing::trace!(target: targets::INPUT, area = ?grab, "pointer grabbed");
            self.deliver(grab, &event, TraverseFlags::NONE, flags);
            if event.kind == EventKind::MouseUp {
                self.clear_mouse_owner();
            }
            let hover = self.is_hover_candidate(grab, &event, flags).then_some(grab);
            self.routing.update_hover(&mut self.areas, hover, &event);
            return;
        }

        if event.kind != EventKind::MouseDown
            && let Some(owner) = self.routing.mouse_owner
        {
            let interactive = self.areas.get(owner).map(|area| area.is_visible() && area.is_enabled());
            match interactive {
                Some(true) => {
                    self.deliver(owner, &event, TraverseFlags::NONE, flags);
                    if event.kind == EventKind::MouseUp {
                        self.clear_mouse_owner();
                    }
                    let hover = self.is_hover_candidate(owner, &event, flags).then_some(owner);
                    self.routing.update_hover(&mut self.areas, hover, &event);
                    return;
                }
                Some(false) => {
                    tracing::debug!(target: targets::FOCUS, area = ?owner, "mouse owner hidden or disabled");
                    self.clear_mouse_owner();
                }
                None => {
                    tracing::warn!(target: targets::FOCUS, area = ?owner, "mouse owner was destroyed");
                    self.routing.mouse_owner = None;
                }
            }
        }

        let mut traverse = TraverseFlags::NONE;
        let mut hover = None;
        let mut solved_window = None;
        for window in self.traversal_roots() {
            for id in self.traversal_order(window) {
                if hover.is_none() && self.is_hover_candidate(id, &event, flags) {
                    hover = Some(id);
                }
                let solved_before = traverse.contains(TraverseFlags::MOUSE_EVENT_SOLVED);
                traverse = self.deliver(id, &event, traverse, flags);
                if !solved_before && traverse.contains(TraverseFlags::MOUSE_EVENT_SOLVED) {
                    solved_window = Some(window);
                }
            }
        }
        self.routing.update_hover(&mut self.areas, hover, &event);

        if event.kind == EventKind::MouseDown
            && self.modal_windows.is_empty()
            && let Some(window) = solved_window
        {
            self.move_window_to_front(window);
        }
    }

    fn window_exit_focus(&mut self, event: &InputEvent, flags: ProcessFlags) {
        tracing::debug!(target: targets::FOCUS, "window lost focus");
        if let Some(owner) = self.routing.mouse_owner {
            self.deliver(owner, event, TraverseFlags::NONE, flags);
            self.release_mouse_owner(owner);
        }
        self.routing.update_hover(&mut self.areas, None, event);
        if let Some(focus) = self.routing.key_focus {
            self.routing.lose_key_focus(&mut self.areas, focus);
        }
    }

    fn dispatch_key_event(&mut self, event: &InputEvent, flags: ProcessFlags) {
        let target = self
            .routing
            .keyboard_grab_area()
            .filter(|&id| self.areas.contains(id))
            .or(self.routing.key_focus);
        match target {
            Some(id) => {
                self.deliver(id, event, TraverseFlags::NONE, flags);
            }
            None => tracing::trace!(target: targets::INPUT, "key event without focus dropped"),
        }
    }

    fn dispatch_dnd_event(&mut self, event: &InputEvent, flags: ProcessFlags) {
        let mut traverse = TraverseFlags::NONE;
        for window in self.traversal_roots() {
            for id in self.traversal_order(window) {
                traverse = self.deliver(id, event, traverse, flags);
            }
        }
        if traverse.contains(TraverseFlags::MOUSE_EVENT_SOLVED) {
            return;
        }
        // Nobody claimed the event; the current target was hidden or
        // disabled while the drag was over it.
        if let Some(current) = self.routing.dnd_area {
            let mut cx = AreaContext {
                areas: &mut self.areas,
                routing: &mut self.routing,
                dnd: &mut *self.dnd,
                drag_threshold: self.config.drag_threshold,
            };
            leave_dnd_area(&mut cx, current, event);
        }
    }

    /// Routes one recognizer event through the gesture broker.
    ///
    /// This is what a gesture source calls for every event it reads.
    pub fn dispatch_gesture_event(&mut self, event: &GestureEvent) {
        self.thread_affinity.debug_assert_same_thread();
        if self.torn_down {
            return;
        }
        if !self.config.gestures_enabled {
            if event.kind == GestureEventKind::Begin {
                event.reject();
            }
            tracing::trace!(target: targets::GESTURE, gesture_id = event.gesture_id, "gestures disabled");
            return;
        }

        let modal = self.modal_window();
        let mut host = AreaGestureHost {
            areas: &self.areas,
            windows: &self.windows,
            modal,
            exclusive: self.routing.exclusive_area,
        };
        self.broker.process_gesture_event(&mut host, event);
        self.drain_destroy_queue();
    }

    pub fn gesture_broker(&self) -> &GestureBroker {
        &self.broker
    }

    fn drain_destroy_queue(&mut self) {
        loop {
            let pending = self.destroyer.take();
            if pending.is_empty() {
                break;
            }
            for id in pending {
                if !self.areas.contains(id) {
                    continue;
                }
                if let Err(error) = self.destroy_area(id) {
                    tracing::warn!(target: targets::INPUT, area = ?id, %error, "deferred destroy failed");
                }
            }
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Rejects undecided gestures and drops every routing reference.
    ///
    /// Events arriving afterwards are ignored.
    pub fn before_destructor(&mut self) {
        tracing::debug!(target: targets::INPUT, "compositor teardown");
        self.broker.reject_all();
        self.routing.clear();
        self.modal_windows.clear();
        self.destroyer.take();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl Default for WindowCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WindowCompositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowCompositor")
            .field("areas", &self.areas.object_count())
            .field("routing", &self.routing)
            .field("windows", &self.windows)
            .field("modal_windows", &self.modal_windows)
            .field("live_gestures", &self.broker.gesture_set().len())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

/// Finds and feeds gesture targets among the compositor's areas.
struct AreaGestureHost<'a> {
    areas: &'a ObjectRegistry<InputArea>,
    windows: &'a [ObjectId],
    modal: Option<ObjectId>,
    exclusive: Option<ObjectId>,
}

impl AreaGestureHost<'_> {
    fn roots(&self) -> Vec<ObjectId> {
        if let Some(exclusive) = self.exclusive {
            return vec![exclusive];
        }
        if let Some(modal) = self.modal {
            return vec![modal];
        }
        self.windows.to_vec()
    }

    /// Deepest area under the gesture focus whose subscriptions match.
    fn deepest_subscriber(&self, id: ObjectId, event: &GestureEvent) -> Option<ObjectId> {
        let area = self.areas.get(id)?;
        if !area.is_visible() || !area.is_enabled() || !area.is_point_inside(event.focus) {
            return None;
        }
        if let Ok(children) = self.areas.children(id) {
            for &child in children.iter().rev() {
                if let Some(hit) = self.deepest_subscriber(child, event) {
                    return Some(hit);
                }
            }
        }
        area.wants_gesture(event).then_some(id)
    }
}

impl GestureTargetHost for AreaGestureHost<'_> {
    fn find_gesture_targets(&self, event: &GestureEvent) -> Vec<GestureTarget> {
        self.roots()
            .into_iter()
            .find_map(|root| self.deepest_subscriber(root, event))
            .map(GestureTarget::Area)
            .into_iter()
            .collect()
    }

    fn deliver_gesture_event(
        &mut self,
        target: GestureTarget,
        event: &GestureEvent,
    ) -> Option<GestureDeliveryRequest> {
        match target {
            GestureTarget::Area(id) => Some(self.areas.get(id)?.handle_gesture_event(event)),
            GestureTarget::Custom(_) => None,
        }
    }

    fn is_target_alive(&self, target: GestureTarget) -> bool {
        match target {
            GestureTarget::Area(id) => self.areas.contains(id),
            GestureTarget::Custom(_) => false,
        }
    }
}
