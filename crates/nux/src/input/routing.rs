//! Shared routing state of one compositor.

use nux_core::logging::targets;
use nux_core::{ObjectId, ObjectRegistry};

use super::area::{InputArea, MouseArgs};
use super::event::InputEvent;
use super::grab::GrabStack;

/// Which area holds each input resource.
///
/// Every field is a weak handle: the area behind it may have been destroyed,
/// so each use goes through the area registry.
#[derive(Debug, Default)]
pub struct RoutingState {
    pub(crate) mouse_owner: Option<ObjectId>,
    pub(crate) mouse_over: Option<ObjectId>,
    pub(crate) key_focus: Option<ObjectId>,
    pub(crate) dnd_area: Option<ObjectId>,
    pub(crate) pointer_grabs: GrabStack,
    pub(crate) keyboard_grabs: GrabStack,
    pub(crate) exclusive_area: Option<ObjectId>,
}

impl RoutingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The area holding the pointer between press and release.
    pub fn mouse_owner(&self) -> Option<ObjectId> {
        self.mouse_owner
    }

    /// The area under the pointer.
    pub fn mouse_over(&self) -> Option<ObjectId> {
        self.mouse_over
    }

    pub fn key_focus(&self) -> Option<ObjectId> {
        self.key_focus
    }

    /// The area a drag-and-drop operation is over.
    pub fn dnd_area(&self) -> Option<ObjectId> {
        self.dnd_area
    }

    pub fn pointer_grab_area(&self) -> Option<ObjectId> {
        self.pointer_grabs.top()
    }

    pub fn keyboard_grab_area(&self) -> Option<ObjectId> {
        self.keyboard_grabs.top()
    }

    pub fn pointer_grabs(&self) -> &GrabStack {
        &self.pointer_grabs
    }

    pub fn keyboard_grabs(&self) -> &GrabStack {
        &self.keyboard_grabs
    }

    pub fn exclusive_area(&self) -> Option<ObjectId> {
        self.exclusive_area
    }

    /// Moves keyboard focus.
    ///
    /// The previous owner is told it lost focus before the new owner is told
    /// it gained it. Returns `false` without changing anything if `area` is
    /// dead or already focused. With `None` the current owner loses focus
    /// and `false` is returned.
    pub(crate) fn set_key_focus(
        &mut self,
        areas: &mut ObjectRegistry<InputArea>,
        area: Option<ObjectId>,
    ) -> bool {
        if let Some(id) = area
            && (self.key_focus == Some(id) || !areas.contains(id))
        {
            return false;
        }

        if let Some(previous) = self.key_focus {
            self.lose_key_focus(areas, previous);
        }

        let Some(id) = area else {
            return false;
        };
        let Some(target) = areas.get_mut(id) else {
            return false;
        };
        target.has_keyboard_focus = true;
        let signals = target.signals().clone();
        self.key_focus = Some(id);
        tracing::debug!(target: targets::FOCUS, area = ?id, "keyboard focus gained");
        signals.start_focus.emit(());
        true
    }

    /// Takes keyboard focus away from `id`, if it has it.
    pub(crate) fn lose_key_focus(&mut self, areas: &mut ObjectRegistry<InputArea>, id: ObjectId) {
        if self.key_focus == Some(id) {
            self.key_focus = None;
        }
        let Some(area) = areas.get_mut(id) else {
            return;
        };
        if !area.has_keyboard_focus {
            return;
        }
        area.has_keyboard_focus = false;
        let signals = area.signals().clone();
        tracing::debug!(target: targets::FOCUS, area = ?id, "keyboard focus lost");
        signals.end_focus.emit(());
    }

    /// Moves hover to `area`: the old area is told the pointer left before
    /// the new one is told it entered.
    pub(crate) fn update_hover(
        &mut self,
        areas: &mut ObjectRegistry<InputArea>,
        area: Option<ObjectId>,
        event: &InputEvent,
    ) {
        if self.mouse_over == area {
            return;
        }

        if let Some(previous) = self.mouse_over.take()
            && let Some(old) = areas.get_mut(previous)
        {
            old.processor.reset_mouse_in();
            let args = MouseArgs::new(old, event);
            let signals = old.signals().clone();
            tracing::trace!(target: targets::INPUT, area = ?previous, "mouse leave");
            signals.mouse_leave.emit(args);
        }

        let Some(id) = area else {
            return;
        };
        let Some(new) = areas.get(id) else {
            return;
        };
        self.mouse_over = Some(id);
        let args = MouseArgs::new(new, event);
        let signals = new.signals().clone();
        tracing::trace!(target: targets::INPUT, area = ?id, "mouse enter");
        signals.mouse_enter.emit(args);
    }

    /// Drops every reference to areas matching `dead`.
    pub(crate) fn forget(&mut self, dead: impl Fn(ObjectId) -> bool) {
        for slot in [
            &mut self.mouse_owner,
            &mut self.mouse_over,
            &mut self.key_focus,
            &mut self.dnd_area,
            &mut self.exclusive_area,
        ] {
            if slot.is_some_and(&dead) {
                *slot = None;
            }
        }
        self.pointer_grabs.scrub(&dead);
        self.keyboard_grabs.scrub(&dead);
    }

    /// Drops every reference.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
