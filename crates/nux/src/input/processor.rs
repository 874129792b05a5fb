//! Per-area pointer bookkeeping.
//!
//! [`AreaEventProcessor`] turns raw pointer events into a [`MouseSignals`]
//! mask for one rectangle. It tracks whether the pointer is inside and
//! whether the area holds the pointer (mouse focus); it does not decide
//! which high-level signal an area emits.

use super::event::{EventKind, InputEvent, flag_ops};
use crate::geometry::{Point, Rect};

/// What an event means for one area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseSignals(u8);

flag_ops!(MouseSignals);

impl MouseSignals {
    pub const NONE: Self = Self(0);
    /// Press inside the area; the area now holds the pointer.
    pub const DOWN: Self = Self(1 << 0);
    /// Release while the area held the pointer; the hold is over.
    pub const UP: Self = Self(1 << 1);
    /// Motion inside the area, or anywhere while the area holds the pointer.
    pub const MOVE: Self = Self(1 << 2);
    /// Wheel inside the area.
    pub const WHEEL: Self = Self(1 << 3);
}

/// Pointer state of one area.
#[derive(Debug, Clone, Default)]
pub struct AreaEventProcessor {
    has_mouse_focus: bool,
    mouse_in: bool,
    /// Window coordinates of the last event seen.
    position: Point,
    delta: Point,
    press_position: Point,
    /// Set once a held pointer has travelled past the drag threshold.
    dragging: bool,
}

impl AreaEventProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the state for `event` and reports what it means for `geometry`.
    ///
    /// With `process_mouse_focus` false only the inside/outside state and
    /// position are updated. Motion while the pointer is held is not
    /// reported until it has travelled `drag_threshold` from the press.
    pub fn process(
        &mut self,
        event: &InputEvent,
        geometry: &Rect,
        process_mouse_focus: bool,
        drag_threshold: f32,
    ) -> MouseSignals {
        self.update_position(event, geometry);

        if !self.mouse_in && !self.has_mouse_focus {
            return MouseSignals::NONE;
        }
        if !process_mouse_focus {
            return MouseSignals::NONE;
        }

        match event.kind {
            EventKind::MouseDown if self.mouse_in => {
                self.has_mouse_focus = true;
                self.press_position = event.position;
                self.dragging = false;
                MouseSignals::DOWN
            }
            EventKind::MouseUp if self.has_mouse_focus => {
                self.has_mouse_focus = false;
                self.dragging = false;
                MouseSignals::UP
            }
            EventKind::MouseMove => {
                if self.has_mouse_focus && !self.dragging {
                    if event.position.distance_to(self.press_position) < drag_threshold {
                        return MouseSignals::NONE;
                    }
                    self.dragging = true;
                }
                MouseSignals::MOVE
            }
            EventKind::MouseWheel if self.mouse_in => MouseSignals::WHEEL,
            _ => MouseSignals::NONE,
        }
    }

    /// Updates only the inside/outside state and position.
    pub fn process_mouse_in_out(&mut self, event: &InputEvent, geometry: &Rect) {
        self.update_position(event, geometry);
    }

    fn update_position(&mut self, event: &InputEvent, geometry: &Rect) {
        self.mouse_in = event.kind != EventKind::WindowExitFocus && geometry.contains(event.position);
        self.delta = Point::new(
            event.position.x - self.position.x,
            event.position.y - self.position.y,
        );
        self.position = event.position;
    }

    /// Whether the area holds the pointer.
    #[inline]
    pub fn has_mouse_focus(&self) -> bool {
        self.has_mouse_focus
    }

    pub fn set_mouse_focus(&mut self, focus: bool) {
        self.has_mouse_focus = focus;
        if !focus {
            self.dragging = false;
        }
    }

    /// Whether the last event was inside the area.
    #[inline]
    pub fn is_mouse_inside(&self) -> bool {
        self.mouse_in
    }

    /// Forgets that the pointer was inside, after the area was told it left.
    pub fn reset_mouse_in(&mut self) {
        self.mouse_in = false;
    }

    /// Makes the area hold the pointer as if it had been pressed at `point`.
    pub fn force_mouse_focus(&mut self, point: Point, geometry: &Rect) {
        self.mouse_in = geometry.contains(point);
        self.position = point;
        self.press_position = point;
        self.dragging = false;
        self.has_mouse_focus = true;
    }

    /// Releases a forced hold.
    pub fn stop_mouse_focus(&mut self) {
        self.set_mouse_focus(false);
    }

    /// Position of the last event, relative to `geometry`'s origin.
    pub fn local_position(&self, geometry: &Rect) -> Point {
        Point::new(self.position.x - geometry.x, self.position.y - geometry.y)
    }

    /// Pointer travel since the previous event.
    pub fn delta(&self) -> Point {
        self.delta
    }
}
