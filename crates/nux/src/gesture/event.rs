//! Gesture events as produced by the multitouch recognizer.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use nux_core::logging::targets;

use crate::geometry::Point;

/// A single touch contributing to a gesture.
///
/// Two touch points are equal when they have the same id; coordinates are
/// ignored.
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    /// Touch identifier assigned by the recognizer.
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    /// Creates a touch point.
    pub const fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

impl PartialEq for TouchPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TouchPoint {}

impl Hash for TouchPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Where a gesture event sits in the gesture's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEventKind {
    /// First event of a gesture.
    Begin,
    /// The gesture changed.
    Update,
    /// Last event of a gesture.
    End,
    /// Sent to a target that was dropped because another target claimed the
    /// gesture exclusively. Never produced by the recognizer.
    Lost,
}

/// Classes a gesture may belong to, as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GestureClasses(u8);

impl GestureClasses {
    /// No class.
    pub const NONE: Self = Self(0);
    /// Touches moving together.
    pub const DRAG: Self = Self(1 << 0);
    /// Touches moving apart or together.
    pub const PINCH: Self = Self(1 << 1);
    /// Touches rotating around their centroid.
    pub const ROTATE: Self = Self(1 << 2);
    /// Quick touch and release.
    pub const TAP: Self = Self(1 << 3);
    /// Raw touches.
    pub const TOUCH: Self = Self(1 << 4);

    /// Returns true if every class in `other` is also in `self`.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns true if `self` and `other` share at least one class.
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns true if no class is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for GestureClasses {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for GestureClasses {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl std::ops::BitOrAssign for GestureClasses {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Decision hooks into the recognizer that produced a gesture.
///
/// The broker calls exactly one of these per gesture it decides on.
pub trait GestureRecognizer: Send + Sync {
    /// The gesture was claimed by a target; the recognizer may commit to it.
    fn accept(&self, gesture_id: i32);
    /// Nobody wants the gesture; the recognizer should abandon it.
    fn reject(&self, gesture_id: i32);
}

/// One sample of a gesture.
#[derive(Clone)]
pub struct GestureEvent {
    pub kind: GestureEventKind,
    pub gesture_id: i32,
    pub classes: GestureClasses,
    pub touches: Vec<TouchPoint>,
    /// Whether the recognizer has settled on what the gesture is.
    pub is_construction_finished: bool,
    /// Recognizer timestamp in milliseconds.
    pub timestamp: u64,
    /// Centroid of the touches.
    pub focus: Point,
    /// Focus movement since the previous event.
    pub delta: Point,
    pub velocity: Point,
    /// Rotation in radians.
    pub angle: f32,
    /// Radius of the touch cluster.
    pub radius: f32,
    recognizer: Option<Arc<dyn GestureRecognizer>>,
}

impl GestureEvent {
    /// Creates an event. The focus is the centroid of `touches`.
    pub fn new(
        kind: GestureEventKind,
        gesture_id: i32,
        classes: GestureClasses,
        touches: Vec<TouchPoint>,
    ) -> Self {
        let focus = centroid(&touches);
        Self {
            kind,
            gesture_id,
            classes,
            touches,
            is_construction_finished: false,
            timestamp: 0,
            focus,
            delta: Point::ZERO,
            velocity: Point::ZERO,
            angle: 0.0,
            radius: 0.0,
            recognizer: None,
        }
    }

    /// Sets the construction-finished flag.
    pub fn with_construction_finished(mut self, finished: bool) -> Self {
        self.is_construction_finished = finished;
        self
    }

    /// Attaches the recognizer that accept/reject decisions go to.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn GestureRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Overrides the focus point.
    pub fn with_focus(mut self, focus: Point) -> Self {
        self.focus = focus;
        self
    }

    /// Returns a copy of this event with a different kind.
    pub fn with_kind(&self, kind: GestureEventKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Number of touches in the gesture.
    #[inline]
    pub fn num_touches(&self) -> usize {
        self.touches.len()
    }

    /// Tells the recognizer the gesture was accepted.
    pub fn accept(&self) {
        match &self.recognizer {
            Some(recognizer) => recognizer.accept(self.gesture_id),
            None => tracing::trace!(target: targets::GESTURE, gesture_id = self.gesture_id, "accept without recognizer"),
        }
    }

    /// Tells the recognizer the gesture was rejected.
    pub fn reject(&self) {
        match &self.recognizer {
            Some(recognizer) => recognizer.reject(self.gesture_id),
            None => tracing::trace!(target: targets::GESTURE, gesture_id = self.gesture_id, "reject without recognizer"),
        }
    }
}

impl fmt::Debug for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureEvent")
            .field("kind", &self.kind)
            .field("gesture_id", &self.gesture_id)
            .field("classes", &self.classes)
            .field("touches", &self.touches)
            .field("is_construction_finished", &self.is_construction_finished)
            .field("timestamp", &self.timestamp)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

fn centroid(touches: &[TouchPoint]) -> Point {
    if touches.is_empty() {
        return Point::ZERO;
    }
    let n = touches.len() as f32;
    let (sx, sy) = touches
        .iter()
        .fold((0.0, 0.0), |(sx, sy), t| (sx + t.x, sy + t.y));
    Point::new(sx / n, sy / n)
}
