//! Gesture targets and the seam to the widget tree.

use nux_core::ObjectId;

use super::event::GestureEvent;

/// Something a gesture can be delivered to.
///
/// Targets are weak handles: the thing behind one may disappear at any time,
/// and the [`GestureTargetHost`] is asked whether it is still there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// An input area managed by a compositor.
    Area(ObjectId),
    /// A target defined by the host, e.g. a whole window or a test double.
    Custom(u64),
}

/// What a target asks for in response to a delivered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureDeliveryRequest {
    /// Nothing; other targets keep receiving the gesture.
    #[default]
    None,
    /// The gesture should go to this target only from now on.
    Exclusivity,
}

/// The broker's only window into the widget tree.
///
/// The broker knows nothing about geometry: it asks the host for candidate
/// targets and hands events back to it for delivery.
pub trait GestureTargetHost {
    /// Candidate targets for a gesture that just began, in priority order.
    fn find_gesture_targets(&self, event: &GestureEvent) -> Vec<GestureTarget>;

    /// Deliver an event to `target`.
    ///
    /// Returns `None` if the target no longer exists; delivery is then
    /// silently dropped.
    fn deliver_gesture_event(
        &mut self,
        target: GestureTarget,
        event: &GestureEvent,
    ) -> Option<GestureDeliveryRequest>;

    /// Whether `target` still exists.
    fn is_target_alive(&self, target: GestureTarget) -> bool;
}
