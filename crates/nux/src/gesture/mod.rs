//! Multitouch gesture arbitration.
//!
//! Gestures come from an external recognizer as streams of
//! [`GestureEvent`]s. The [`GestureBroker`] decides which targets receive
//! each gesture when several gestures compete for the same target, buffers
//! a gesture's events until the recognizer has settled on what it is, and
//! tells the recognizer whether each gesture was accepted or rejected.
//!
//! # Conflict Resolution
//!
//! Conflicts are resolved when a gesture begins, before any competing
//! gesture has started delivering:
//!
//! - a target owned by a gesture that is already delivering cannot be taken
//! - otherwise the gesture with more touches wins the target
//! - on equal touch counts neither gesture gets the target
//!
//! When a gesture finishes construction it is accepted, its buffered events
//! are flushed, and any gesture still sharing touches with it is rejected.

mod broker;
mod event;
#[allow(clippy::module_inception)]
mod gesture;
mod set;
mod subscription;
mod target;

pub use broker::GestureBroker;
pub use event::{GestureClasses, GestureEvent, GestureEventKind, GestureRecognizer, TouchPoint};
pub use gesture::{AcceptanceStatus, Gesture, TargetRemoval};
pub use set::GestureSet;
pub use subscription::GestureSubscription;
pub use target::{GestureDeliveryRequest, GestureTarget, GestureTargetHost};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    /// An event of the given kind with one touch per id.
    pub(crate) fn event(kind: GestureEventKind, gesture_id: i32, touch_ids: &[i32]) -> GestureEvent {
        let touches = touch_ids
            .iter()
            .map(|&id| TouchPoint::new(id, 10.0 * id as f32, 10.0))
            .collect();
        GestureEvent::new(kind, gesture_id, GestureClasses::TOUCH, touches)
    }

    /// Like [`event`], with construction finished.
    pub(crate) fn finished(kind: GestureEventKind, gesture_id: i32, touch_ids: &[i32]) -> GestureEvent {
        event(kind, gesture_id, touch_ids).with_construction_finished(true)
    }

    /// Records accept (1) and reject (-1) per gesture id; 0 means undecided.
    #[derive(Default)]
    pub(crate) struct RecordingRecognizer {
        decisions: Mutex<HashMap<i32, i32>>,
        calls: Mutex<usize>,
    }

    impl RecordingRecognizer {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn status(&self, gesture_id: i32) -> i32 {
            self.decisions.lock().get(&gesture_id).copied().unwrap_or(0)
        }

        pub(crate) fn call_count(&self) -> usize {
            *self.calls.lock()
        }
    }

    impl GestureRecognizer for RecordingRecognizer {
        fn accept(&self, gesture_id: i32) {
            *self.calls.lock() += 1;
            self.decisions.lock().insert(gesture_id, 1);
        }

        fn reject(&self, gesture_id: i32) {
            *self.calls.lock() += 1;
            self.decisions.lock().insert(gesture_id, -1);
        }
    }

    /// A host with a fixed candidate list that records every delivery.
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        pub(crate) candidates: Vec<GestureTarget>,
        /// (target, kind, gesture id, timestamp)
        pub(crate) delivered: Vec<(GestureTarget, GestureEventKind, i32, u64)>,
        dead: HashSet<GestureTarget>,
        exclusive: HashSet<GestureTarget>,
    }

    impl RecordingHost {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_candidates(candidates: Vec<GestureTarget>) -> Self {
            Self {
                candidates,
                ..Self::default()
            }
        }

        pub(crate) fn kill(&mut self, target: GestureTarget) {
            self.dead.insert(target);
        }

        pub(crate) fn request_exclusivity(&mut self, target: GestureTarget) {
            self.exclusive.insert(target);
        }

        pub(crate) fn kinds_for(&self, target: GestureTarget) -> Vec<GestureEventKind> {
            self.delivered
                .iter()
                .filter(|d| d.0 == target)
                .map(|d| d.1)
                .collect()
        }

        pub(crate) fn timestamps_for(&self, target: GestureTarget) -> Vec<u64> {
            self.delivered
                .iter()
                .filter(|d| d.0 == target)
                .map(|d| d.3)
                .collect()
        }
    }

    impl GestureTargetHost for RecordingHost {
        fn find_gesture_targets(&self, _event: &GestureEvent) -> Vec<GestureTarget> {
            self.candidates.clone()
        }

        fn deliver_gesture_event(
            &mut self,
            target: GestureTarget,
            event: &GestureEvent,
        ) -> Option<GestureDeliveryRequest> {
            if self.dead.contains(&target) {
                return None;
            }
            self.delivered
                .push((target, event.kind, event.gesture_id, event.timestamp));
            if self.exclusive.contains(&target) {
                Some(GestureDeliveryRequest::Exclusivity)
            } else {
                Some(GestureDeliveryRequest::None)
            }
        }

        fn is_target_alive(&self, target: GestureTarget) -> bool {
            !self.dead.contains(&target)
        }
    }
}
