//! Gesture-to-target arbitration.

use nux_core::logging::targets;

use super::event::{GestureEvent, GestureEventKind};
use super::gesture::{AcceptanceStatus, Gesture, TargetRemoval};
use super::set::GestureSet;
use super::target::{GestureTarget, GestureTargetHost};

/// Binds gestures to targets and decides which gestures survive.
///
/// The broker owns every live [`Gesture`]. Hit-testing and delivery are
/// delegated to a [`GestureTargetHost`] passed into each call, so the broker
/// holds no reference into the widget tree.
///
/// # Example
///
/// ```
/// use nux::gesture::{
///     GestureBroker, GestureClasses, GestureDeliveryRequest, GestureEvent, GestureEventKind,
///     GestureTarget, GestureTargetHost, TouchPoint,
/// };
///
/// struct OneTarget(Vec<GestureEventKind>);
///
/// impl GestureTargetHost for OneTarget {
///     fn find_gesture_targets(&self, _: &GestureEvent) -> Vec<GestureTarget> {
///         vec![GestureTarget::Custom(1)]
///     }
///     fn deliver_gesture_event(
///         &mut self,
///         _: GestureTarget,
///         event: &GestureEvent,
///     ) -> Option<GestureDeliveryRequest> {
///         self.0.push(event.kind);
///         Some(GestureDeliveryRequest::None)
///     }
///     fn is_target_alive(&self, _: GestureTarget) -> bool {
///         true
///     }
/// }
///
/// let touches = vec![TouchPoint::new(0, 5.0, 5.0)];
/// let begin = GestureEvent::new(GestureEventKind::Begin, 1, GestureClasses::TAP, touches);
/// let end = begin.with_kind(GestureEventKind::End).with_construction_finished(true);
///
/// let mut host = OneTarget(Vec::new());
/// let mut broker = GestureBroker::new();
/// assert!(broker.process_gesture_begin(&mut host, &begin));
/// broker.process_gesture_end(&mut host, &end);
///
/// assert_eq!(host.0, vec![GestureEventKind::Begin, GestureEventKind::End]);
/// assert!(broker.gesture_set().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct GestureBroker {
    gesture_set: GestureSet,
}

impl GestureBroker {
    /// Creates a broker with no live gestures.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live gestures.
    pub fn gesture_set(&self) -> &GestureSet {
        &self.gesture_set
    }

    /// Routes a recognizer event to the matching `process_*` method.
    pub fn process_gesture_event<H: GestureTargetHost>(&mut self, host: &mut H, event: &GestureEvent) {
        match event.kind {
            GestureEventKind::Begin => {
                self.process_gesture_begin(host, event);
            }
            GestureEventKind::Update => self.process_gesture_update(host, event),
            GestureEventKind::End => self.process_gesture_end(host, event),
            GestureEventKind::Lost => {
                tracing::warn!(target: targets::GESTURE, gesture_id = event.gesture_id, "recognizer sent a Lost event; ignoring");
            }
        }
    }

    /// Binds a new gesture to every candidate target the host reports.
    ///
    /// If no candidate could be bound the gesture is rejected right away.
    /// Returns whether any target was bound.
    #[tracing::instrument(skip_all, target = "nux::gesture", level = "trace", fields(gesture_id = event.gesture_id))]
    pub fn process_gesture_begin<H: GestureTargetHost>(&mut self, host: &mut H, event: &GestureEvent) -> bool {
        let candidates = host.find_gesture_targets(event);

        let mut bound = false;
        for target in candidates {
            if !host.is_target_alive(target) {
                tracing::trace!(target: targets::GESTURE, ?target, "skipping dead candidate");
                continue;
            }
            bound |= self.bind_new_gesture_to_target(host, event, target);
        }

        if !bound {
            tracing::debug!(target: targets::GESTURE, gesture_id = event.gesture_id, touches = event.num_touches(), "no target for gesture; rejecting");
            event.reject();
        }
        bound
    }

    /// Tries to bind the gesture of `event` to `target`.
    ///
    /// A target already owned by a delivering gesture cannot be taken.
    /// Against a buffered owner the gesture with more touches wins; on a tie
    /// the target is taken away from the owner and nobody gets it.
    pub fn bind_new_gesture_to_target<H: GestureTargetHost>(
        &mut self,
        host: &mut H,
        event: &GestureEvent,
        target: GestureTarget,
    ) -> bool {
        let Some(owner_id) = self.gesture_set.owner_of(target) else {
            self.create_gesture_for_target(host, event, target);
            return true;
        };

        if owner_id == event.gesture_id {
            return true;
        }

        let Some(owner) = self.gesture_set.get(owner_id) else {
            return false;
        };
        if owner.is_delivering_events() {
            tracing::trace!(target: targets::GESTURE, gesture_id = event.gesture_id, owner_id, ?target, "target owned by a delivering gesture");
            return false;
        }

        let existing_touches = owner.num_touches();
        let new_touches = event.num_touches();
        if new_touches < existing_touches {
            tracing::trace!(target: targets::GESTURE, gesture_id = event.gesture_id, owner_id, "owner has more touches");
            false
        } else if new_touches == existing_touches {
            // More fingers on the target than it can handle; nobody gets it.
            tracing::debug!(target: targets::GESTURE, gesture_id = event.gesture_id, owner_id, ?target, "equal touch count; target given up");
            self.detach_from_owner(owner_id, target);
            false
        } else {
            tracing::debug!(target: targets::GESTURE, gesture_id = event.gesture_id, owner_id, ?target, "gesture with more touches takes target");
            self.detach_from_owner(owner_id, target);
            self.create_gesture_for_target(host, event, target);
            true
        }
    }

    /// Feeds an update into its gesture. Unknown gestures are ignored.
    pub fn process_gesture_update<H: GestureTargetHost>(&mut self, host: &mut H, event: &GestureEvent) {
        if !self.feed(host, event) {
            tracing::trace!(target: targets::GESTURE, gesture_id = event.gesture_id, "update for unknown gesture");
        }
    }

    /// Feeds the last event into its gesture and forgets the gesture.
    ///
    /// A gesture still undecided at this point is rejected.
    pub fn process_gesture_end<H: GestureTargetHost>(&mut self, host: &mut H, event: &GestureEvent) {
        if !self.feed(host, event) {
            tracing::trace!(target: targets::GESTURE, gesture_id = event.gesture_id, "end for unknown gesture");
            return;
        }

        let Some(mut gesture) = self.gesture_set.remove(event.gesture_id) else {
            return;
        };
        if gesture.acceptance_status() == AcceptanceStatus::Undecided {
            tracing::debug!(target: targets::GESTURE, gesture_id = gesture.id(), "gesture ended undecided");
            gesture.reject();
        }
    }

    /// Unbinds a destroyed target from whichever gesture owns it.
    ///
    /// A gesture left without targets is dropped; it was rejected if still
    /// undecided.
    pub fn target_destroyed(&mut self, target: GestureTarget) {
        if let Some(owner_id) = self.gesture_set.owner_of(target) {
            tracing::debug!(target: targets::GESTURE, gesture_id = owner_id, ?target, "gesture target destroyed");
            self.detach_from_owner(owner_id, target);
        }
    }

    /// Drops every live gesture, rejecting those still undecided.
    pub fn reject_all(&mut self) {
        for mut gesture in self.gesture_set.drain() {
            if gesture.acceptance_status() == AcceptanceStatus::Undecided {
                gesture.reject();
            }
        }
    }

    /// Returns `false` if the gesture is unknown.
    fn feed<H: GestureTargetHost>(&mut self, host: &mut H, event: &GestureEvent) -> bool {
        let id = event.gesture_id;
        let Some(gesture) = self.gesture_set.get(id) else {
            return false;
        };

        let finishes_construction = event.is_construction_finished && !gesture.is_construction_finished();
        self.gesture_set
            .with_gesture_mut(id, |gesture| gesture.update(host, event.clone()));
        if finishes_construction {
            self.resolve_buffered_gesture_that_finished_construction(host, id);
        }
        true
    }

    fn resolve_buffered_gesture_that_finished_construction<H: GestureTargetHost>(
        &mut self,
        host: &mut H,
        gesture_id: i32,
    ) {
        self.gesture_set.with_gesture_mut(gesture_id, |gesture| {
            gesture.accept();
            gesture.enable_event_delivery(host);
        });

        // Conflicts should have been settled when the gestures began.
        for conflicting in self.gesture_set.conflicting_gestures(gesture_id) {
            tracing::warn!(target: targets::GESTURE, gesture_id, conflicting, "unresolved conflicting gesture; rejecting");
            if let Some(mut gesture) = self.gesture_set.remove(conflicting)
                && gesture.acceptance_status() != AcceptanceStatus::Rejected
            {
                gesture.reject();
            }
        }
    }

    fn create_gesture_for_target<H: GestureTargetHost>(
        &mut self,
        host: &mut H,
        event: &GestureEvent,
        target: GestureTarget,
    ) {
        let id = event.gesture_id;
        if self.gesture_set.get(id).is_some() {
            self.gesture_set.attach_target(id, host, target);
        } else {
            tracing::debug!(target: targets::GESTURE, gesture_id = id, touches = event.num_touches(), ?target, "new gesture");
            self.gesture_set.insert(Gesture::new(event.clone(), target));
        }

        if event.is_construction_finished {
            self.gesture_set.with_gesture_mut(id, |gesture| {
                if gesture.acceptance_status() == AcceptanceStatus::Undecided {
                    gesture.accept();
                }
                gesture.enable_event_delivery(host);
            });
        }
    }

    fn detach_from_owner(&mut self, owner_id: i32, target: GestureTarget) {
        if self.gesture_set.detach_target(owner_id, target) == TargetRemoval::LostAllTargets {
            self.gesture_set.remove(owner_id);
        }
    }
}
