//! A single physical gesture and its delivery state.

use nux_core::logging::targets;

use super::event::{GestureEvent, GestureEventKind, TouchPoint};
use super::target::{GestureDeliveryRequest, GestureTarget, GestureTargetHost};

/// Whether a gesture has been accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptanceStatus {
    /// No decision yet.
    #[default]
    Undecided,
    /// A target claimed the gesture.
    Accepted,
    /// Nobody wants the gesture.
    Rejected,
}

/// Outcome of [`Gesture::remove_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRemoval {
    /// The target was not bound to the gesture.
    NotBound,
    /// The target was removed; others remain.
    Removed,
    /// The last target was removed. An undecided gesture has been rejected.
    LostAllTargets,
}

/// One occurrence of a multitouch gesture.
///
/// Events are buffered until delivery is enabled, then flushed in order to
/// every target; later events are delivered as they arrive. Enabling is
/// one-way.
#[derive(Debug)]
pub struct Gesture {
    id: i32,
    targets: Vec<GestureTarget>,
    queued_events: Vec<GestureEvent>,
    /// Most recent event received, buffered or delivered.
    last_event: GestureEvent,
    delivery_enabled: bool,
    acceptance_status: AcceptanceStatus,
}

impl Gesture {
    /// Creates a gesture bound to `target` with `event` as its only queued event.
    pub fn new(event: GestureEvent, target: GestureTarget) -> Self {
        Self {
            id: event.gesture_id,
            targets: vec![target],
            queued_events: vec![event.clone()],
            last_event: event,
            delivery_enabled: false,
            acceptance_status: AcceptanceStatus::Undecided,
        }
    }

    /// The recognizer's id for this gesture.
    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Targets in delivery order.
    pub fn targets(&self) -> &[GestureTarget] {
        &self.targets
    }

    /// Whether `target` is bound to this gesture.
    pub fn has_target(&self, target: GestureTarget) -> bool {
        self.targets.contains(&target)
    }

    /// Binds another target.
    ///
    /// If the gesture is already delivering, the new target is sent the
    /// latest event right away so it does not start mid-stream blind. An
    /// exclusivity request in reply is honored like any other delivery.
    /// Returns `false` if the target was already bound.
    pub fn add_target<H: GestureTargetHost>(&mut self, host: &mut H, target: GestureTarget) -> bool {
        if self.has_target(target) {
            return false;
        }
        self.targets.push(target);

        if self.delivery_enabled && self.acceptance_status != AcceptanceStatus::Rejected {
            tracing::trace!(target: targets::GESTURE, gesture_id = self.id, ?target, "late target catches up on latest event");
            let latest = self.last_event.clone();
            if let Some(GestureDeliveryRequest::Exclusivity) = host.deliver_gesture_event(target, &latest) {
                self.execute_exclusivity_request(host, &latest, self.targets.len() - 1);
            }
        }
        true
    }

    /// Unbinds a target.
    ///
    /// Losing the last target rejects the gesture if no decision was made yet.
    pub fn remove_target(&mut self, target: GestureTarget) -> TargetRemoval {
        let Some(pos) = self.targets.iter().position(|&t| t == target) else {
            return TargetRemoval::NotBound;
        };
        self.targets.remove(pos);

        if !self.targets.is_empty() {
            return TargetRemoval::Removed;
        }

        tracing::debug!(target: targets::GESTURE, gesture_id = self.id, "gesture lost all its targets");
        if self.acceptance_status == AcceptanceStatus::Undecided {
            self.reject();
        }
        TargetRemoval::LostAllTargets
    }

    /// Feeds a new event into the gesture.
    ///
    /// Buffered while delivery is disabled, delivered immediately otherwise.
    /// Events for a rejected gesture are dropped.
    pub fn update<H: GestureTargetHost>(&mut self, host: &mut H, event: GestureEvent) {
        if self.acceptance_status == AcceptanceStatus::Rejected {
            tracing::trace!(target: targets::GESTURE, gesture_id = self.id, "dropping update for rejected gesture");
            return;
        }

        if self.delivery_enabled {
            self.deliver_event(host, &event);
        } else {
            self.queued_events.push(event.clone());
        }
        self.last_event = event;
    }

    /// Flushes the queue to the targets and switches to live delivery.
    ///
    /// Idempotent. Does nothing for a rejected gesture.
    pub fn enable_event_delivery<H: GestureTargetHost>(&mut self, host: &mut H) {
        if self.delivery_enabled {
            return;
        }
        if self.acceptance_status == AcceptanceStatus::Rejected {
            tracing::trace!(target: targets::GESTURE, gesture_id = self.id, "not enabling delivery of rejected gesture");
            return;
        }

        self.delivery_enabled = true;
        let queued = std::mem::take(&mut self.queued_events);
        tracing::debug!(target: targets::GESTURE, gesture_id = self.id, queued = queued.len(), "enabling event delivery");
        for event in &queued {
            self.deliver_event(host, event);
        }
    }

    /// Whether events are delivered live.
    #[inline]
    pub fn is_delivering_events(&self) -> bool {
        self.delivery_enabled
    }

    /// Number of buffered events.
    pub fn queued_event_count(&self) -> usize {
        self.queued_events.len()
    }

    /// The most recent event.
    pub fn latest_event(&self) -> &GestureEvent {
        debug_assert!(
            self.delivery_enabled == self.queued_events.is_empty()
                || self.acceptance_status == AcceptanceStatus::Rejected,
            "gesture {} queue out of sync with delivery state",
            self.id
        );
        &self.last_event
    }

    /// Touches of the latest event.
    pub fn touches(&self) -> &[TouchPoint] {
        &self.latest_event().touches
    }

    /// Number of touches of the latest event.
    pub fn num_touches(&self) -> usize {
        self.latest_event().num_touches()
    }

    /// Whether the latest event reports construction finished.
    pub fn is_construction_finished(&self) -> bool {
        self.latest_event().is_construction_finished
    }

    /// Whether the two gestures share at least one touch id.
    pub fn has_touches_in_common(&self, other: &Gesture) -> bool {
        self.touches()
            .iter()
            .any(|touch| other.touches().contains(touch))
    }

    /// The current decision.
    #[inline]
    pub fn acceptance_status(&self) -> AcceptanceStatus {
        self.acceptance_status
    }

    /// Accepts the gesture and tells the recognizer.
    ///
    /// Only an undecided gesture can be accepted. Returns whether the status changed.
    pub fn accept(&mut self) -> bool {
        if self.acceptance_status != AcceptanceStatus::Undecided {
            tracing::warn!(target: targets::GESTURE, gesture_id = self.id, status = ?self.acceptance_status, "ignoring accept of decided gesture");
            return false;
        }
        self.last_event.accept();
        self.acceptance_status = AcceptanceStatus::Accepted;
        tracing::debug!(target: targets::GESTURE, gesture_id = self.id, "gesture accepted");
        true
    }

    /// Rejects the gesture and tells the recognizer.
    ///
    /// Rejecting an accepted gesture is allowed: events already delivered
    /// stay delivered, later ones are dropped. Returns whether the status changed.
    pub fn reject(&mut self) -> bool {
        if self.acceptance_status == AcceptanceStatus::Rejected {
            tracing::warn!(target: targets::GESTURE, gesture_id = self.id, "gesture already rejected");
            return false;
        }
        self.last_event.reject();
        self.acceptance_status = AcceptanceStatus::Rejected;
        tracing::debug!(target: targets::GESTURE, gesture_id = self.id, "gesture rejected");
        true
    }

    fn deliver_event<H: GestureTargetHost>(&mut self, host: &mut H, event: &GestureEvent) {
        let mut index = 0;
        while index < self.targets.len() {
            let target = self.targets[index];
            match host.deliver_gesture_event(target, event) {
                Some(GestureDeliveryRequest::Exclusivity) => {
                    self.execute_exclusivity_request(host, event, index);
                    return;
                }
                Some(GestureDeliveryRequest::None) => {}
                None => {
                    tracing::trace!(target: targets::GESTURE, gesture_id = self.id, ?target, "skipping dead target");
                }
            }
            index += 1;
        }
    }

    /// Drops every target after `requestor`. Unless `event` is a Begin, the
    /// dropped targets are told they lost the gesture, last one first.
    fn execute_exclusivity_request<H: GestureTargetHost>(
        &mut self,
        host: &mut H,
        event: &GestureEvent,
        requestor: usize,
    ) {
        let released = self.targets.split_off(requestor + 1);
        tracing::debug!(target: targets::GESTURE, gesture_id = self.id, requestor = ?self.targets[requestor], released = released.len(), "exclusivity requested");

        if event.kind != GestureEventKind::Begin {
            let lost = event.with_kind(GestureEventKind::Lost);
            for &target in released.iter().rev() {
                let _ = host.deliver_gesture_event(target, &lost);
            }
        }
    }
}
