use super::event::{GestureClasses, GestureEvent};

/// Which gestures an input area wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSubscription {
    pub gesture_classes: GestureClasses,
    pub num_touches: usize,
    /// Inactive subscriptions never match.
    pub active: bool,
}

impl GestureSubscription {
    /// An active subscription.
    pub fn new(gesture_classes: GestureClasses, num_touches: usize) -> Self {
        Self {
            gesture_classes,
            num_touches,
            active: true,
        }
    }

    /// Whether `event` is a gesture this subscription asks for.
    pub fn matches(&self, event: &GestureEvent) -> bool {
        self.active
            && self.num_touches == event.num_touches()
            && self.gesture_classes.intersects(event.classes)
    }
}
