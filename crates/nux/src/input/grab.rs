//! Pointer and keyboard grab stacks.

use nux_core::ObjectId;

/// A stack of areas that grabbed an input device.
///
/// The top of the stack receives the device's events. The same area may
/// appear more than once, but never twice in a row.
#[derive(Debug, Clone, Default)]
pub struct GrabStack {
    stack: Vec<ObjectId>,
}

impl GrabStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `area`. Fails if `area` is already on top.
    pub fn push(&mut self, area: ObjectId) -> bool {
        if self.top() == Some(area) {
            return false;
        }
        self.stack.push(area);
        true
    }

    /// Removes the topmost occurrence of `area`.
    pub fn remove(&mut self, area: ObjectId) -> bool {
        match self.stack.iter().rposition(|&id| id == area) {
            Some(index) => {
                self.stack.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every occurrence of areas matching `dead`, then merges
    /// neighbours that became equal.
    pub fn scrub(&mut self, mut dead: impl FnMut(ObjectId) -> bool) {
        self.stack.retain(|&id| !dead(id));
        self.stack.dedup();
    }

    /// The area receiving events.
    pub fn top(&self) -> Option<ObjectId> {
        self.stack.last().copied()
    }

    pub fn contains(&self, area: ObjectId) -> bool {
        self.stack.contains(&area)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.stack.iter().copied()
    }
}
