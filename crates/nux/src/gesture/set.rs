//! Indexed container of live gestures.

use std::collections::{BTreeMap, HashMap};

use nux_core::logging::targets;

use super::gesture::{Gesture, TargetRemoval};
use super::target::{GestureTarget, GestureTargetHost};

/// Live gestures, indexed by gesture id and by target.
///
/// A target is owned by at most one gesture. The set refuses to bind a
/// target to a second gesture, so lookups by target are unambiguous.
#[derive(Debug, Default)]
pub struct GestureSet {
    gestures: BTreeMap<i32, Gesture>,
    owners: HashMap<GestureTarget, i32>,
}

impl GestureSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a gesture, replacing any gesture with the same id.
    ///
    /// Targets already owned by another gesture are unbound from the
    /// inserted gesture. Returns the replaced gesture, if any.
    pub fn insert(&mut self, mut gesture: Gesture) -> Option<Gesture> {
        let id = gesture.id();
        let replaced = self.gestures.remove(&id);
        self.owners.retain(|_, owner| *owner != id);

        let taken: Vec<GestureTarget> = gesture
            .targets()
            .iter()
            .copied()
            .filter(|target| self.owners.contains_key(target))
            .collect();
        for target in taken {
            tracing::warn!(target: targets::GESTURE, gesture_id = id, ?target, "target already owned by another gesture");
            gesture.remove_target(target);
        }
        for &target in gesture.targets() {
            self.owners.insert(target, id);
        }

        self.gestures.insert(id, gesture);
        replaced
    }

    /// Looks up a gesture by id.
    pub fn get(&self, gesture_id: i32) -> Option<&Gesture> {
        self.gestures.get(&gesture_id)
    }

    /// The gesture owning `target`.
    pub fn find_by_target(&self, target: GestureTarget) -> Option<&Gesture> {
        self.owners
            .get(&target)
            .and_then(|id| self.gestures.get(id))
    }

    /// Id of the gesture owning `target`.
    pub fn owner_of(&self, target: GestureTarget) -> Option<i32> {
        self.owners.get(&target).copied()
    }

    /// Binds `target` to the gesture `gesture_id`.
    ///
    /// Fails if the gesture does not exist or the target belongs to another
    /// gesture.
    pub fn attach_target<H: GestureTargetHost>(
        &mut self,
        gesture_id: i32,
        host: &mut H,
        target: GestureTarget,
    ) -> bool {
        match self.owners.get(&target) {
            Some(&owner) if owner == gesture_id => return true,
            Some(_) => return false,
            None => {}
        }
        let Some(gesture) = self.gestures.get_mut(&gesture_id) else {
            return false;
        };
        gesture.add_target(host, target);
        self.owners.insert(target, gesture_id);
        true
    }

    /// Unbinds `target` from the gesture `gesture_id`.
    ///
    /// The gesture stays in the set even if it lost all targets; the caller
    /// decides what happens to it.
    pub fn detach_target(&mut self, gesture_id: i32, target: GestureTarget) -> TargetRemoval {
        let Some(gesture) = self.gestures.get_mut(&gesture_id) else {
            return TargetRemoval::NotBound;
        };
        let removal = gesture.remove_target(target);
        if removal != TargetRemoval::NotBound {
            self.owners.remove(&target);
        }
        removal
    }

    /// Ids of the other gestures sharing at least one touch with `gesture_id`.
    pub fn conflicting_gestures(&self, gesture_id: i32) -> Vec<i32> {
        let Some(gesture) = self.gestures.get(&gesture_id) else {
            return Vec::new();
        };
        self.gestures
            .iter()
            .filter(|(id, other)| **id != gesture_id && other.has_touches_in_common(gesture))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Removes a gesture and releases its targets.
    pub fn remove(&mut self, gesture_id: i32) -> Option<Gesture> {
        let gesture = self.gestures.remove(&gesture_id)?;
        self.owners.retain(|_, owner| *owner != gesture_id);
        Some(gesture)
    }

    /// Removes every gesture.
    pub fn drain(&mut self) -> Vec<Gesture> {
        self.owners.clear();
        std::mem::take(&mut self.gestures).into_values().collect()
    }

    /// Number of live gestures.
    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Live gestures in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Gesture> {
        self.gestures.values()
    }

    /// Runs `f` on a gesture and keeps the target index in sync with
    /// whatever `f` did to the gesture's targets.
    pub(crate) fn with_gesture_mut<R>(
        &mut self,
        gesture_id: i32,
        f: impl FnOnce(&mut Gesture) -> R,
    ) -> Option<R> {
        let gesture = self.gestures.get_mut(&gesture_id)?;
        let result = f(gesture);

        self.owners
            .retain(|target, owner| *owner != gesture_id || gesture.has_target(*target));
        let unindexed: Vec<GestureTarget> = gesture
            .targets()
            .iter()
            .copied()
            .filter(|target| self.owners.get(target) != Some(&gesture_id))
            .collect();
        for target in unindexed {
            if self.owners.contains_key(&target) {
                gesture.remove_target(target);
            } else {
                self.owners.insert(target, gesture_id);
            }
        }
        Some(result)
    }
}
