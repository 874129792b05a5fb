//! Object model for Nux.
//!
//! Provides generation-checked object handles and an arena that owns the
//! objects they refer to:
//! - Unique object identifiers via arena-based storage
//! - Parent-child ownership relationships with cascade destroy
//! - Object naming for debugging
//!
//! # Key Types
//!
//! - [`ObjectId`] - Stable handle for a live object. Handles are weak: a
//!   destroyed object's id never resolves again, even if its slot is reused.
//! - [`ObjectRegistry`] - Arena managing objects of one type and their tree.
//!
//! Everything that refers to an object from somewhere else (focus owners,
//! grab stacks, gesture targets) stores an [`ObjectId`] and checks it against
//! the registry with [`ObjectRegistry::contains`] or [`ObjectRegistry::get`]
//! before use.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an object in an [`ObjectRegistry`].
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object tree changes.
    /// They become invalid when the object is destroyed, and stay invalid
    /// even if the arena slot is later reused.
    pub struct ObjectId;
}

static_assertions::assert_impl_all!(ObjectId: Send, Sync, Copy);

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// The raw value can be converted back using [`ObjectId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// This does not check whether the id exists in any registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Internal data stored in the registry for each object.
struct ObjectData<T> {
    /// Human-readable name for debugging.
    name: String,
    /// Parent object (if any).
    parent: Option<ObjectId>,
    /// Child objects (owned), back to front.
    children: Vec<ObjectId>,
    value: T,
}

/// An arena of objects of type `T` arranged in a parent/child forest.
///
/// Children are kept in z-order, back to front: the last child is the
/// front-most one.
pub struct ObjectRegistry<T> {
    objects: SlotMap<ObjectId, ObjectData<T>>,
}

impl<T> ObjectRegistry<T> {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Insert a new root object and return its ID.
    pub fn insert(&mut self, value: T) -> ObjectId {
        let id = self.objects.insert(ObjectData {
            name: String::new(),
            parent: None,
            children: Vec::new(),
            value,
        });
        tracing::trace!(target: targets::OBJECT, ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Insert a new object as the front-most child of `parent`.
    pub fn insert_child(&mut self, parent: ObjectId, value: T) -> ObjectResult<ObjectId> {
        if !self.objects.contains_key(parent) {
            return Err(ObjectError::InvalidObjectId);
        }
        let id = self.insert(value);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Remove an object and all its descendants from the registry.
    ///
    /// Returns the removed ids, descendants first and `id` last.
    #[tracing::instrument(skip(self), target = "nux_core::object", level = "trace")]
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut removed = self.collect_descendants(id)?;
        tracing::trace!(target: targets::OBJECT, ?id, descendant_count = removed.len(), "destroying object tree");

        if let Some(parent_id) = self.objects.get(id).and_then(|d| d.parent)
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        for &child_id in &removed {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);
        removed.push(id);

        Ok(removed)
    }

    /// Collect all descendant IDs in depth-first order (children before parents).
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if an object exists in the registry.
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Get the object behind `id`, if it is still alive.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.objects.get(id).map(|d| &d.value)
    }

    /// Get the object behind `id` mutably, if it is still alive.
    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects.get_mut(id).map(|d| &mut d.value)
    }

    /// Set the parent of an object.
    ///
    /// The object becomes the front-most child of its new parent.
    /// Passing `None` makes the object a root object.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.objects.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.push(id);
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is `id` itself or one of its ancestors.
    pub fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object, back to front.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: impl Into<String>) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name.into();
        Ok(())
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over objects that have no parent.
    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, d)| d.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Raise an object to the front (highest z-order among siblings).
    pub fn raise(&mut self, id: ObjectId) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;

        if let Some(parent_id) = data.parent {
            let parent_data = self
                .objects
                .get_mut(parent_id)
                .ok_or(ObjectError::InvalidObjectId)?;
            parent_data.children.retain(|&child| child != id);
            parent_data.children.push(id);
        }
        Ok(())
    }

    /// Lower an object to the back (lowest z-order among siblings).
    pub fn lower(&mut self, id: ObjectId) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;

        if let Some(parent_id) = data.parent {
            let parent_data = self
                .objects
                .get_mut(parent_id)
                .ok_or(ObjectError::InvalidObjectId)?;
            parent_data.children.retain(|&child| child != id);
            parent_data.children.insert(0, id);
        }
        Ok(())
    }

    /// Get all ancestors of an object from immediate parent to root.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        let mut result = Vec::new();
        let mut current = self.objects.get(id).and_then(|d| d.parent);
        while let Some(current_id) = current {
            result.push(current_id);
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        Ok(result)
    }

    /// Perform a depth-first pre-order traversal starting from an object.
    ///
    /// Returns objects in the order: root, child1, grandchild1, grandchild2, child2, ...
    pub fn depth_first_preorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.depth_first_preorder_recursive(id, &mut result)?;
        Ok(result)
    }

    fn depth_first_preorder_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        result.push(id);
        for &child_id in &data.children {
            self.depth_first_preorder_recursive(child_id, result)?;
        }
        Ok(())
    }
}

impl<T> Default for ObjectRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
