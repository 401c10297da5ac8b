//! Dense per-component-type storage with insertion-order iteration.
//!
//! A [`ComponentStore<T>`] holds every `T` currently attached to an entity in
//! two parallel dense vectors (entities and components) plus a sparse lookup
//! map. Iteration yields entries in the order they were inserted, and that
//! order is stable across lookups and mutation of *other* entities. The
//! physics step leans on this: pairwise collision scanning, follower tier
//! ordering, and the narrow-phase sign convention are all defined in terms of
//! store order, so the store must never reorder survivors on removal.
//!
//! Removal is `O(n)` (`Vec::remove`, not swap-remove) precisely to preserve
//! that order. Scenes are a few hundred entities, so this is a deliberate
//! trade of asymptotics for determinism.

use std::collections::HashMap;

use crate::entity::EntityId;

// ---------------------------------------------------------------------------
// ComponentStore
// ---------------------------------------------------------------------------

/// Dense storage for a single component type, keyed by [`EntityId`].
///
/// At most one `T` per entity. Inserting for an entity that already has a
/// `T` replaces the value in place without changing its position in the
/// iteration order.
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    /// Entity owning the component at the same index in `components`.
    entities: Vec<EntityId>,
    /// Component values, parallel to `entities`.
    components: Vec<T>,
    /// Sparse lookup: entity -> dense index.
    index_of: HashMap<EntityId, usize>,
}

impl<T> ComponentStore<T> {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            components: Vec::new(),
            index_of: HashMap::new(),
        }
    }

    /// Number of components currently stored.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity holds this component type.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns `true` if `entity` holds a component in this store.
    pub fn has(&self, entity: EntityId) -> bool {
        self.index_of.contains_key(&entity)
    }

    /// Attach `component` to `entity`.
    ///
    /// If the entity already holds a component of this type, the value is
    /// replaced in place (keeping its insertion-order slot) and the previous
    /// value is returned.
    pub fn insert(&mut self, entity: EntityId, component: T) -> Option<T> {
        if let Some(&idx) = self.index_of.get(&entity) {
            Some(std::mem::replace(&mut self.components[idx], component))
        } else {
            self.index_of.insert(entity, self.entities.len());
            self.entities.push(entity);
            self.components.push(component);
            None
        }
    }

    /// Shared reference to the component attached to `entity`, if any.
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.index_of.get(&entity).map(|&idx| &self.components[idx])
    }

    /// Mutable reference to the component attached to `entity`, if any.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        if let Some(&idx) = self.index_of.get(&entity) {
            Some(&mut self.components[idx])
        } else {
            None
        }
    }

    /// Detach and return the component attached to `entity`.
    ///
    /// Survivors keep their relative order; dense indices after the removed
    /// slot shift down by one.
    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        let idx = self.index_of.remove(&entity)?;
        self.entities.remove(idx);
        let component = self.components.remove(idx);
        for shifted in &self.entities[idx..] {
            if let Some(slot) = self.index_of.get_mut(shifted) {
                *slot -= 1;
            }
        }
        Some(component)
    }

    /// The entities holding this component type, in insertion order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Iterate `(entity, &component)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entities
            .iter()
            .copied()
            .zip(self.components.iter())
    }

    /// Iterate `(entity, &mut component)` pairs in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entities
            .iter()
            .copied()
            .zip(self.components.iter_mut())
    }

    /// Remove every component from the store.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.index_of.clear();
    }
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
