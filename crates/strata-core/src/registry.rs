//! Entity registry for Strata.
//!
//! Provides arena-based storage for layout entities with:
//! - Stable [`EntityId`] handles via slotmap keys
//! - A key index that keeps entities ordered by their family key
//! - Duplicate/missing-key failure signaling
//!
//! One registry instance backs each entity family; the generic key parameter
//! carries the family's ordering semantics (integer index, signed altitude,
//! or composite key). Cross-references between entities are held as
//! [`EntityId`]s or family keys plus a lookup, never as owning pointers, so
//! releasing an entity cannot leave a dangling owner behind.

use std::collections::BTreeMap;
use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::error::{RegistryError, Result};

new_key_type! {
    /// A stable identifier for an entity in a registry.
    ///
    /// `EntityId`s remain valid across re-links and key reorderings; they
    /// become invalid only when the entity is removed. An id is meaningful
    /// only within the registry that produced it.
    pub struct EntityId;
}

/// Arena-backed storage for one ordered family of entities.
///
/// Entities live in a slotmap arena addressed by [`EntityId`]; a `BTreeMap`
/// index maps each family key to its id and provides key-ordered iteration.
/// The registry performs bookkeeping only — it never touches neighbor state
/// or emits geometry.
pub struct EntityRegistry<K, T> {
    arena: SlotMap<EntityId, T>,
    index: BTreeMap<K, EntityId>,
}

impl<K, T> EntityRegistry<K, T>
where
    K: Ord + Copy + fmt::Debug,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            index: BTreeMap::new(),
        }
    }

    /// Register an entity under `key`.
    ///
    /// Fails with [`RegistryError::DuplicateKey`] if the key is taken; the
    /// entity is returned untouched inside the error path's drop.
    pub fn insert(&mut self, key: K, entity: T) -> Result<EntityId> {
        if self.index.contains_key(&key) {
            return Err(RegistryError::duplicate(key));
        }
        let id = self.arena.insert(entity);
        self.index.insert(key, id);
        tracing::trace!(target: crate::logging::targets::REGISTRY, ?key, ?id, "registered entity");
        Ok(id)
    }

    /// Remove the entity keyed `key` and return it.
    ///
    /// Fails with [`RegistryError::MissingKey`] if absent. The caller is
    /// responsible for releasing the returned entity.
    pub fn remove(&mut self, key: K) -> Result<T> {
        let id = self
            .index
            .remove(&key)
            .ok_or_else(|| RegistryError::missing(key))?;
        tracing::trace!(target: crate::logging::targets::REGISTRY, ?key, ?id, "removed entity");
        // The index is the only path to this id, so the slot must be live.
        self.arena
            .remove(id)
            .ok_or_else(|| RegistryError::missing(key))
    }

    /// Whether an entity is registered under `key`.
    pub fn contains(&self, key: K) -> bool {
        self.index.contains_key(&key)
    }

    /// Look up an entity by key.
    pub fn get(&self, key: K) -> Result<&T> {
        let id = self.id_of(key)?;
        self.arena.get(id).ok_or_else(|| RegistryError::missing(key))
    }

    /// Look up an entity mutably by key.
    pub fn get_mut(&mut self, key: K) -> Result<&mut T> {
        let id = self.id_of(key)?;
        self.arena
            .get_mut(id)
            .ok_or_else(|| RegistryError::missing(key))
    }

    /// Resolve a key to its stable id.
    pub fn id_of(&self, key: K) -> Result<EntityId> {
        self.index
            .get(&key)
            .copied()
            .ok_or_else(|| RegistryError::missing(key))
    }

    /// Look up an entity by id. Returns `None` for removed ids.
    pub fn by_id(&self, id: EntityId) -> Option<&T> {
        self.arena.get(id)
    }

    /// Look up an entity mutably by id.
    pub fn by_id_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.arena.get_mut(id)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.index.keys().copied()
    }

    /// Iterate over `(key, id)` pairs in ascending key order.
    pub fn ids_ordered(&self) -> impl Iterator<Item = (K, EntityId)> + '_ {
        self.index.iter().map(|(k, id)| (*k, *id))
    }

    /// Iterate over entities in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.index.values().filter_map(|id| self.arena.get(*id))
    }
}

impl<K, T> Default for EntityRegistry<K, T>
where
    K: Ord + Copy + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> fmt::Debug for EntityRegistry<K, T>
where
    K: Ord + Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("len", &self.index.len())
            .field("keys", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut registry: EntityRegistry<u32, String> = EntityRegistry::new();
        let id = registry.insert(3, "three".into()).unwrap();

        assert!(registry.contains(3));
        assert_eq!(registry.get(3).unwrap(), "three");
        assert_eq!(registry.id_of(3).unwrap(), id);
        assert_eq!(registry.by_id(id).map(String::as_str), Some("three"));
    }

    #[test]
    fn duplicate_key_fails() {
        let mut registry: EntityRegistry<u32, &str> = EntityRegistry::new();
        registry.insert(1, "a").unwrap();

        let err = registry.insert(1, "b").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKey { .. }));
        // The original entry is untouched.
        assert_eq!(*registry.get(1).unwrap(), "a");
    }

    #[test]
    fn missing_key_fails() {
        let mut registry: EntityRegistry<i32, ()> = EntityRegistry::new();
        assert!(matches!(
            registry.get(-5),
            Err(RegistryError::MissingKey { .. })
        ));
        assert!(matches!(
            registry.remove(-5),
            Err(RegistryError::MissingKey { .. })
        ));
    }

    #[test]
    fn remove_returns_entity_and_invalidates_id() {
        let mut registry: EntityRegistry<u32, String> = EntityRegistry::new();
        let id = registry.insert(7, "seven".into()).unwrap();

        let removed = registry.remove(7).unwrap();
        assert_eq!(removed, "seven");
        assert!(!registry.contains(7));
        assert!(registry.by_id(id).is_none());
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut registry: EntityRegistry<i32, &str> = EntityRegistry::new();
        registry.insert(2, "b").unwrap();
        registry.insert(-1, "a").unwrap();
        registry.insert(5, "c").unwrap();

        let keys: Vec<i32> = registry.keys().collect();
        assert_eq!(keys, vec![-1, 2, 5]);

        let values: Vec<&str> = registry.values().copied().collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn composite_keys_order_lexicographically() {
        let mut registry: EntityRegistry<(u32, u32), &str> = EntityRegistry::new();
        registry.insert((1, 2), "b").unwrap();
        registry.insert((0, 9), "a").unwrap();
        registry.insert((1, 3), "c").unwrap();

        let keys: Vec<(u32, u32)> = registry.keys().collect();
        assert_eq!(keys, vec![(0, 9), (1, 2), (1, 3)]);
    }
}
