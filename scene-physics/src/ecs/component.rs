// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Component storage and management
//!
//! Components are plain data records attached to entities. The
//! [`ComponentStore`] keeps one [`HashMapStorage`] per component type, keyed
//! by a stable [`ComponentKey`] derived from the type's `TypeId`. Consumers
//! never need to know the full set of component types up front: the first
//! attach of a type registers its storage.
//!
//! Absence is a normal state. Looking up a type that was never attached, or
//! an entity that has no value for a type, yields `None`/`false`.

use crate::ecs::EntityId;
use crate::error::EcsError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior. A component
/// that can hold values the simulation must never see (a zero mass, say)
/// overrides [`Component::validate`]; the store calls it on every attach.
pub trait Component: 'static + Send + Sync {
    /// Reject values that must not enter the store
    fn validate(&self) -> Result<(), EcsError> {
        Ok(())
    }
}

/// Stable per-type key for component storage
///
/// Equality and hashing use only the `TypeId`, so two structurally identical
/// record types still get distinct keys. The type name is kept for logs.
#[derive(Clone, Copy)]
pub struct ComponentKey {
    id: TypeId,
    name: &'static str,
}

impl ComponentKey {
    /// Key for component type `T`
    pub fn of<T: Component>() -> Self {
        ComponentKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name of the component
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ComponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentKey {}

impl Hash for ComponentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKey({})", self.short_name())
    }
}

/// Storage interface for a single component type
pub trait ComponentStorage: Send + Sync {
    /// The component type this storage manages
    type Component: Component;

    /// Insert a component for the given entity, returning the value it replaced
    fn insert(&mut self, entity: EntityId, component: Self::Component) -> Option<Self::Component>;

    /// Remove a component for the given entity
    fn remove(&mut self, entity: EntityId) -> Option<Self::Component>;

    /// Get a reference to a component for the given entity
    fn get(&self, entity: EntityId) -> Option<&Self::Component>;

    /// Get a mutable reference to a component for the given entity
    fn get_mut(&mut self, entity: EntityId) -> Option<&mut Self::Component>;

    /// Check if an entity has this component
    fn contains(&self, entity: EntityId) -> bool;

    /// Number of stored components
    fn len(&self) -> usize;

    /// Whether the storage holds no components
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all components
    fn clear(&mut self);
}

/// Simple HashMap-based component storage
///
/// Lookups are by hash; no archetype or dense-array layout is attempted.
pub struct HashMapStorage<T: Component> {
    components: HashMap<EntityId, T>,
}

impl<T: Component> HashMapStorage<T> {
    /// Create a new empty storage
    pub fn new() -> Self {
        HashMapStorage {
            components: HashMap::new(),
        }
    }

    /// Iterate over `(entity, component)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.components.iter().map(|(id, c)| (*id, c))
    }
}

impl<T: Component> Default for HashMapStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentStorage for HashMapStorage<T> {
    type Component = T;

    fn insert(&mut self, entity: EntityId, component: Self::Component) -> Option<Self::Component> {
        self.components.insert(entity, component)
    }

    fn remove(&mut self, entity: EntityId) -> Option<Self::Component> {
        self.components.remove(&entity)
    }

    fn get(&self, entity: EntityId) -> Option<&Self::Component> {
        self.components.get(&entity)
    }

    fn get_mut(&mut self, entity: EntityId) -> Option<&mut Self::Component> {
        self.components.get_mut(&entity)
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.components.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn clear(&mut self) {
        self.components.clear();
    }
}

/// Type-erased view of a [`HashMapStorage`], enough to cascade removals
/// and answer existence queries without knowing `T`
trait ErasedStorage: Send + Sync {
    fn remove_entity(&mut self, entity: EntityId) -> bool;
    fn has_entity(&self, entity: EntityId) -> bool;
    fn stored(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for HashMapStorage<T> {
    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.components.remove(&entity).is_some()
    }

    fn has_entity(&self, entity: EntityId) -> bool {
        self.components.contains_key(&entity)
    }

    fn stored(&self) -> usize {
        self.components.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All component storages, keyed by component type
///
/// Conceptually `Map<ComponentKey, Map<EntityId, T>>`. At most one value
/// exists per (type, entity) pair; inserting again overwrites.
#[derive(Default)]
pub struct ComponentStore {
    storages: HashMap<ComponentKey, Box<dyn ErasedStorage>>,
}

impl ComponentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a component, returning the value it replaced
    pub fn insert<T: Component>(&mut self, entity: EntityId, component: T) -> Result<Option<T>, EcsError> {
        component.validate()?;
        Ok(self.storage_or_default::<T>().insert(entity, component))
    }

    /// Get a component, or `None` if absent or the type was never stored
    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get a component mutably
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Remove a single (type, entity) entry
    pub fn remove<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Whether `entity` has a `T`
    pub fn contains<T: Component>(&self, entity: EntityId) -> bool {
        self.contains_key(ComponentKey::of::<T>(), entity)
    }

    /// Whether `entity` has a value for the type behind `key`
    pub fn contains_key(&self, key: ComponentKey, entity: EntityId) -> bool {
        self.storages
            .get(&key)
            .map_or(false, |storage| storage.has_entity(entity))
    }

    /// Whether `entity` has every component type in the tuple `S`
    pub fn contains_all<S: ComponentSet>(&self, entity: EntityId) -> bool {
        S::contained_in(self, entity)
    }

    /// Whether `entity` has every listed component type
    ///
    /// An empty list is vacuously satisfied.
    pub fn contains_all_keys(&self, keys: &[ComponentKey], entity: EntityId) -> bool {
        keys.iter().all(|key| self.contains_key(*key, entity))
    }

    /// Remove every component belonging to `entity`, returning how many were dropped
    pub fn remove_entity(&mut self, entity: EntityId) -> usize {
        self.storages
            .values_mut()
            .map(|storage| storage.remove_entity(entity))
            .filter(|removed| *removed)
            .count()
    }

    /// Drop every component of every type
    pub fn clear(&mut self) {
        self.storages.clear();
    }

    /// Number of stored `T` components
    pub fn count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, |storage| storage.len())
    }

    /// Total number of stored components across all types
    pub fn total_count(&self) -> usize {
        self.storages.values().map(|storage| storage.stored()).sum()
    }

    /// Number of component types that have been stored
    pub fn type_count(&self) -> usize {
        self.storages.len()
    }

    /// Typed storage for `T`, if any `T` was ever stored
    pub fn storage<T: Component>(&self) -> Option<&HashMapStorage<T>> {
        self.storages
            .get(&ComponentKey::of::<T>())?
            .as_any()
            .downcast_ref::<HashMapStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut HashMapStorage<T>> {
        self.storages
            .get_mut(&ComponentKey::of::<T>())?
            .as_any_mut()
            .downcast_mut::<HashMapStorage<T>>()
    }

    fn storage_or_default<T: Component>(&mut self) -> &mut HashMapStorage<T> {
        let key = ComponentKey::of::<T>();
        let storage = self.storages.entry(key).or_insert_with(|| {
            log::trace!("Registering storage for {}", key.short_name());
            Box::new(HashMapStorage::<T>::new())
        });
        match storage.as_any_mut().downcast_mut::<HashMapStorage<T>>() {
            Some(typed) => typed,
            None => unreachable!("storage for {} registered under a foreign key", key.name()),
        }
    }
}

/// A tuple of component types, used for "has all of these" queries
///
/// Implemented for tuples of one to six components:
///
/// ```
/// use scene_physics::ecs::World;
/// use scene_physics::ecs::components::{RigidBody, Transform};
///
/// let mut world = World::new();
/// let e = world.create_entity();
/// world.attach(e, Transform::default()).unwrap();
/// assert!(!world.has_all::<(Transform, RigidBody)>(e));
/// world.attach(e, RigidBody::new(1.0)).unwrap();
/// assert!(world.has_all::<(Transform, RigidBody)>(e));
/// ```
pub trait ComponentSet {
    /// Keys of every type in the set
    fn keys() -> Vec<ComponentKey>;

    /// Whether `entity` has every type in the set
    fn contained_in(store: &ComponentStore, entity: EntityId) -> bool;
}

macro_rules! impl_component_set {
    ($($t:ident),+) => {
        impl<$($t: Component),+> ComponentSet for ($($t,)+) {
            fn keys() -> Vec<ComponentKey> {
                vec![$(ComponentKey::of::<$t>()),+]
            }

            fn contained_in(store: &ComponentStore, entity: EntityId) -> bool {
                true $(&& store.contains::<$t>(entity))+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
