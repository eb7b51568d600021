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
//! World management
//!
//! The World is the central container for all ECS data: it owns the
//! [`EntityRegistry`] and the [`ComponentStore`] and keeps them consistent.
//! Removing an entity removes every component it had, so no component data
//! outlives its entity.

use crate::ecs::{Component, ComponentKey, ComponentSet, ComponentStore, Entity, EntityId, EntityRegistry};
use crate::error::EcsError;

/// The main ECS world container
///
/// A world is owned explicitly and passed by reference to whatever needs it;
/// there is no global instance.
#[derive(Default)]
pub struct World {
    entities: EntityRegistry,
    components: ComponentStore,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        log::debug!("Created {}", entity);
        entity
    }

    /// Look up a live entity
    pub fn get_entity(&self, id: impl Into<EntityId>) -> Option<Entity> {
        self.entities.get(id)
    }

    /// Remove an entity and every component attached to it
    ///
    /// Removing an entity that is not alive is a no-op and returns `false`.
    pub fn remove_entity(&mut self, id: impl Into<EntityId>) -> bool {
        let id = id.into();
        if !self.entities.remove(id) {
            return false;
        }
        let dropped = self.components.remove_entity(id);
        log::debug!("Removed {} and {} component(s)", id, dropped);
        true
    }

    /// Check if an entity is alive
    pub fn has_entity(&self, id: impl Into<EntityId>) -> bool {
        self.entities.exists(id)
    }

    /// Remove all entities and, with them, all components
    pub fn clear_entities(&mut self) {
        log::debug!("Clearing {} entities", self.entities.len());
        self.entities.clear();
        self.components.clear();
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entities in ascending id order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    /// Attach a component, overwriting any previous value of the same type
    ///
    /// Fails if the entity is not alive or the component rejects its own
    /// contents. On failure nothing is stored.
    pub fn attach<T: Component>(&mut self, id: impl Into<EntityId>, component: T) -> Result<(), EcsError> {
        let id = id.into();
        if !self.entities.exists(id) {
            return Err(EcsError::NoSuchEntity(id));
        }
        if self.components.insert(id, component)?.is_some() {
            log::trace!("Overwrote {} on {}", ComponentKey::of::<T>().short_name(), id);
        }
        Ok(())
    }

    /// Get a component
    pub fn get<T: Component>(&self, id: impl Into<EntityId>) -> Option<&T> {
        self.components.get(id.into())
    }

    /// Get a component mutably
    ///
    /// Writes through this reference skip [`Component::validate`]. Use
    /// [`World::update`] when the new value has to be checked.
    pub fn get_mut<T: Component>(&mut self, id: impl Into<EntityId>) -> Option<&mut T> {
        self.components.get_mut(id.into())
    }

    /// Modify a component and validate the result before storing it
    ///
    /// Returns `Ok(false)` if the entity has no `T`. A modified value that
    /// fails validation is dropped and the stored one is left as it was.
    pub fn update<T, F>(&mut self, id: impl Into<EntityId>, f: F) -> Result<bool, EcsError>
    where
        T: Component + Clone,
        F: FnOnce(&mut T),
    {
        let Some(stored) = self.components.get_mut::<T>(id.into()) else {
            return Ok(false);
        };
        let mut candidate = stored.clone();
        f(&mut candidate);
        candidate.validate()?;
        *stored = candidate;
        Ok(true)
    }

    /// Remove a single component, returning it if it was present
    pub fn remove<T: Component>(&mut self, id: impl Into<EntityId>) -> Option<T> {
        self.components.remove(id.into())
    }

    /// Check if an entity has a component
    pub fn has<T: Component>(&self, id: impl Into<EntityId>) -> bool {
        self.components.contains::<T>(id.into())
    }

    /// Check if an entity has every component in the tuple `S`
    pub fn has_all<S: ComponentSet>(&self, id: impl Into<EntityId>) -> bool {
        self.components.contains_all::<S>(id.into())
    }

    /// Check if an entity has every listed component type
    pub fn has_all_keys(&self, keys: &[ComponentKey], id: impl Into<EntityId>) -> bool {
        self.components.contains_all_keys(keys, id.into())
    }

    /// Drop every component of every type; entities stay alive
    pub fn clear_components(&mut self) {
        self.components.clear();
    }

    /// Number of entities carrying a `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.components.count::<T>()
    }

    /// Read access to the component store
    pub fn components(&self) -> &ComponentStore {
        &self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{RigidBody, Transform};
    use crate::math::Vector2;

    #[test]
    fn test_world_entity_lifecycle() {
        let mut world = World::new();

        let e1 = world.create_entity();
        let e2 = world.create_entity();

        assert_eq!(world.entity_count(), 2);
        assert!(world.has_entity(e1));
        assert!(world.has_entity(e2));

        assert!(world.remove_entity(e1));
        assert_eq!(world.entity_count(), 1);
        assert!(!world.has_entity(e1));
        assert!(world.has_entity(e2));
        assert_eq!(world.get_entity(e1.id()), None);
        assert_eq!(world.get_entity(e2.id()), Some(e2));
    }

    #[test]
    fn test_remove_entity_cascades() {
        let mut world = World::new();
        let e = world.create_entity();
        world.attach(e, Transform::from_xy(1.0, 2.0)).unwrap();
        world.attach(e, RigidBody::new(1.0)).unwrap();

        world.remove_entity(e.id());

        assert!(!world.has::<Transform>(e));
        assert!(world.get::<Transform>(e).is_none());
        assert!(!world.has::<RigidBody>(e));
        assert_eq!(world.components().total_count(), 0);
    }

    #[test]
    fn test_remove_missing_entity_is_noop() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(!world.remove_entity(EntityId::new(1234)));
        assert!(world.remove_entity(e));
        assert!(!world.remove_entity(e));
    }

    #[test]
    fn test_attach_overwrites() {
        let mut world = World::new();
        let e = world.create_entity();
        world.attach(e, Transform::from_xy(1.0, 1.0)).unwrap();
        world.attach(e, Transform::from_xy(2.0, 2.0)).unwrap();
        assert_eq!(world.get::<Transform>(e), Some(&Transform::from_xy(2.0, 2.0)));
    }

    #[test]
    fn test_attach_to_dead_entity_fails() {
        let mut world = World::new();
        let e = world.create_entity();
        world.remove_entity(e);

        let err = world.attach(e, Transform::default()).unwrap_err();
        assert_eq!(err, EcsError::NoSuchEntity(e.id()));
        assert!(!world.has::<Transform>(e));
    }

    #[test]
    fn test_get_mut_and_remove_component() {
        let mut world = World::new();
        let e = world.create_entity();
        world.attach(e, RigidBody::new(2.0)).unwrap();

        if let Some(body) = world.get_mut::<RigidBody>(e) {
            body.set_velocity(Vector2::new(3.0, 0.0));
        }
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity(), Vector2::new(3.0, 0.0));

        let removed = world.remove::<RigidBody>(e).unwrap();
        assert_eq!(removed.mass(), 2.0);
        assert!(!world.has::<RigidBody>(e));
        assert!(world.remove::<RigidBody>(e).is_none());
        assert!(world.has_entity(e));
    }

    #[test]
    fn test_update_validates_before_storing() {
        let mut world = World::new();
        let e = world.create_entity();
        world.attach(e, RigidBody::new(1.0)).unwrap();

        let stored = world.update::<RigidBody, _>(e, |body| body.set_velocity(Vector2::new(2.0, 0.0)));
        assert_eq!(stored, Ok(true));
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity(), Vector2::new(2.0, 0.0));

        let result = world.update::<RigidBody, _>(e, |body| body.set_velocity(Vector2::new(f64::INFINITY, 0.0)));
        assert!(matches!(result, Err(EcsError::InvalidComponent { component: "RigidBody", .. })));
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity(), Vector2::new(2.0, 0.0));

        let result = world.update::<Transform, _>(e, |t| t.set_position(Vector2::new(f64::NAN, 0.0)));
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_has_all() {
        let mut world = World::new();
        let e = world.create_entity();
        world.attach(e, Transform::default()).unwrap();

        assert!(world.has_all::<(Transform,)>(e));
        assert!(!world.has_all::<(Transform, RigidBody)>(e));
        assert!(!world.has_all_keys(&[ComponentKey::of::<Transform>(), ComponentKey::of::<RigidBody>()], e));

        world.attach(e, RigidBody::default()).unwrap();
        assert!(world.has_all::<(Transform, RigidBody)>(e));
    }

    #[test]
    fn test_world_clear() {
        let mut world = World::new();
        let e1 = world.create_entity();
        let e2 = world.create_entity();
        world.attach(e1, Transform::default()).unwrap();
        world.attach(e2, Transform::default()).unwrap();

        world.clear_components();
        assert_eq!(world.entity_count(), 2);
        assert!(!world.has::<Transform>(e1));

        world.attach(e1, Transform::default()).unwrap();
        world.clear_entities();
        assert_eq!(world.entity_count(), 0);
        assert!(!world.has::<Transform>(e1));
        assert_eq!(world.components().total_count(), 0);
    }
}
