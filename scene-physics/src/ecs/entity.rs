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
//! Entity management
//!
//! Entities are opaque identifiers that tie components together. They carry
//! no data of their own; identity is the only thing that matters.

use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for an entity
///
/// Identifiers come from a monotonically increasing counter and are never
/// handed out twice by the same registry, even after removal or `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new EntityId from a raw u64 value
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Entity handle returned by [`EntityRegistry::create`]
///
/// Every API that accepts "an entity or its id" takes `impl Into<EntityId>`,
/// so a handle and a bare id can be used interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    fn new(id: EntityId) -> Self {
        Entity { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl From<Entity> for EntityId {
    fn from(entity: Entity) -> Self {
        entity.id
    }
}

impl From<&Entity> for EntityId {
    fn from(entity: &Entity) -> Self {
        entity.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

/// Owns the set of live entities
#[derive(Debug, Default)]
pub struct EntityRegistry {
    next_id: u64,
    alive: BTreeSet<EntityId>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity and mark it alive
    pub fn create(&mut self) -> Entity {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        Entity::new(id)
    }

    /// Look up a live entity by id
    pub fn get(&self, id: impl Into<EntityId>) -> Option<Entity> {
        let id = id.into();
        self.alive.contains(&id).then(|| Entity::new(id))
    }

    /// Remove an entity from the live set
    ///
    /// Returns `false` if it was not alive.
    pub fn remove(&mut self, id: impl Into<EntityId>) -> bool {
        self.alive.remove(&id.into())
    }

    /// Check whether an entity is alive
    pub fn exists(&self, id: impl Into<EntityId>) -> bool {
        self.alive.contains(&id.into())
    }

    /// Drop every live entity; the id counter keeps counting
    pub fn clear(&mut self) {
        self.alive.clear();
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Whether no entity is alive
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Live entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().copied().map(Entity::new)
    }
}
