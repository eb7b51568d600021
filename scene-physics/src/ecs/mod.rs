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
//! Entity Component System (ECS) core implementation
//!
//! This module provides:
//! - Entity management with monotonic, never-reused ids
//! - Type-erased component storage, one map per component type
//! - The scene components (`Transform`, `RigidBody`, `Extent`, `Controlled`)
//! - System execution framework and the fixed-step physics system

mod entity;
mod component;
mod system;
mod world;

/// Scene components
pub mod components;

/// Built-in systems
pub mod systems;

pub use entity::{Entity, EntityId, EntityRegistry};
pub use component::{Component, ComponentKey, ComponentSet, ComponentStorage, ComponentStore, HashMapStorage};
pub use system::{StepContext, System, SystemExecutor};
pub use world::World;
