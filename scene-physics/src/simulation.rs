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
//! Top-level simulation driver
//!
//! [`Simulation`] owns the world, the systems, the fixed-step clock, the
//! input snapshot and the scene bounds. The host calls
//! [`Simulation::advance_frame`] once per rendered frame with the wall-clock
//! delta, then reads back whatever it draws.

use crate::collision::SceneBounds;
use crate::config::SimulationConfig;
use crate::ecs::components::{Controlled, Extent, RigidBody, Transform};
use crate::ecs::systems::PhysicsSystem;
use crate::ecs::{Component, ComponentSet, Entity, EntityId, StepContext, System, SystemExecutor, World};
use crate::error::{ConfigError, EcsError};
use crate::input::InputState;
use crate::integration::Integrator;
use crate::time::FixedTimestep;

/// A single scene: entities, physics, clock and input
pub struct Simulation {
    world: World,
    executor: SystemExecutor,
    clock: FixedTimestep,
    input: InputState,
    bounds: SceneBounds,
    tracked: Option<EntityId>,
    config: SimulationConfig,
}

impl Simulation {
    /// Create a simulation for a `width` x `height` scene
    ///
    /// The config is validated and a [`PhysicsSystem`] built from it is
    /// registered as the first system.
    pub fn new(config: SimulationConfig, width: f64, height: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = SceneBounds::new(width, height);
        if !bounds.is_valid() {
            return Err(ConfigError::Invalid {
                field: "scene_bounds",
                reason: format!("{}x{} must be non-negative and finite", width, height),
            });
        }

        let clock = FixedTimestep::new(config.fixed_step)?
            .with_max_steps_per_frame(config.max_steps_per_frame);

        let physics = PhysicsSystem::from_config(&config);
        if let Err(e) = physics.integrator().validate_timestep(config.fixed_step) {
            log::warn!("{}", e);
        }

        let mut executor = SystemExecutor::new();
        executor.add_system(physics);

        log::debug!(
            "Simulation ready: step {:.6}s, scene {}x{}",
            config.fixed_step,
            width,
            height
        );
        Ok(Simulation {
            world: World::new(),
            executor,
            clock,
            input: InputState::new(),
            bounds,
            tracked: None,
            config,
        })
    }

    /// Append a system that runs after the built-in ones every step
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.executor.add_system(system);
    }

    /// Bank `frame_delta` seconds and run every whole fixed step it pays for
    ///
    /// Returns the number of steps run. Invalid deltas count as zero.
    pub fn advance_frame(&mut self, frame_delta: f64) -> usize {
        let world = &mut self.world;
        let executor = &mut self.executor;
        let input = &self.input;
        let bounds = self.bounds;

        let steps = self.clock.advance(frame_delta, |dt| {
            let ctx = StepContext { dt, input, bounds };
            executor.run(world, &ctx);
        });

        log::debug!(
            "Frame {:.6}s ran {} steps, {:.6}s banked",
            frame_delta,
            steps,
            self.clock.banked()
        );
        steps
    }

    /// Create an entity with a body and optional extent and control marker
    ///
    /// Either every component is attached or the entity is removed again
    /// and the first error returned.
    pub fn spawn_body(
        &mut self,
        transform: Transform,
        body: RigidBody,
        extent: Option<Extent>,
        controlled: bool,
    ) -> Result<Entity, EcsError> {
        let entity = self.world.create_entity();
        if let Err(e) = self.attach_body(entity, transform, body, extent, controlled) {
            self.world.remove_entity(entity);
            return Err(e);
        }
        Ok(entity)
    }

    fn attach_body(
        &mut self,
        entity: Entity,
        transform: Transform,
        body: RigidBody,
        extent: Option<Extent>,
        controlled: bool,
    ) -> Result<(), EcsError> {
        self.world.attach(entity, transform)?;
        self.world.attach(entity, body)?;
        if let Some(extent) = extent {
            self.world.attach(entity, extent)?;
        }
        if controlled {
            self.world.attach(entity, Controlled)?;
        }
        Ok(())
    }

    /// Mark the entity whose transform the renderer follows
    pub fn track(&mut self, id: impl Into<EntityId>) {
        self.tracked = Some(id.into());
    }

    /// Stop following any entity
    pub fn untrack(&mut self) {
        self.tracked = None;
    }

    /// The tracked entity, if it is still alive
    pub fn tracked(&self) -> Option<Entity> {
        self.tracked.and_then(|id| self.world.get_entity(id))
    }

    /// Transform of the tracked entity, for the render collaborator
    pub fn tracked_transform(&self) -> Option<&Transform> {
        self.tracked.and_then(|id| self.world.get::<Transform>(id))
    }

    /// Record a key as pressed or released
    pub fn set_key(&mut self, key: impl Into<String>, pressed: bool) {
        self.input.set(key, pressed);
    }

    /// Current input snapshot
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable input snapshot
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Resize the scene; invalid sizes are ignored with a warning
    pub fn set_scene_bounds(&mut self, width: f64, height: f64) {
        let bounds = SceneBounds::new(width, height);
        if !bounds.is_valid() {
            log::warn!("Ignoring invalid scene bounds {}x{}", width, height);
            return;
        }
        self.bounds = bounds;
    }

    /// Current scene bounds
    pub fn scene_bounds(&self) -> SceneBounds {
        self.bounds
    }

    /// The fixed-step clock
    pub fn clock(&self) -> &FixedTimestep {
        &self.clock
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Create an empty entity
    pub fn create_entity(&mut self) -> Entity {
        self.world.create_entity()
    }

    /// Remove an entity and all its components
    pub fn remove_entity(&mut self, id: impl Into<EntityId>) -> bool {
        self.world.remove_entity(id)
    }

    /// Remove every entity and component
    pub fn clear_entities(&mut self) {
        self.world.clear_entities();
    }

    /// Drop every component; entities stay alive
    pub fn clear_components(&mut self) {
        self.world.clear_components();
    }

    /// Attach a component, replacing any previous one of the same type
    pub fn attach<T: Component>(&mut self, id: impl Into<EntityId>, component: T) -> Result<(), EcsError> {
        self.world.attach(id, component)
    }

    /// Get a component
    pub fn get<T: Component>(&self, id: impl Into<EntityId>) -> Option<&T> {
        self.world.get(id)
    }

    /// Get a component mutably; writes are not validated
    pub fn get_mut<T: Component>(&mut self, id: impl Into<EntityId>) -> Option<&mut T> {
        self.world.get_mut(id)
    }

    /// Modify a component, storing the result only if it validates
    pub fn update<T, F>(&mut self, id: impl Into<EntityId>, f: F) -> Result<bool, EcsError>
    where
        T: Component + Clone,
        F: FnOnce(&mut T),
    {
        self.world.update(id, f)
    }

    /// Remove a component
    pub fn remove<T: Component>(&mut self, id: impl Into<EntityId>) -> Option<T> {
        self.world.remove(id)
    }

    /// Check for a component
    pub fn has<T: Component>(&self, id: impl Into<EntityId>) -> bool {
        self.world.has::<T>(id)
    }

    /// Check for every component in the tuple `S`
    pub fn has_all<S: ComponentSet>(&self, id: impl Into<EntityId>) -> bool {
        self.world.has_all::<S>(id)
    }
}
