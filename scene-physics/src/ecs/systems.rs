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
//! Fixed-step physics system
//!
//! [`PhysicsSystem`] advances every entity that has both a [`Transform`] and
//! a [`RigidBody`]. Entities are visited in ascending id order. Each one goes
//! through the same eight phases:
//!
//! 1. gravity is added to the accumulated force (if the body has gravity)
//! 2. acceleration = force / mass
//! 3. velocity += acceleration * dt
//! 4. velocity *= damping
//! 5. position += velocity * dt
//! 6. force is reset to zero
//! 7. held movement keys nudge the velocity (only for [`Controlled`] bodies)
//! 8. velocity is reflected on any axis whose rendered bounds cross a scene edge
//!
//! Phases 1 to 6 belong to the [`Integrator`]; 7 and 8 are applied here.
//! Entities lacking either required component are skipped for the step.

use crate::collision::{detect_edges, respond, Aabb, EdgeResponse};
use crate::config::{KeyBindings, SimulationConfig};
use crate::ecs::components::{Controlled, Extent, RigidBody, Transform};
use crate::ecs::{EntityId, StepContext, System, World};
use crate::integration::{DampedEulerIntegrator, Integrator};
use crate::math::Vector2;

/// Steps every rigid body in the world by one fixed step
pub struct PhysicsSystem<I: Integrator = DampedEulerIntegrator> {
    integrator: I,
    input_speed: f64,
    bindings: KeyBindings,
    edges: Option<EdgeResponse>,
}

impl PhysicsSystem<DampedEulerIntegrator> {
    /// Build the system with a [`DampedEulerIntegrator`] from `config`
    pub fn from_config(config: &SimulationConfig) -> Self {
        PhysicsSystem::with_integrator(DampedEulerIntegrator::from_config(config), config)
    }
}

impl<I: Integrator> PhysicsSystem<I> {
    /// Build the system around a custom integrator
    pub fn with_integrator(integrator: I, config: &SimulationConfig) -> Self {
        let edges = config.collide_with_edges.then_some(EdgeResponse {
            restitution: config.restitution,
            min_bounce_velocity: config.min_bounce_velocity,
        });
        PhysicsSystem {
            integrator,
            input_speed: config.input_speed,
            bindings: config.bindings.clone(),
            edges,
        }
    }

    /// The integrator in use
    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Step every eligible entity, returning how many were updated
    pub fn step_world(&self, world: &mut World, ctx: &StepContext<'_>) -> usize {
        let ids: Vec<EntityId> = world.entities().map(|e| e.id()).collect();
        ids.into_iter()
            .filter(|id| self.step_entity(world, *id, ctx))
            .count()
    }

    /// Step a single entity; returns `false` if it was skipped
    pub fn step_entity(&self, world: &mut World, id: EntityId, ctx: &StepContext<'_>) -> bool {
        if !world.has_all::<(Transform, RigidBody)>(id) {
            log::trace!("{} lacks Transform or RigidBody, skipping", id);
            return false;
        }
        let (Some(mut transform), Some(mut body)) =
            (world.get::<Transform>(id).copied(), world.get::<RigidBody>(id).copied())
        else {
            return false;
        };

        if !self.integrator.integrate_body(ctx.dt, &mut transform, &mut body) {
            log::warn!("{} produced non-finite state, step discarded", id);
            if let Some(stored) = world.get_mut::<RigidBody>(id) {
                stored.clear_force();
            }
            return false;
        }

        if world.has::<Controlled>(id) {
            let impulse = ctx.input.impulse(&self.bindings, self.input_speed);
            if impulse != Vector2::ZERO {
                body.apply_impulse(impulse);
            }
        }

        if let Some(response) = &self.edges {
            let aabb = Aabb::from_transform(&transform, world.get::<Extent>(id));
            let contact = detect_edges(&aabb, &ctx.bounds);
            if contact.any() {
                log::trace!("{} hit scene edge {:?}", id, contact);
                body.set_velocity(respond(body.velocity(), contact, response));
            }
        }

        if let Some(stored) = world.get_mut::<Transform>(id) {
            *stored = transform;
        }
        if let Some(stored) = world.get_mut::<RigidBody>(id) {
            *stored = body;
        }
        true
    }
}

impl<I: Integrator> System for PhysicsSystem<I> {
    fn run(&mut self, world: &mut World, ctx: &StepContext<'_>) {
        let updated = self.step_world(world, ctx);
        log::trace!("Physics step dt={} updated {} bodies", ctx.dt, updated);
    }

    fn name(&self) -> &str {
        "PhysicsSystem"
    }
}
