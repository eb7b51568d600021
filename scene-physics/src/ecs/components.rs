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
//! Scene components
//!
//! Components for a 2D body driven by the fixed-step integrator:
//! where it is ([`Transform`]), how it moves ([`RigidBody`]), how big it
//! looks ([`Extent`]) and whether the player steers it ([`Controlled`]).
//! All vectors use screen convention, positive y pointing down.

use crate::ecs::Component;
use crate::error::EcsError;
use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// Placement of an entity in the scene
///
/// Position is written by the integrator; rotation and scale only through
/// the explicit setters. Renderers treat it as read-only.
///
/// # Examples
///
/// ```
/// use scene_physics::ecs::components::Transform;
/// use scene_physics::math::Vector2;
///
/// let t = Transform::from_xy(100.0, 200.0).with_rotation(0.5);
/// assert_eq!(t.position(), Vector2::new(100.0, 200.0));
/// assert_eq!(t.scale(), Vector2::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    position: Vector2,
    rotation: f64,
    scale: Vector2,
}

impl Transform {
    /// Create a transform at `position` with no rotation and unit scale
    pub fn new(position: Vector2) -> Self {
        Transform {
            position,
            rotation: 0.0,
            scale: Vector2::ONE,
        }
    }

    /// Create a transform at `(x, y)`
    pub fn from_xy(x: f64, y: f64) -> Self {
        Transform::new(Vector2::new(x, y))
    }

    /// Builder-style rotation in radians
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// Builder-style scale
    pub fn with_scale(mut self, scale: Vector2) -> Self {
        self.scale = scale;
        self
    }

    /// Get the position
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    /// Get the rotation in radians
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
    }

    /// Get the scale
    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vector2) {
        self.scale = scale;
    }

    /// Check if all fields are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new(Vector2::ZERO)
    }
}

impl Component for Transform {
    fn validate(&self) -> Result<(), EcsError> {
        if !self.is_valid() {
            return Err(EcsError::invalid("Transform", "all fields must be finite"));
        }
        Ok(())
    }
}

/// Dynamic state of a body
///
/// `force` accumulates between steps and is cleared by the integrator after
/// every step. `acceleration` records the value computed in the last step.
///
/// Mass must be positive and finite. The constructor does not check it; the
/// store does, when the body is attached:
///
/// ```
/// use scene_physics::ecs::World;
/// use scene_physics::ecs::components::RigidBody;
///
/// let mut world = World::new();
/// let e = world.create_entity();
/// assert!(world.attach(e, RigidBody::new(0.0)).is_err());
/// assert!(world.attach(e, RigidBody::new(1.0)).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    mass: f64,
    force: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    has_gravity: bool,
}

impl RigidBody {
    /// Create a body at rest, affected by gravity
    pub fn new(mass: f64) -> Self {
        RigidBody {
            mass,
            force: Vector2::ZERO,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            has_gravity: true,
        }
    }

    /// Create a body, rejecting invalid mass up front
    pub fn try_new(mass: f64) -> Result<Self, EcsError> {
        let body = RigidBody::new(mass);
        body.validate()?;
        Ok(body)
    }

    /// Builder-style initial velocity
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style gravity flag
    pub fn with_gravity(mut self, has_gravity: bool) -> Self {
        self.has_gravity = has_gravity;
        self
    }

    /// Get the mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Get the force accumulated since the last step
    pub fn force(&self) -> Vector2 {
        self.force
    }

    /// Get the velocity
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Get the acceleration computed in the last step
    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub(crate) fn set_acceleration(&mut self, acceleration: Vector2) {
        self.acceleration = acceleration;
    }

    /// Whether gravity acts on this body
    pub fn has_gravity(&self) -> bool {
        self.has_gravity
    }

    /// Enable or disable gravity
    pub fn set_gravity(&mut self, has_gravity: bool) {
        self.has_gravity = has_gravity;
    }

    /// Add a force to the accumulator; it is consumed by the next step
    pub fn apply_force(&mut self, force: Vector2) {
        self.force += force;
    }

    /// Reset the accumulated force to zero
    pub fn clear_force(&mut self) {
        self.force = Vector2::ZERO;
    }

    /// Add an instantaneous change of velocity
    pub fn apply_impulse(&mut self, delta_velocity: Vector2) {
        self.velocity += delta_velocity;
    }

    /// Check that mass is positive and every vector finite
    pub fn is_valid(&self) -> bool {
        self.mass > 0.0
            && self.mass.is_finite()
            && self.force.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        RigidBody::new(1.0)
    }
}

impl Component for RigidBody {
    fn validate(&self) -> Result<(), EcsError> {
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(EcsError::invalid(
                "RigidBody",
                format!("mass {} must be positive and finite", self.mass),
            ));
        }
        if !(self.force.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()) {
            return Err(EcsError::invalid("RigidBody", "force, velocity and acceleration must be finite"));
        }
        Ok(())
    }
}

/// Visual footprint of an entity, used for edge collision
///
/// `anchor` is the fraction of the size that sits before the position on
/// each axis: `(0, 0)` puts the position at the top-left corner,
/// `(0.5, 0.5)` at the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    size: Vector2,
    anchor: Vector2,
}

impl Extent {
    /// Create an extent anchored at its top-left corner
    pub fn new(width: f64, height: f64) -> Self {
        Extent {
            size: Vector2::new(width, height),
            anchor: Vector2::ZERO,
        }
    }

    /// Builder-style anchor
    pub fn with_anchor(mut self, anchor: Vector2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Unscaled size
    pub fn size(&self) -> Vector2 {
        self.size
    }

    /// Anchor point as a fraction of the size
    pub fn anchor(&self) -> Vector2 {
        self.anchor
    }
}

impl Component for Extent {
    fn validate(&self) -> Result<(), EcsError> {
        if !(self.size.is_finite() && self.size.x >= 0.0 && self.size.y >= 0.0) {
            return Err(EcsError::invalid("Extent", "size must be non-negative and finite"));
        }
        if !self.anchor.is_finite() {
            return Err(EcsError::invalid("Extent", "anchor must be finite"));
        }
        Ok(())
    }
}

/// Marker for the body steered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controlled;

impl Component for Controlled {}
