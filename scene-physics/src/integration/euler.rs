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
//! Damped semi-implicit Euler integrator
//!
//! # Algorithm
//!
//! One step, in this exact order:
//!
//! ```text
//! if gravity: F += (0, m * g)
//! a  = F / m
//! v' = v + a*dt
//! v' = v' * damping
//! p' = p + v'*dt
//! F  = 0
//! ```
//!
//! Damping is a plain multiply once per step, not `exp(-k*dt)`. It therefore
//! depends on the step size, which is why the scheduler keeps the step
//! constant. Swapping damping and the position update changes the
//! trajectory.

use crate::config::SimulationConfig;
use crate::ecs::components::{RigidBody, Transform};
use crate::math::Vector2;
use super::Integrator;

/// Semi-implicit Euler with uniform gravity and per-step damping
///
/// # Example
///
/// ```
/// use scene_physics::ecs::components::{RigidBody, Transform};
/// use scene_physics::integration::{DampedEulerIntegrator, Integrator};
///
/// let integrator = DampedEulerIntegrator::new(9.82, 0.992);
/// let mut transform = Transform::from_xy(100.0, 200.0);
/// let mut body = RigidBody::new(1.0);
///
/// assert!(integrator.integrate_body(1.0 / 60.0, &mut transform, &mut body));
/// assert!(body.velocity().y > 0.0); // falling, positive y is down
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedEulerIntegrator {
    gravity: f64,
    damping: f64,
}

impl DampedEulerIntegrator {
    /// Create an integrator with gravity magnitude `gravity` (along +y) and
    /// per-step velocity multiplier `damping`
    pub fn new(gravity: f64, damping: f64) -> Self {
        DampedEulerIntegrator { gravity, damping }
    }

    /// Create an integrator from a simulation config
    pub fn from_config(config: &SimulationConfig) -> Self {
        DampedEulerIntegrator::new(config.gravity, config.damping)
    }

    /// Gravitational acceleration magnitude
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Per-step damping factor
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

impl Integrator for DampedEulerIntegrator {
    fn name(&self) -> &str {
        "Damped semi-implicit Euler"
    }

    fn integrate_body(&self, dt: f64, transform: &mut Transform, body: &mut RigidBody) -> bool {
        let mass = body.mass();

        let mut force = body.force();
        if body.has_gravity() {
            force += Vector2::new(0.0, mass * self.gravity);
        }

        let acceleration = force / mass;
        let velocity = (body.velocity() + acceleration * dt) * self.damping;
        let position = transform.position() + velocity * dt;

        if !(acceleration.is_finite() && velocity.is_finite() && position.is_finite()) {
            body.clear_force();
            return false;
        }

        body.set_acceleration(acceleration);
        body.set_velocity(velocity);
        body.clear_force();
        transform.set_position(position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_single_step_order() {
        let integrator = DampedEulerIntegrator::new(9.82, 0.992);
        let mut transform = Transform::from_xy(100.0, 200.0);
        let mut body = RigidBody::new(2.0).with_velocity(Vector2::new(1.0, 0.0));
        body.apply_force(Vector2::new(4.0, 0.0));

        assert!(integrator.integrate_body(DT, &mut transform, &mut body));

        // a = (4, 2*9.82) / 2
        let a = Vector2::new(2.0, 9.82);
        let v = (Vector2::new(1.0, 0.0) + a * DT) * 0.992;
        let p = Vector2::new(100.0, 200.0) + v * DT;

        assert_eq!(body.acceleration(), a);
        assert_eq!(body.velocity(), v);
        assert_eq!(transform.position(), p);
        assert_eq!(body.force(), Vector2::ZERO);
    }

    #[test]
    fn test_damping_applied_before_position() {
        let integrator = DampedEulerIntegrator::new(0.0, 0.5);
        let mut transform = Transform::default();
        let mut body = RigidBody::new(1.0).with_velocity(Vector2::new(10.0, 0.0));

        integrator.integrate_body(1.0, &mut transform, &mut body);

        // Position moves with the damped velocity
        assert_eq!(body.velocity(), Vector2::new(5.0, 0.0));
        assert_eq!(transform.position(), Vector2::new(5.0, 0.0));
    }

    #[test]
    fn test_gravity_disabled_at_rest_stays_at_rest() {
        let integrator = DampedEulerIntegrator::new(9.82, 0.992);
        let mut transform = Transform::from_xy(5.0, 5.0);
        let mut body = RigidBody::new(1.0).with_gravity(false);

        for _ in 0..100 {
            integrator.integrate_body(DT, &mut transform, &mut body);
        }

        assert_eq!(body.velocity(), Vector2::ZERO);
        assert_eq!(transform.position(), Vector2::new(5.0, 5.0));
    }

    #[test]
    fn test_heavier_body_falls_at_same_rate() {
        let integrator = DampedEulerIntegrator::new(9.82, 1.0);
        let mut t1 = Transform::default();
        let mut t2 = Transform::default();
        let mut light = RigidBody::new(1.0);
        let mut heavy = RigidBody::new(1000.0);

        integrator.integrate_body(DT, &mut t1, &mut light);
        integrator.integrate_body(DT, &mut t2, &mut heavy);

        assert!((light.velocity().y - heavy.velocity().y).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_result_keeps_motion_and_drops_force() {
        let integrator = DampedEulerIntegrator::new(9.82, 0.992);
        let mut transform = Transform::from_xy(1.0, 1.0);
        let mut body = RigidBody::new(1.0);
        body.apply_force(Vector2::new(f64::MAX, 0.0));
        body.apply_force(Vector2::new(f64::MAX, 0.0));

        let before_transform = transform;
        assert!(!integrator.integrate_body(DT, &mut transform, &mut body));
        assert_eq!(transform, before_transform);
        assert_eq!(body.velocity(), Vector2::ZERO);
        assert_eq!(body.acceleration(), Vector2::ZERO);
        assert_eq!(body.force(), Vector2::ZERO);

        // The next step integrates normally
        assert!(integrator.integrate_body(DT, &mut transform, &mut body));
        assert_eq!(body.velocity(), Vector2::new(0.0, 9.82 * DT * 0.992));
    }
}
