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
//! Numerical integration for the fixed-step simulation
//!
//! An [`Integrator`] advances one body's [`RigidBody`] and [`Transform`] by
//! a single step. The shipped integrator, [`DampedEulerIntegrator`], is a
//! semi-implicit Euler scheme with per-step multiplicative damping.
//!
//! # Timestep Guidelines
//!
//! - Too small: numerical precision issues and wasted computation
//! - Too large: instability and tunnelling through scene edges
//! - Recommended: dt = 1/60, the scheduler's default

use crate::ecs::components::{RigidBody, Transform};
use crate::error::TimestepError;

mod euler;

pub use euler::DampedEulerIntegrator;

/// Smallest step considered numerically safe
pub const MIN_SAFE_TIMESTEP: f64 = 1e-9;

/// Largest step considered stable
pub const MAX_STABLE_TIMESTEP: f64 = 1.0;

/// Kinetic energy of a body: KE = 0.5 * m * v²
pub fn kinetic_energy(body: &RigidBody) -> f64 {
    let v = body.velocity();
    0.5 * body.mass() * v.dot(v)
}

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Validate a timestep for this integrator
    ///
    /// Rejects non-positive and non-finite steps outright, and flags steps
    /// that are valid but likely to lose precision or stability.
    fn validate_timestep(&self, dt: f64) -> Result<(), TimestepError> {
        if !dt.is_finite() {
            return Err(TimestepError::NonFinite(dt));
        }
        if dt <= 0.0 {
            return Err(TimestepError::NonPositive(dt));
        }
        if dt < MIN_SAFE_TIMESTEP {
            return Err(TimestepError::TooSmall(dt));
        }
        if dt > MAX_STABLE_TIMESTEP {
            return Err(TimestepError::TooLarge(dt));
        }
        Ok(())
    }

    /// Advance one body by `dt` seconds
    ///
    /// Returns `false` when the step would produce non-finite state. The
    /// transform, velocity and acceleration are then left untouched, but the
    /// accumulated force is still consumed so the next step starts clean.
    fn integrate_body(&self, dt: f64, transform: &mut Transform, body: &mut RigidBody) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn test_kinetic_energy() {
        let body = RigidBody::new(2.0).with_velocity(Vector2::new(3.0, 4.0));
        assert_eq!(kinetic_energy(&body), 25.0);
        assert_eq!(kinetic_energy(&RigidBody::new(5.0)), 0.0);
    }

    #[test]
    fn test_validate_timestep() {
        let integrator = DampedEulerIntegrator::new(9.82, 0.992);
        assert!(integrator.validate_timestep(1.0 / 60.0).is_ok());
        assert_eq!(integrator.validate_timestep(0.0), Err(TimestepError::NonPositive(0.0)));
        assert!(matches!(integrator.validate_timestep(f64::NAN), Err(TimestepError::NonFinite(_))));
        assert_eq!(integrator.validate_timestep(1e-10), Err(TimestepError::TooSmall(1e-10)));
        assert_eq!(integrator.validate_timestep(2.0), Err(TimestepError::TooLarge(2.0)));
    }
}
