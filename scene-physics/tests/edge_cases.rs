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
//! Edge case tests for the integrator and the fixed-step clock
//!
//! Tests boundary conditions, extreme values, and unusual scenarios

use scene_physics::ecs::components::{Extent, RigidBody, Transform};
use scene_physics::ecs::systems::PhysicsSystem;
use scene_physics::ecs::{StepContext, World};
use scene_physics::collision::SceneBounds;
use scene_physics::input::InputState;
use scene_physics::integration::{DampedEulerIntegrator, Integrator};
use scene_physics::math::Vector2;
use scene_physics::time::FixedTimestep;
use scene_physics::{Simulation, SimulationConfig, TimestepError};

const STEP: f64 = 1.0 / 60.0;

fn integrator() -> DampedEulerIntegrator {
    DampedEulerIntegrator::from_config(&SimulationConfig::default())
}

#[test]
fn test_clock_rejects_zero_timestep() {
    assert_eq!(FixedTimestep::new(0.0), Err(TimestepError::NonPositive(0.0)));
}

#[test]
fn test_clock_rejects_negative_timestep() {
    assert_eq!(FixedTimestep::new(-0.01), Err(TimestepError::NonPositive(-0.01)));
}

#[test]
fn test_clock_rejects_nan_timestep() {
    assert!(matches!(FixedTimestep::new(f64::NAN), Err(TimestepError::NonFinite(_))));
}

#[test]
fn test_clock_rejects_infinite_timestep() {
    assert!(matches!(FixedTimestep::new(f64::INFINITY), Err(TimestepError::NonFinite(_))));
}

#[test]
fn test_very_small_timestep_validation() {
    let result = integrator().validate_timestep(1e-10);
    assert_eq!(result, Err(TimestepError::TooSmall(1e-10)));
}

#[test]
fn test_large_timestep_validation() {
    let result = integrator().validate_timestep(2.0);
    assert_eq!(result, Err(TimestepError::TooLarge(2.0)));
}

#[test]
fn test_reasonable_timestep_validation() {
    assert!(integrator().validate_timestep(STEP).is_ok());
}

#[test]
fn test_huge_frame_delta_with_ceiling() {
    let config = SimulationConfig::default().with_max_steps_per_frame(Some(5));
    let mut sim = Simulation::new(config, 900.0, 900.0).unwrap();

    // A ten second stall
    assert_eq!(sim.advance_frame(10.0), 5);
    assert!(sim.clock().banked() > 9.0);
    assert_eq!(sim.advance_frame(0.0), 5);
}

#[test]
fn test_zero_ceiling_from_config_drains_everything() {
    let config = SimulationConfig::default().with_max_steps_per_frame(Some(0));
    let mut sim = Simulation::new(config, 900.0, 900.0).unwrap();
    let steps = sim.advance_frame(1.0);
    assert!((59..=60).contains(&steps));
    assert!(sim.clock().banked() < STEP);
}

#[test]
fn test_huge_frame_delta_without_ceiling() {
    let mut sim = Simulation::new(SimulationConfig::default(), 900.0, 900.0).unwrap();
    let steps = sim.advance_frame(10.0);
    assert!((599..=600).contains(&steps));
    assert!(sim.clock().banked() < STEP);
}

#[test]
fn test_empty_world() {
    let mut sim = Simulation::new(SimulationConfig::default(), 900.0, 900.0).unwrap();
    assert_eq!(sim.advance_frame(STEP), 1);
    assert_eq!(sim.world().entity_count(), 0);
    assert!(sim.tracked_transform().is_none());
}

#[test]
fn test_missing_components() {
    let mut world = World::new();
    let bare = world.create_entity();
    let only_body = world.create_entity();
    world.attach(only_body, RigidBody::new(1.0)).unwrap();
    let only_extent = world.create_entity();
    world.attach(only_extent, Extent::new(1.0, 1.0)).unwrap();

    let system = PhysicsSystem::from_config(&SimulationConfig::default());
    let input = InputState::new();
    let ctx = StepContext {
        dt: STEP,
        input: &input,
        bounds: SceneBounds::new(900.0, 900.0),
    };
    assert_eq!(system.step_world(&mut world, &ctx), 0);
    assert!(world.has_entity(bare));
    assert_eq!(world.get::<RigidBody>(only_body).unwrap().velocity(), Vector2::ZERO);
}

#[test]
fn test_non_finite_step_leaves_motion_untouched() {
    let mut transform = Transform::from_xy(1.0, 2.0);
    let mut body = RigidBody::new(1.0).with_velocity(Vector2::new(3.0, 4.0));
    body.apply_force(Vector2::new(f64::MAX, 0.0));
    body.apply_force(Vector2::new(f64::MAX, 0.0));
    let before = transform;

    assert!(!integrator().integrate_body(STEP, &mut transform, &mut body));
    assert_eq!(transform, before);
    assert_eq!(body.velocity(), Vector2::new(3.0, 4.0));
    assert_eq!(body.force(), Vector2::ZERO);
}

#[test]
fn test_non_finite_body_skipped_by_system() {
    let mut world = World::new();
    let runaway = world.create_entity();
    world.attach(runaway, Transform::from_xy(1.0, 2.0)).unwrap();
    world.attach(runaway, RigidBody::new(1.0)).unwrap();
    let steady = world.create_entity();
    world.attach(steady, Transform::from_xy(5.0, 5.0)).unwrap();
    world.attach(steady, RigidBody::new(1.0)).unwrap();

    {
        let body = world.get_mut::<RigidBody>(runaway).unwrap();
        body.apply_force(Vector2::new(f64::MAX, 0.0));
        body.apply_force(Vector2::new(f64::MAX, 0.0));
    }

    let system = PhysicsSystem::from_config(&SimulationConfig::default());
    let input = InputState::new();
    let ctx = StepContext {
        dt: STEP,
        input: &input,
        bounds: SceneBounds::new(900.0, 900.0),
    };
    assert_eq!(system.step_world(&mut world, &ctx), 1);
    assert_eq!(world.get::<Transform>(runaway).unwrap().position(), Vector2::new(1.0, 2.0));
    assert_eq!(world.get::<RigidBody>(runaway).unwrap().force(), Vector2::ZERO);
    assert!(world.get::<Transform>(steady).unwrap().position().y > 5.0);

    // The discarded force does not linger: the body falls from the next step on
    assert_eq!(system.step_world(&mut world, &ctx), 2);
    let vy = 9.82 * STEP * 0.992;
    assert_eq!(world.get::<RigidBody>(runaway).unwrap().velocity(), Vector2::new(0.0, vy));
    assert_eq!(world.get::<Transform>(runaway).unwrap().position(), Vector2::new(1.0, 2.0 + vy * STEP));
}

#[test]
fn test_runaway_force_recovers_inside_simulation() {
    let mut sim = Simulation::new(SimulationConfig::default(), 900.0, 900.0).unwrap();
    let e = sim
        .spawn_body(Transform::from_xy(100.0, 200.0), RigidBody::new(1.0), None, false)
        .unwrap();
    {
        let body = sim.get_mut::<RigidBody>(e).unwrap();
        body.apply_force(Vector2::new(f64::MAX, 0.0));
        body.apply_force(Vector2::new(f64::MAX, 0.0));
    }

    for _ in 0..600 {
        sim.advance_frame(STEP);
    }
    let body = sim.get::<RigidBody>(e).unwrap();
    assert!(body.force().is_finite());
    assert!(sim.get::<Transform>(e).unwrap().position().y > 200.0);
}

#[test]
fn test_extreme_mass() {
    let mut transform = Transform::from_xy(0.0, 0.0);
    let mut body = RigidBody::new(1e30);
    body.apply_force(Vector2::new(1.0, 0.0));

    assert!(integrator().integrate_body(STEP, &mut transform, &mut body));
    // Gravity is mass independent, a small push is not
    assert!((body.velocity().y - 9.82 * STEP * 0.992).abs() < 1e-12);
    assert!(body.velocity().x < 1e-29);
}

#[test]
fn test_extreme_velocity() {
    let mut transform = Transform::from_xy(0.0, 0.0);
    let mut body = RigidBody::new(1.0).with_velocity(Vector2::new(1e100, 0.0));

    assert!(integrator().integrate_body(STEP, &mut transform, &mut body));
    assert!(transform.position().is_finite());
    assert!(body.velocity().x < 1e100);
}

#[test]
fn test_rotation_and_scale_untouched() {
    let mut transform = Transform::from_xy(0.0, 0.0)
        .with_rotation(0.5)
        .with_scale(Vector2::new(2.0, 3.0));
    let mut body = RigidBody::new(1.0);

    for _ in 0..10 {
        integrator().integrate_body(STEP, &mut transform, &mut body);
    }
    assert_eq!(transform.rotation(), 0.5);
    assert_eq!(transform.scale(), Vector2::new(2.0, 3.0));
}

#[test]
fn test_zero_damping_rate_keeps_speed() {
    let integrator = DampedEulerIntegrator::new(0.0, 1.0);
    let mut transform = Transform::from_xy(0.0, 0.0);
    let mut body = RigidBody::new(1.0).with_velocity(Vector2::new(2.0, 0.0));

    for _ in 0..100 {
        integrator.integrate_body(STEP, &mut transform, &mut body);
    }
    assert_eq!(body.velocity(), Vector2::new(2.0, 0.0));
}

#[test]
fn test_resting_on_floor_does_not_jitter_upward() {
    let mut sim = Simulation::new(SimulationConfig::default(), 100.0, 100.0).unwrap();
    // Just past the floor with almost no speed
    let e = sim
        .spawn_body(
            Transform::from_xy(50.0, 100.0),
            RigidBody::new(1.0).with_gravity(false).with_velocity(Vector2::new(0.0, 0.1)),
            None,
            false,
        )
        .unwrap();

    sim.advance_frame(STEP);
    assert_eq!(sim.get::<RigidBody>(e).unwrap().velocity().y, 0.0);
}

#[test]
fn test_zero_sized_scene() {
    let mut sim = Simulation::new(SimulationConfig::default(), 0.0, 0.0).unwrap();
    let e = sim
        .spawn_body(Transform::from_xy(0.0, 0.0), RigidBody::new(1.0), None, false)
        .unwrap();
    for _ in 0..60 {
        sim.advance_frame(STEP);
    }
    assert!(sim.get::<Transform>(e).unwrap().position().is_finite());
}
