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
//! # Scene Physics
//!
//! A minimal entity-component store driving a fixed-timestep 2D rigid body
//! simulation for a single scene.
//!
//! ## Features
//!
//! - **ECS Architecture**: entities are opaque ids, components live in one
//!   map per type, cascade removal on entity destruction
//! - **Fixed Timestep**: frame deltas are banked and paid out in constant
//!   steps so the simulation is independent of frame rate
//! - **Damped Euler**: gravity, force accumulation, per-step damping
//! - **Scene Edges**: bodies bounce off the viewport with restitution
//! - **Keyboard Nudges**: held movement keys push controlled bodies
//!
//! Positive y points down, matching screen coordinates.
//!
//! ## Example
//!
//! ```rust
//! use scene_physics::ecs::components::{RigidBody, Transform};
//! use scene_physics::{Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default(), 900.0, 900.0).unwrap();
//! let body = sim
//!     .spawn_body(Transform::from_xy(100.0, 200.0), RigidBody::new(1.0), None, true)
//!     .unwrap();
//! sim.track(body);
//!
//! let steps = sim.advance_frame(1.0 / 30.0);
//! assert_eq!(steps, 2);
//! assert!(sim.tracked_transform().unwrap().position().y > 200.0);
//! ```

#![warn(missing_docs)]

/// Scene edge detection and response
pub mod collision;

/// Simulation constants and JSON loading
pub mod config;

/// Entity Component System implementation
pub mod ecs;

/// Error types
pub mod error;

/// Pressed-key snapshot
pub mod input;

/// Numerical integration methods
pub mod integration;

/// 2D vector math
pub mod math;

/// Top-level simulation driver
pub mod simulation;

/// Fixed-timestep scheduling
pub mod time;

pub use config::SimulationConfig;
pub use ecs::{Entity, EntityId, World};
pub use error::{ConfigError, EcsError, TimestepError};
pub use math::Vector2;
pub use simulation::Simulation;
