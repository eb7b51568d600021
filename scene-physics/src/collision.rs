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
//! Scene edge collision
//!
//! Detection compares a body's rendered bounds against the viewport
//! rectangle `[0, width] x [0, height]`. Response reflects the velocity on
//! each crossed axis and scales it by the restitution factor. The vertical
//! bounce snaps to zero below a threshold so a resting body does not jitter
//! forever on the floor.
//!
//! The response does not look at the direction of travel and does not push
//! the body back inside; a body that stays across an edge is reflected again
//! on the next step.

use crate::ecs::components::{Extent, Transform};
use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// Viewport size, supplied by the host and updated on resize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    /// Viewport width
    pub width: f64,
    /// Viewport height
    pub height: f64,
}

impl SceneBounds {
    /// Create bounds of the given size
    pub fn new(width: f64, height: f64) -> Self {
        SceneBounds { width, height }
    }

    /// Check that both dimensions are non-negative and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vector2,
    /// Width and height
    pub size: Vector2,
}

impl Aabb {
    /// Rendered bounds of a transform with an optional extent
    ///
    /// Without an extent the body is a point at its position.
    pub fn from_transform(transform: &Transform, extent: Option<&Extent>) -> Self {
        let position = transform.position();
        match extent {
            Some(extent) => {
                let size = extent.size().hadamard(transform.scale().abs());
                Aabb {
                    min: position - extent.anchor().hadamard(size),
                    size,
                }
            }
            None => Aabb {
                min: position,
                size: Vector2::ZERO,
            },
        }
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vector2 {
        self.min + self.size
    }
}

/// Which axes crossed a scene edge this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeContact {
    /// Crossed the left or right edge
    pub x: bool,
    /// Crossed the top or bottom edge
    pub y: bool,
}

impl EdgeContact {
    /// Whether any edge was crossed
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Collision response parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeResponse {
    /// Velocity scale applied on reflection
    pub restitution: f64,
    /// Vertical speed below which the bounce is clamped to zero
    pub min_bounce_velocity: f64,
}

/// Test a body's bounds against the scene edges
pub fn detect_edges(bounds: &Aabb, scene: &SceneBounds) -> EdgeContact {
    let max = bounds.max();
    EdgeContact {
        x: bounds.min.x < 0.0 || max.x > scene.width,
        y: bounds.min.y < 0.0 || max.y > scene.height,
    }
}

/// Reflect `velocity` on every contacted axis, once per axis
pub fn respond(velocity: Vector2, contact: EdgeContact, response: &EdgeResponse) -> Vector2 {
    let mut velocity = velocity;
    if contact.x {
        velocity.x = -velocity.x * response.restitution;
    }
    if contact.y {
        velocity.y = -velocity.y * response.restitution;
        if velocity.y.abs() < response.min_bounce_velocity {
            velocity.y = 0.0;
        }
    }
    velocity
}
