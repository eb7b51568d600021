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
//! 2D vector math
//!
//! [`Vector2`] is an immutable, double-precision value type. Every operation
//! returns a new vector; nothing mutates in place except the `*Assign`
//! operator impls, which are sugar for rebinding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// Screen convention: x grows to the right, y grows downward.
///
/// # Examples
///
/// ```
/// use scene_physics::math::Vector2;
///
/// let v = Vector2::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(v.add(Vector2::new(1.0, 1.0)), Vector2::new(4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component (positive is down)
    pub y: f64,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    /// The unit-scale vector `(1, 1)`
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Component-wise sum
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    /// Multiply both components by a scalar
    pub fn scale(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }

    /// Divide both components by a scalar
    ///
    /// Division by zero follows IEEE-754 and yields infinities or NaN;
    /// callers that care check [`Vector2::is_finite`].
    pub fn divide(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x / scalar, self.y / scalar)
    }

    /// Component-wise product
    pub fn hadamard(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x * other.x, self.y * other.y)
    }

    /// Euclidean length
    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction
    ///
    /// The zero vector has no direction; it normalizes to NaN components,
    /// same as dividing by its zero magnitude. Use
    /// [`Vector2::normalize_or_zero`] when that matters.
    pub fn normalize(self) -> Vector2 {
        self.divide(self.magnitude())
    }

    /// Unit vector, or zero when the length is zero or not finite
    pub fn normalize_or_zero(self) -> Vector2 {
        let mag = self.magnitude();
        if mag > 0.0 && mag.is_finite() {
            self.divide(mag)
        } else {
            Vector2::ZERO
        }
    }

    /// Dot product
    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Absolute value of each component
    pub fn abs(self) -> Vector2 {
        Vector2::new(self.x.abs(), self.y.abs())
    }

    /// Check that both components are finite (not NaN or infinite)
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Get the vector as an array
    pub fn as_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(arr: [f64; 2]) -> Self {
        Vector2::new(arr[0], arr[1])
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::add(self, rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = Vector2::add(*self, rhs);
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::sub(self, rhs)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        *self = Vector2::sub(*self, rhs);
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        self.scale(rhs)
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.scale(rhs);
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        self.divide(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}
