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
//! Fixed-timestep clock
//!
//! Rendering delivers frames at whatever rate it manages; physics must step
//! at a constant rate. [`FixedTimestep`] banks each frame's delta and pays
//! it out in whole steps of exactly `fixed_step` seconds:
//!
//! ```text
//! banked += frame_delta
//! while banked >= fixed_step:
//!     step(fixed_step)
//!     banked -= fixed_step
//! ```
//!
//! Whatever is left below one step carries to the next frame. Nothing is
//! ever discarded, so the sum of all steps taken plus the final remainder
//! equals the sum of all frame deltas, up to floating-point rounding.

use crate::error::TimestepError;

/// Accumulator-driven fixed-step scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    fixed_step: f64,
    banked: f64,
    max_steps_per_frame: Option<u32>,
    total_steps: u64,
}

impl FixedTimestep {
    /// Create a clock with the given step, in seconds
    pub fn new(fixed_step: f64) -> Result<Self, TimestepError> {
        if !fixed_step.is_finite() {
            return Err(TimestepError::NonFinite(fixed_step));
        }
        if fixed_step <= 0.0 {
            return Err(TimestepError::NonPositive(fixed_step));
        }
        Ok(FixedTimestep {
            fixed_step,
            banked: 0.0,
            max_steps_per_frame: None,
            total_steps: 0,
        })
    }

    /// Limit how many steps a single frame may drain
    ///
    /// Time that does not fit stays banked for later frames. `None` or
    /// `Some(0)` removes the limit.
    pub fn with_max_steps_per_frame(mut self, max: Option<u32>) -> Self {
        self.max_steps_per_frame = max.filter(|m| *m > 0);
        self
    }

    /// The constant step size
    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    /// Time banked but not yet stepped
    pub fn banked(&self) -> f64 {
        self.banked
    }

    /// Fraction of a step currently banked, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.banked / self.fixed_step
    }

    /// Steps taken since creation or the last reset
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Forget banked time and the step count
    pub fn reset(&mut self) {
        self.banked = 0.0;
        self.total_steps = 0;
    }

    /// Bank a frame delta and run `step` once per whole fixed step
    ///
    /// Negative, NaN and infinite deltas contribute nothing. Returns the
    /// number of steps run.
    pub fn advance<F>(&mut self, frame_delta: f64, mut step: F) -> usize
    where
        F: FnMut(f64),
    {
        self.banked += sanitize_delta(frame_delta);

        let mut steps = 0usize;
        while self.banked >= self.fixed_step {
            if let Some(max) = self.max_steps_per_frame {
                if steps >= max as usize {
                    log::debug!(
                        "Step ceiling {} reached, {:.6}s stays banked",
                        max,
                        self.banked
                    );
                    break;
                }
            }
            step(self.fixed_step);
            self.banked -= self.fixed_step;
            steps += 1;
        }

        self.total_steps += steps as u64;
        steps
    }
}

fn sanitize_delta(frame_delta: f64) -> f64 {
    if !frame_delta.is_finite() || frame_delta < 0.0 {
        log::warn!("Ignoring invalid frame delta {}", frame_delta);
        return 0.0;
    }
    frame_delta
}
