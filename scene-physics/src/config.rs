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
//! Simulation configuration
//!
//! Process-wide constants for the fixed-step simulation. Every field has a
//! default, so a JSON file only needs to name what it overrides:
//!
//! ```
//! use scene_physics::config::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{ "damping": 0.995 }"#).unwrap();
//! assert_eq!(config.damping, 0.995);
//! assert_eq!(config.restitution, 0.8);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default fixed step: 60 simulation steps per second
pub const DEFAULT_FIXED_STEP: f64 = 1.0 / 60.0;

/// Default gravitational acceleration, positive y pointing down the screen
pub const DEFAULT_GRAVITY: f64 = 9.82;

/// Default per-step velocity damping factor
pub const DEFAULT_DAMPING: f64 = 0.992;

/// Default velocity scaling on edge collision
pub const DEFAULT_RESTITUTION: f64 = 0.8;

/// Default bounce speed below which vertical velocity snaps to zero
pub const DEFAULT_MIN_BOUNCE_VELOCITY: f64 = 0.12;

/// Default velocity nudge per pressed movement key per step
pub const DEFAULT_INPUT_SPEED: f64 = 0.01;

/// Key names that drive the controlled body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Adds `+speed` to y velocity
    pub up: String,
    /// Adds `-speed` to y velocity
    pub down: String,
    /// Adds `-speed` to x velocity
    pub left: String,
    /// Adds `+speed` to x velocity
    pub right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            up: "w".to_string(),
            down: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
        }
    }
}

/// Constants governing the fixed-step simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Duration of one physics step in seconds
    pub fixed_step: f64,
    /// Gravitational acceleration magnitude, applied along +y
    pub gravity: f64,
    /// Multiplicative velocity damping applied once per step
    pub damping: f64,
    /// Velocity scaling applied on edge collision
    pub restitution: f64,
    /// Vertical bounce speed below which the bounce is clamped to zero
    pub min_bounce_velocity: f64,
    /// Velocity added per pressed movement key per step
    pub input_speed: f64,
    /// Whether bodies bounce off the scene edges
    pub collide_with_edges: bool,
    /// Upper bound on steps drained per frame; `None` or `Some(0)` drains
    /// everything. Time left over when the bound is hit stays banked.
    pub max_steps_per_frame: Option<u32>,
    /// Movement key bindings
    pub bindings: KeyBindings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            fixed_step: DEFAULT_FIXED_STEP,
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            restitution: DEFAULT_RESTITUTION,
            min_bounce_velocity: DEFAULT_MIN_BOUNCE_VELOCITY,
            input_speed: DEFAULT_INPUT_SPEED,
            collide_with_edges: true,
            max_steps_per_frame: None,
            bindings: KeyBindings::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("Loaded simulation config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder-style override of the fixed step
    pub fn with_fixed_step(mut self, fixed_step: f64) -> Self {
        self.fixed_step = fixed_step;
        self
    }

    /// Builder-style override of edge collision
    pub fn with_edge_collisions(mut self, enabled: bool) -> Self {
        self.collide_with_edges = enabled;
        self
    }

    /// Builder-style override of the per-frame step ceiling
    pub fn with_max_steps_per_frame(mut self, max: Option<u32>) -> Self {
        self.max_steps_per_frame = max;
        self
    }

    /// Check every field for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_step.is_finite() && self.fixed_step > 0.0) {
            return Err(invalid("fixed_step", format!("{} must be positive and finite", self.fixed_step)));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", format!("{} must be finite", self.gravity)));
        }
        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return Err(invalid("damping", format!("{} must be in (0, 1]", self.damping)));
        }
        if !(self.restitution.is_finite() && (0.0..=1.0).contains(&self.restitution)) {
            return Err(invalid("restitution", format!("{} must be in [0, 1]", self.restitution)));
        }
        if !(self.min_bounce_velocity.is_finite() && self.min_bounce_velocity >= 0.0) {
            return Err(invalid(
                "min_bounce_velocity",
                format!("{} must be non-negative and finite", self.min_bounce_velocity),
            ));
        }
        if !self.input_speed.is_finite() {
            return Err(invalid("input_speed", format!("{} must be finite", self.input_speed)));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
