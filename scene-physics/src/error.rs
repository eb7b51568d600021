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
//! Error types
//!
//! Absence of an entity or component is never an error: accessors return
//! `Option`. Errors exist for data that would poison the simulation and for
//! writes against entities that are not alive.

use crate::ecs::EntityId;
use thiserror::Error;

/// Errors raised by the entity-component store
#[derive(Debug, Error, PartialEq)]
pub enum EcsError {
    /// A component was attached to an entity that is not alive
    #[error("{0} is not alive")]
    NoSuchEntity(EntityId),

    /// A component failed its own validation at attach time
    #[error("invalid {component} component: {reason}")]
    InvalidComponent {
        /// Component type name
        component: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl EcsError {
    /// Shorthand for building an [`EcsError::InvalidComponent`]
    pub fn invalid(component: &'static str, reason: impl Into<String>) -> Self {
        EcsError::InvalidComponent {
            component,
            reason: reason.into(),
        }
    }
}

/// Errors raised when building or validating a timestep
#[derive(Debug, Error, PartialEq)]
pub enum TimestepError {
    /// Zero or negative step
    #[error("timestep {0} must be positive")]
    NonPositive(f64),

    /// NaN or infinite step
    #[error("timestep {0} must be finite")]
    NonFinite(f64),

    /// Step is valid but small enough to lose precision
    #[error("timestep {0} is extremely small and may lose precision with f64")]
    TooSmall(f64),

    /// Step is valid but large enough to destabilise integration
    #[error("timestep {0} is large and may cause instability")]
    TooLarge(f64),
}

/// Errors raised while loading or validating a [`SimulationConfig`](crate::config::SimulationConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value the simulation cannot run with
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The fixed step was rejected by the scheduler
    #[error("invalid fixed step: {0}")]
    Timestep(#[from] TimestepError),

    /// The config file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
