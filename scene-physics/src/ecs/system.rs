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
//! System execution framework
//!
//! Systems contain the logic that operates on entities and components.
//! Every fixed step the [`SystemExecutor`] runs its systems one after
//! another, in registration order, on the calling thread.

use crate::collision::SceneBounds;
use crate::ecs::World;
use crate::input::InputState;

/// Everything a system may read during one fixed step besides the world
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Fixed step duration in seconds
    pub dt: f64,
    /// Pressed-key snapshot, stable for the whole step
    pub input: &'a InputState,
    /// Current viewport size
    pub bounds: SceneBounds,
}

/// Trait for systems that operate on the ECS world
pub trait System: Send + Sync {
    /// Execute the system for one fixed step
    fn run(&mut self, world: &mut World, ctx: &StepContext<'_>);

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Executor for running systems
pub struct SystemExecutor {
    systems: Vec<Box<dyn System>>,
}

impl SystemExecutor {
    /// Create a new system executor
    pub fn new() -> Self {
        SystemExecutor {
            systems: Vec::new(),
        }
    }

    /// Add a system to the executor
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        log::debug!("Registered system {}", system.name());
        self.systems.push(Box::new(system));
    }

    /// Run all systems sequentially
    pub fn run(&mut self, world: &mut World, ctx: &StepContext<'_>) {
        for system in &mut self.systems {
            log::trace!("Running {}", system.name());
            system.run(world, ctx);
        }
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new()
    }
}
