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
//! Pressed-key snapshot
//!
//! The host records key presses and releases here as they arrive. The
//! simulation only ever reads the snapshot, once per fixed step; it never
//! sees individual key events, so auto-repeat has no effect on motion.

use crate::config::KeyBindings;
use crate::math::Vector2;
use std::collections::HashMap;

/// Which keys are currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: HashMap<String, bool>,
}

impl InputState {
    /// Create a snapshot with nothing pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key as pressed or released
    pub fn set(&mut self, key: impl Into<String>, pressed: bool) {
        self.pressed.insert(key.into(), pressed);
    }

    /// Record a key press
    pub fn press(&mut self, key: impl Into<String>) {
        self.set(key, true);
    }

    /// Record a key release
    pub fn release(&mut self, key: impl Into<String>) {
        self.set(key, false);
    }

    /// Whether `key` is currently held; unknown keys are not
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.get(key).copied().unwrap_or(false)
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Velocity nudge for one step given the current bindings
    ///
    /// Each held movement key contributes `speed` along its axis; opposing
    /// keys cancel out.
    pub fn impulse(&self, bindings: &KeyBindings, speed: f64) -> Vector2 {
        let mut delta = Vector2::ZERO;
        if self.is_pressed(&bindings.up) {
            delta.y += speed;
        }
        if self.is_pressed(&bindings.down) {
            delta.y -= speed;
        }
        if self.is_pressed(&bindings.left) {
            delta.x -= speed;
        }
        if self.is_pressed(&bindings.right) {
            delta.x += speed;
        }
        delta
    }
}
