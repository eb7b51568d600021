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
//! Bouncing body demo
//!
//! Drops a sprite-sized body into a 900x900 scene, holds the right key for
//! half a second, then lets it bounce for five seconds of 144 Hz frames.
//!
//! ```text
//! RUST_LOG=debug cargo run --example bouncing_body [config.json]
//! ```

use scene_physics::ecs::components::{Extent, RigidBody, Transform};
use scene_physics::math::Vector2;
use scene_physics::{Simulation, SimulationConfig};

const SCENE_SIZE: f64 = 900.0;
const FRAME_RATE: f64 = 144.0;
const RUN_SECONDS: f64 = 5.0;
const PUSH_SECONDS: f64 = 0.5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };

    println!("Scene Physics - Bouncing Body");
    println!("=============================\n");
    println!("{}\n", config.to_json_string()?);

    let mut sim = Simulation::new(config, SCENE_SIZE, SCENE_SIZE)?;
    let body = sim.spawn_body(
        Transform::from_xy(100.0, 200.0),
        RigidBody::new(1.0),
        Some(Extent::new(26.0, 37.0).with_anchor(Vector2::new(0.5, 0.5))),
        true,
    )?;
    sim.track(body);

    let frame_delta = 1.0 / FRAME_RATE;
    let frames = (RUN_SECONDS * FRAME_RATE) as usize;
    let push_frames = (PUSH_SECONDS * FRAME_RATE) as usize;
    let report_every = (FRAME_RATE / 2.0) as usize;

    let right = sim.config().bindings.right.clone();
    sim.set_key(right.as_str(), true);

    for frame in 0..frames {
        if frame == push_frames {
            sim.set_key(right.as_str(), false);
            println!("  released {}", right);
        }
        sim.advance_frame(frame_delta);

        if frame % report_every == 0 {
            if let (Some(t), Some(b)) = (sim.tracked_transform(), sim.get::<RigidBody>(body)) {
                println!(
                    "  t={:>5.2}s  pos={}  vel={}",
                    (frame + 1) as f64 * frame_delta,
                    t.position(),
                    b.velocity()
                );
            }
        }
    }

    println!("\nRan {} fixed steps over {} frames", sim.clock().total_steps(), frames);
    Ok(())
}
