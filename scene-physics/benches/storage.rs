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
//! Benchmarks for the entity and component store
//!
//! These benchmarks measure:
//! - Attach throughput for growing entity counts
//! - Random-order lookup through the type-erased store
//! - Cascade removal across several component types

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scene_physics::ecs::components::{Controlled, Extent, RigidBody, Transform};
use scene_physics::ecs::{Entity, World};

fn populated(count: usize) -> (World, Vec<Entity>) {
    let mut world = World::new();
    let entities: Vec<_> = (0..count)
        .map(|i| {
            let e = world.create_entity();
            world.attach(e, Transform::from_xy(i as f64, i as f64 * 2.0)).unwrap();
            world.attach(e, RigidBody::new(1.0)).unwrap();
            world.attach(e, Extent::new(26.0, 37.0)).unwrap();
            if i % 4 == 0 {
                world.attach(e, Controlled).unwrap();
            }
            e
        })
        .collect();
    (world, entities)
}

/// Benchmark: create N entities and attach a body to each
fn bench_attach(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_attach");

    for entity_count in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entity_count), entity_count, |b, &count| {
            b.iter(|| black_box(populated(count)));
        });
    }

    group.finish();
}

/// Benchmark: look up two components per entity in a scattered order
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_get");

    for entity_count in [100, 1000, 10000].iter() {
        let (world, mut entities) = populated(*entity_count);
        entities.reverse();
        entities.rotate_left(entity_count / 3);

        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entity_count), &entities, |b, entities| {
            b.iter(|| {
                let mut sum = 0.0;
                for e in entities {
                    if let (Some(t), Some(body)) = (world.get::<Transform>(*e), world.get::<RigidBody>(*e)) {
                        sum += t.position().x + body.mass();
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

/// Benchmark: remove every entity, cascading through all storages
fn bench_cascade_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_cascade_remove");

    for entity_count in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entity_count), entity_count, |b, &count| {
            b.iter_batched(
                || populated(count),
                |(mut world, entities)| {
                    for e in entities {
                        world.remove_entity(e);
                    }
                    black_box(world)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_attach, bench_get, bench_cascade_remove);
criterion_main!(benches);
