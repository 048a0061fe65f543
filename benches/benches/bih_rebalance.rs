// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;
use understory_bih::{Aabb3D, BihWrap, Ray};

fn gen_grid_boxes(n: usize, cell: f32) -> Vec<Aabb3D> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = Vec3::new(x as f32, y as f32, z as f32) * cell;
                out.push(Aabb3D::from_min_size(min, Vec3::splat(cell)));
            }
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
}

fn gen_random_boxes(count: usize, world: f32, max_size: f32) -> Vec<Aabb3D> {
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let min = Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()) * world;
        let size = Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()) * max_size;
        out.push(Aabb3D::from_min_size(min, size + Vec3::splat(0.1)));
    }
    out
}

fn nearest_hit(boxes: &[Aabb3D]) -> impl FnMut(&Ray, &usize, &mut f32, bool) -> bool + '_ {
    move |ray: &Ray, id: &usize, max_dist: &mut f32, _: bool| {
        match boxes[*id].intersect_ray(ray, *max_dist) {
            Some(t) => {
                *max_dist = t;
                true
            }
            None => false,
        }
    }
}

fn bench_coalesced_vs_eager(c: &mut Criterion) {
    let mut group = c.benchmark_group("bih_rebalance");
    let boxes = gen_grid_boxes(10, 4.0);
    let boxes = boxes.as_slice();
    group.throughput(Throughput::Elements(boxes.len() as u64));
    let probe = Vec3::splat(2.0);

    group.bench_function("insert_all_then_query", |b| {
        b.iter_batched(
            || BihWrap::new(move |id: &usize| boxes[*id]),
            |mut idx| {
                for id in 0..boxes.len() {
                    idx.insert(id);
                }
                let mut hits = 0usize;
                idx.intersect_point(probe, |_, _| hits += 1).unwrap();
                black_box(hits);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("query_after_each_insert", |b| {
        b.iter_batched(
            || BihWrap::new(move |id: &usize| boxes[*id]),
            |mut idx| {
                let mut hits = 0usize;
                for id in 0..boxes.len() {
                    idx.insert(id);
                    idx.intersect_point(probe, |_, _| hits += 1).unwrap();
                }
                black_box(hits);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("bih_churn");
    let boxes = gen_random_boxes(4096, 1000.0, 20.0);
    let boxes = boxes.as_slice();
    group.bench_function("remove_reinsert_tenth_then_query", |b| {
        b.iter_batched(
            || {
                let mut idx = BihWrap::new(move |id: &usize| boxes[*id]);
                for id in 0..boxes.len() {
                    idx.insert(id);
                }
                idx.balance().unwrap();
                idx
            },
            |mut idx| {
                for id in (0..boxes.len()).step_by(10) {
                    idx.remove(&id);
                }
                for id in (0..boxes.len()).step_by(10) {
                    idx.insert(id);
                }
                let mut hits = 0usize;
                idx.intersect_point(Vec3::splat(500.0), |_, _| hits += 1)
                    .unwrap();
                black_box(hits);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_ray_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("bih_rays");
    let boxes = gen_random_boxes(4096, 1000.0, 20.0);
    let boxes = boxes.as_slice();
    let mut idx = BihWrap::new(move |id: &usize| boxes[*id]);
    for id in 0..boxes.len() {
        idx.insert(id);
    }
    idx.balance().unwrap();

    let mut rng = Rng::new(7);
    let rays: Vec<Ray> = (0..256)
        .map(|_| {
            let origin = Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()) * 1000.0;
            let dir = Vec3::new(
                rng.next_f32() - 0.5,
                rng.next_f32() - 0.5,
                rng.next_f32() - 0.5,
            );
            Ray::new(origin, dir.normalize_or_zero())
        })
        .collect();

    for stop_at_first_hit in [false, true] {
        let name = if stop_at_first_hit {
            "first_hit"
        } else {
            "nearest_hit"
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut total = 0usize;
                for ray in &rays {
                    let mut max_dist = 500.0;
                    if idx
                        .intersect_ray(ray, nearest_hit(boxes), &mut max_dist, stop_at_first_hit)
                        .unwrap()
                    {
                        total += 1;
                    }
                }
                black_box(total);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_coalesced_vs_eager,
    bench_churn,
    bench_ray_queries,
);
criterion_main!(benches);
