// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::ControlFlow;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mosaic_index::{Aabb2D, Interval, IntervalTree, RectIndex};

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_intervals(count: usize, span: f64, max_len: f64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let lo = rng.next_f64() * span;
            (lo, lo + rng.next_f64() * max_len)
        })
        .collect()
}

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            if (x + y) % 3 == 0 {
                continue;
            }
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_tree_build");
    for &n in &[1_000usize, 10_000] {
        let intervals = gen_intervals(n, 10_000.0, 50.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("bulk_n{}", n), |b| {
            b.iter(|| {
                let tree = IntervalTree::from_intervals(
                    intervals
                        .iter()
                        .enumerate()
                        .map(|(i, &(lo, hi))| Interval::new(lo, hi, i as u32)),
                );
                black_box(tree.depth());
            });
        });
        group.bench_function(format!("incremental_n{}", n), |b| {
            b.iter_batched(
                IntervalTree::<f64, u32>::new,
                |mut tree| {
                    for (i, &(lo, hi)) in intervals.iter().enumerate() {
                        let _ = tree.insert(lo, hi, i as u32);
                    }
                    black_box(tree.depth());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_tree_query");
    let intervals = gen_intervals(10_000, 10_000.0, 50.0);
    let tree = IntervalTree::from_intervals(
        intervals
            .iter()
            .enumerate()
            .map(|(i, &(lo, hi))| Interval::new(lo, hi, i as u32)),
    );
    group.throughput(Throughput::Elements(256));
    group.bench_function("query_point_x256", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for q in 0..256 {
                let x = q as f64 * 39.0;
                let _ = tree.query_point(x, |_, _| {
                    hits += 1;
                    ControlFlow::<()>::Continue(())
                });
            }
            black_box(hits);
        });
    });
    group.bench_function("query_interval_x256", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for q in 0..256 {
                let lo = q as f64 * 39.0;
                hits += tree.intervals_overlapping(lo, lo + 20.0).count();
            }
            black_box(hits);
        });
    });
    group.bench_function("brute_force_interval_x256", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for q in 0..256 {
                let lo = q as f64 * 39.0;
                let hi = lo + 20.0;
                hits += intervals.iter().filter(|&&(a, b)| a <= hi && lo <= b).count();
            }
            black_box(hits);
        });
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_tree_churn");
    let intervals = gen_intervals(4_096, 10_000.0, 50.0);
    group.bench_function("remove_reinsert_half", |b| {
        b.iter_batched(
            || {
                let mut tree = IntervalTree::new();
                let keys: Vec<_> = intervals
                    .iter()
                    .enumerate()
                    .map(|(i, &(lo, hi))| tree.insert(lo, hi, i as u32))
                    .collect();
                (tree, keys)
            },
            |(mut tree, keys)| {
                for k in keys.iter().step_by(2) {
                    if let Some(iv) = tree.remove(*k) {
                        let _ = tree.insert(iv.lo + 1.0, iv.hi + 1.0, iv.payload);
                    }
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_rect_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_index");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let idx: RectIndex<f64, u32> = rects
            .iter()
            .copied()
            .enumerate()
            .map(|(i, r)| (r, i as u32))
            .collect();
        group.throughput(Throughput::Elements(256));
        group.bench_function(format!("contains_point_x256_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for q in 0..256 {
                    let x = (q % 64) as f64 * 5.0 + 2.5;
                    let y = (q / 4) as f64 * 5.0 + 2.5;
                    hits += usize::from(idx.contains_point(x, y));
                }
                black_box(hits);
            });
        });
        group.bench_function(format!("overlaps_x256_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for q in 0..256 {
                    let x = (q % 64) as f64 * 5.0;
                    let y = (q / 4) as f64 * 5.0;
                    hits += usize::from(idx.overlaps(&Aabb2D::<f64>::from_xywh(x, y, 12.0, 7.0)));
                }
                black_box(hits);
            });
        });
        group.bench_function(format!("brute_force_overlaps_x256_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for q in 0..256 {
                    let x = (q % 64) as f64 * 5.0;
                    let y = (q / 4) as f64 * 5.0;
                    let probe = Aabb2D::<f64>::from_xywh(x, y, 12.0, 7.0);
                    hits += usize::from(rects.iter().any(|r| r.overlaps_open(&probe)));
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query,
    bench_churn,
    bench_rect_index
);
criterion_main!(benches);
