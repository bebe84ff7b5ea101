// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use mosaic_arrange::{ArrangeConfig, Arrangement, Heuristic, Request};
use mosaic_region::{Region, morph};

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

fn gen_requests(count: usize) -> Vec<Request<usize>> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|i| {
            let area = 100.0 + 9_900.0 * rng.next_f64();
            let aspect = 0.56 + 1.22 * rng.next_f64();
            Request::new(area, aspect, i)
        })
        .collect()
}

fn gen_union(count: usize) -> Region {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..count).fold(Region::new(), |acc, _| {
        let x = (rng.next_f64() * 500.0).round();
        let y = (rng.next_f64() * 500.0).round();
        let w = 5.0 + (rng.next_f64() * 60.0).round();
        let h = 5.0 + (rng.next_f64() * 60.0).round();
        morph::union(&acc, &Region::from_rect(Rect::new(x, y, x + w, y + h)))
    })
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange_place");
    group.sample_size(10);
    for &n in &[25usize, 100] {
        let requests = gen_requests(n);
        group.throughput(Throughput::Elements(n as u64));
        for heuristic in [Heuristic::Best, Heuristic::First] {
            let config = ArrangeConfig::default().with_heuristic(heuristic);
            group.bench_function(format!("{heuristic:?}_n{n}").to_lowercase(), |b| {
                b.iter_batched(
                    || requests.clone(),
                    |requests| {
                        let mut arrangement = Arrangement::new(Point::ORIGIN, config).unwrap();
                        arrangement.place_all(requests, |_, _| {}).unwrap();
                        black_box(arrangement.bounds());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("region");
    for &n in &[50usize, 200] {
        let region = gen_union(n);
        group.bench_function(format!("rectangles_n{n}"), |b| {
            b.iter(|| black_box(region.rectangles().len()));
        });
        group.bench_function(format!("rect_index_n{n}"), |b| {
            b.iter(|| black_box(region.rect_index().len()));
        });
        group.bench_function(format!("close_n{n}"), |b| {
            b.iter(|| black_box(morph::close(&region, 3.0).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_place, bench_region);
criterion_main!(benches);
