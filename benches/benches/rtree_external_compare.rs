// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use mosaic_index::{Aabb2D, RectIndex};
use mosaic_region::{Region, morph};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

/// The positive pieces of a staircase-shaped region, like the occupied area of an
/// arrangement.
fn gen_region_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let region = (0..n).fold(Region::new(), |acc, i| {
        let x = i as f64 * cell;
        let top = (n - i) as f64 * cell;
        morph::union(&acc, &Region::from_rect(Rect::new(x, 0.0, x + cell, top)))
    });
    let region = (0..n).fold(region, |acc, i| {
        let y = i as f64 * cell;
        morph::union(
            &acc,
            &Region::from_rect(Rect::new(0.0, y, cell * 0.5 * (i % 4 + 1) as f64, y + cell)),
        )
    });
    region
        .rectangles()
        .into_iter()
        .filter(|r| r.w > 0.0)
        .map(|r| Aabb2D::new(r.rect.x0, r.rect.y0, r.rect.x1, r.rect.y1))
        .collect()
}

fn to_rstar_rects(v: &[Aabb2D<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_rect_index_vs_rstar(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_index_vs_rstar");
    for &n in &[64usize, 256] {
        let rects = gen_region_rects(n, 10.0);
        let probes: Vec<_> = (0..256)
            .map(|q| {
                let x = (q % 32) as f64 * n as f64 * 0.3;
                let y = (q / 8) as f64 * n as f64 * 0.3;
                Aabb2D::<f64>::from_xywh(x, y, 15.0, 9.0)
            })
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("mosaic_build_query_n{}", n), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let idx: RectIndex<f64, ()> = rects.into_iter().map(|r| (r, ())).collect();
                    let hits = probes.iter().filter(|p| idx.overlaps(p)).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    // rstar treats touching envelopes as intersecting; filter to interiors.
                    let hits = probes
                        .iter()
                        .filter(|p| {
                            let aabb = AABB::from_corners([p.min_x, p.min_y], [p.max_x, p.max_y]);
                            tree.locate_in_envelope_intersecting(&aabb).any(|r| {
                                let (lo, hi) = (r.lower(), r.upper());
                                Aabb2D::new(lo[0], lo[1], hi[0], hi[1]).overlaps_open(p)
                            })
                        })
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rect_index_vs_rstar);
criterion_main!(benches);
