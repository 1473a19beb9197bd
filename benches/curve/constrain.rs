//! Benchmarks for drag corrections.
//!
//! A correction only looks at the dragged node's neighbours, so the cost
//! should not move with node count.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use orioto_dsp::{
    curve::Point,
    edit::{constrain, ControlPointMode, DragTarget},
};

use super::bent_curve;

pub fn bench_constrain(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/constrain");

    for &nodes in &[3usize, 32, 256] {
        let curve = bent_curve(nodes);
        let index = nodes / 2;
        let origin = curve.nodes()[index];
        let far = Point::new(2.0, 2.0);

        group.bench_with_input(BenchmarkId::new("end_point", nodes), &nodes, |b, _| {
            b.iter(|| {
                constrain(
                    &curve,
                    DragTarget::end_point(index),
                    &origin,
                    black_box(far),
                    ControlPointMode::Independent,
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("mirrored", nodes), &nodes, |b, _| {
            b.iter(|| {
                constrain(
                    &curve,
                    DragTarget::control_out(index),
                    &origin,
                    black_box(far),
                    ControlPointMode::Mirrored,
                )
            })
        });
    }

    group.finish();
}
