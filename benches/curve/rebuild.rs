//! Benchmarks for sampling the curve into a transfer table.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use orioto_dsp::{
    curve::{CurveEvaluator, Parameterization},
    table::TransferTable,
};

use super::bent_curve;
use crate::TABLE_RESOLUTIONS;

pub fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/rebuild");
    let curve = bent_curve(8);

    for &resolution in TABLE_RESOLUTIONS {
        let mut table = TransferTable::with_resolution(resolution).expect("power of two");

        let linear = CurveEvaluator::new(&curve);
        group.bench_with_input(BenchmarkId::new("linear", resolution), &resolution, |b, _| {
            b.iter(|| table.rebuild_from(black_box(&linear)))
        });

        let exact = CurveEvaluator::with_parameterization(&curve, Parameterization::Exact);
        group.bench_with_input(BenchmarkId::new("exact", resolution), &resolution, |b, _| {
            b.iter(|| table.rebuild_from(black_box(&exact)))
        });
    }

    group.finish();
}
