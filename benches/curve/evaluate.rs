//! Benchmarks for direct Bézier evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use orioto_dsp::curve::{evaluate, CurveEvaluator, Parameterization};

use super::bent_curve;

pub fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/evaluate");

    for &nodes in &[3usize, 8, 32] {
        let curve = bent_curve(nodes);
        let inputs: Vec<f32> = (0..256).map(|i| -1.0 + i as f32 / 127.5).collect();

        // Rebuilds segments on every call
        group.bench_with_input(BenchmarkId::new("uncached", nodes), &nodes, |b, _| {
            b.iter(|| {
                for &x in &inputs {
                    black_box(evaluate(black_box(&curve), x));
                }
            })
        });

        let linear = CurveEvaluator::new(&curve);
        group.bench_with_input(BenchmarkId::new("linear", nodes), &nodes, |b, _| {
            b.iter(|| {
                for &x in &inputs {
                    black_box(linear.evaluate(black_box(x)));
                }
            })
        });

        // Newton solve per sample
        let exact = CurveEvaluator::with_parameterization(&curve, Parameterization::Exact);
        group.bench_with_input(BenchmarkId::new("exact", nodes), &nodes, |b, _| {
            b.iter(|| {
                for &x in &inputs {
                    black_box(exact.evaluate(black_box(x)));
                }
            })
        });
    }

    group.finish();
}
