//! Benchmarks for dry/wet blending.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use orioto_dsp::dsp::mix;

use super::test_signal;
use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry = test_signal(size);
        let shaped: Vec<f32> = dry.iter().map(|x| x.tanh()).collect();
        let mut wet = shaped.clone();

        group.bench_with_input(BenchmarkId::new("dry_wet", size), &size, |b, _| {
            b.iter(|| {
                wet.copy_from_slice(&shaped);
                mix::apply_dry_wet(black_box(&dry), black_box(&mut wet), black_box(0.3));
            })
        });
    }

    group.finish();
}
