//! Benchmarks for the full per-block shaper.
//!
//! Includes the table refresh, the ramped blend and bypass handling.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use orioto_dsp::{
    curve::CurveEvaluator,
    dsp::Waveshaper,
    table::{table_channel, TransferTable},
    DEFAULT_TABLE_RESOLUTION,
};

use super::test_signal;
use crate::{curve::bent_curve, BLOCK_SIZES};

pub fn bench_shaper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/shaper");
    let evaluator = CurveEvaluator::new(&bent_curve(8));

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        let table = TransferTable::build(&evaluator, DEFAULT_TABLE_RESOLUTION).expect("power of two");
        let (_publisher, reader) = table_channel(table, 4);
        let mut shaper = Waveshaper::new(reader, 0.01);
        shaper.prepare(48_000.0);

        // Steady state: no new table, blend settled
        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                shaper.process_block(black_box(&mut buffer));
            })
        });

        // A new table arrives every block, as during a drag
        let table = TransferTable::build(&evaluator, DEFAULT_TABLE_RESOLUTION).expect("power of two");
        let (mut publisher, reader) = table_channel(table, 4);
        let mut shaper = Waveshaper::new(reader, 0.01);
        shaper.prepare(48_000.0);
        group.bench_with_input(BenchmarkId::new("republished", size), &size, |b, _| {
            b.iter(|| {
                publisher.publish(&evaluator);
                buffer.copy_from_slice(&input);
                shaper.process_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
