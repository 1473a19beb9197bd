//! Benchmarks for transfer table lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use orioto_dsp::table::TransferTable;

use super::test_signal;
use crate::{curve::bent_curve, BLOCK_SIZES, TABLE_RESOLUTIONS};

pub fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lookup");
    let curve = bent_curve(8);

    for &resolution in TABLE_RESOLUTIONS {
        let table = TransferTable::from_curve(&curve, resolution).expect("power of two");

        for &size in BLOCK_SIZES {
            let input = test_signal(size);
            let mut buffer = input.clone();
            let id = format!("{resolution}pt");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    table.lookup_buffer(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
