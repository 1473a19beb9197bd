//! Benchmarks for audio-thread processing.

mod lookup;
mod mix;
mod shaper;

pub use lookup::bench_lookup;
pub use mix::bench_mix;
pub use shaper::bench_shaper;

/// A full-scale test signal that sweeps the whole curve.
pub fn test_signal(size: usize) -> Vec<f32> {
    (0..size).map(|i| (i as f32 * 0.1).sin()).collect()
}
