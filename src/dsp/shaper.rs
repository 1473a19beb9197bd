//! The realtime waveshaper.
//!
//! Runs on the audio thread. Each block picks up the newest transfer table,
//! then sends every sample through it and blends the result with the dry
//! input. No allocation, no locks, no Bézier math.

use super::{mix::blend_dry_wet, smooth::LinearSmoother};
use crate::table::TableReader;

/// Dry/wet blend a new shaper starts at.
pub const DEFAULT_MIX: f32 = 1.0;

pub struct Waveshaper {
    reader: TableReader,
    mix: LinearSmoother,
    ramp_seconds: f32,
    bypassed: bool,
}

impl Waveshaper {
    pub fn new(reader: TableReader, ramp_seconds: f32) -> Self {
        Self {
            reader,
            mix: LinearSmoother::new(DEFAULT_MIX),
            ramp_seconds,
            bypassed: false,
        }
    }

    /// Size the blend ramp for `sample_rate`.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.mix.reset(sample_rate, self.ramp_seconds);
    }

    /// Target blend in [0, 1], reached over the ramp time.
    pub fn set_mix(&mut self, mix: f32) {
        let mix = if mix.is_nan() { DEFAULT_MIX } else { mix.clamp(0.0, 1.0) };
        self.mix.set_target(mix);
    }

    pub fn mix(&self) -> f32 {
        self.mix.target()
    }

    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Finish any blend ramp immediately.
    pub fn reset(&mut self) {
        self.mix.snap();
    }

    /// Generation of the table in use.
    pub fn generation(&self) -> u64 {
        self.reader.generation()
    }

    /// Shape one mono block in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        self.reader.refresh();

        if self.bypassed {
            self.mix.skip(buffer.len());
            return;
        }

        for sample in buffer.iter_mut() {
            let mix = self.mix.next_value();
            *sample = blend_dry_wet(*sample, self.reader.lookup(*sample), mix);
        }
    }

    /// Shape several channels of equal length in place, sharing one ramp.
    pub fn process_channels(&mut self, channels: &mut [&mut [f32]]) {
        self.reader.refresh();

        let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        debug_assert!(channels.iter().all(|c| c.len() == frames));

        if self.bypassed {
            self.mix.skip(frames);
            return;
        }

        for frame in 0..frames {
            let mix = self.mix.next_value();
            for channel in channels.iter_mut() {
                let dry = channel[frame];
                channel[frame] = blend_dry_wet(dry, self.reader.lookup(dry), mix);
            }
        }
    }

    /// Shape one sample against the current table without refreshing it.
    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        if self.bypassed {
            return sample;
        }
        blend_dry_wet(sample, self.reader.lookup(sample), self.mix.next_value())
    }
}
