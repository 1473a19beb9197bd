use crate::{
    curve::{point::lerp, Curve, CurveEvaluator},
    error::ConfigError,
};

/*
Transfer Table
==============

Bézier evaluation costs a bracket search plus a handful of lerps (and, for
exact parameterization, a Newton solve). That is fine for drawing but too
much to pay for every sample of every channel. So the curve is sampled once,
on the control thread, into a table:

    index     0      1      2     ...     N-1
    x        -1   -1+h   -1+2h    ...      1        h = 2 / (N - 1)
    y       f(x0)  f(x1)  f(x2)   ...   f(xN-1)

and the audio thread reads it back with one linear interpolation:

    position = (x + 1) * (N - 1) / 2
    i        = floor(position)
    y        = lerp(table[i], table[i + 1], position - i)

Resolution
----------

N is a power of two. 1024 points put neighbouring samples about 0.002 apart
in x, well below anything audible for user-drawn curves. Linear
interpolation error grows with curvature, so very tight bends between close
nodes are where a larger table pays off.
*/

/// A sampled transfer curve with O(1) interpolated lookup.
#[derive(Debug, Clone)]
pub struct TransferTable {
    samples: Vec<f32>,
    /// Maps x + 1 onto a fractional index.
    scale: f32,
    generation: u64,
}

impl TransferTable {
    /// An all-zero table of `resolution` points.
    pub fn with_resolution(resolution: usize) -> Result<Self, ConfigError> {
        check_resolution(resolution)?;
        Ok(Self {
            samples: vec![0.0; resolution],
            scale: (resolution - 1) as f32 * 0.5,
            generation: 0,
        })
    }

    /// Sample `evaluator` into a new table.
    pub fn build(evaluator: &CurveEvaluator, resolution: usize) -> Result<Self, ConfigError> {
        let mut table = Self::with_resolution(resolution)?;
        table.rebuild_from(evaluator);
        Ok(table)
    }

    /// Sample `curve` with linear parameterization.
    pub fn from_curve(curve: &Curve, resolution: usize) -> Result<Self, ConfigError> {
        Self::build(&CurveEvaluator::new(curve), resolution)
    }

    /// Resample in place, keeping the allocation.
    pub fn rebuild_from(&mut self, evaluator: &CurveEvaluator) {
        let last = (self.samples.len() - 1) as f32;
        for (i, sample) in self.samples.iter_mut().enumerate() {
            let x = (i as f32 / last) * 2.0 - 1.0;
            *sample = evaluator.evaluate(x);
        }
    }

    /// Interpolated curve value at `x`. Out-of-range input is clamped.
    #[inline]
    pub fn lookup(&self, x: f32) -> f32 {
        let x = if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) };
        let position = (x + 1.0) * self.scale;
        let index = (position as usize).min(self.samples.len() - 2);
        let frac = position - index as f32;
        lerp(self.samples[index], self.samples[index + 1], frac)
    }

    /// Run every sample of `buffer` through the table in place.
    pub fn lookup_buffer(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.lookup(*sample);
        }
    }

    pub fn resolution(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Input x of sample `index`.
    pub fn x_at(&self, index: usize) -> f32 {
        (index as f32 / (self.samples.len() - 1) as f32) * 2.0 - 1.0
    }

    /// How many times this table's contents have been published.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }
}

pub(crate) fn check_resolution(resolution: usize) -> Result<(), ConfigError> {
    if resolution >= 2 && resolution.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigError::TableResolution(resolution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{evaluate, Node, Parameterization, Point};

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn drive_curve() -> Curve {
        Curve::new(vec![
            Node::new(p(-1.0, -1.0), Point::ZERO, p(0.3, 0.7)),
            Node::new(p(-0.2, -0.1), p(-0.2, -0.3), p(0.2, 0.3)),
            Node::new(p(0.4, 0.7), p(-0.15, -0.1), p(0.2, 0.1)),
            Node::new(p(1.0, 0.85), p(-0.2, 0.0), Point::ZERO),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_resolution() {
        assert_eq!(
            TransferTable::with_resolution(1000).unwrap_err(),
            ConfigError::TableResolution(1000)
        );
        assert!(TransferTable::with_resolution(1).is_err());
        assert!(TransferTable::with_resolution(0).is_err());
        assert!(TransferTable::with_resolution(2).is_ok());
    }

    #[test]
    fn test_table_matches_evaluator() {
        let curve = drive_curve();
        let resolution = 1024;
        let table = TransferTable::from_curve(&curve, resolution).unwrap();
        let epsilon = 4.0 / resolution as f32;

        for i in 0..=10_000 {
            let x = -1.0 + i as f32 / 5_000.0;
            let difference = (table.lookup(x) - evaluate(&curve, x)).abs();
            assert!(difference < epsilon, "x = {x}, difference = {difference}");
        }
    }

    #[test]
    fn test_table_hits_sample_points_exactly() {
        let curve = drive_curve();
        let table = TransferTable::from_curve(&curve, 64).unwrap();
        assert_eq!(table.lookup(-1.0), curve.first().end_point.y);
        assert_eq!(table.lookup(1.0), curve.last().end_point.y);
        assert_eq!(table.x_at(0), -1.0);
        assert_eq!(table.x_at(63), 1.0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let evaluator = CurveEvaluator::with_parameterization(&drive_curve(), Parameterization::Exact);
        let first = TransferTable::build(&evaluator, 256).unwrap();
        let mut second = first.clone();
        second.rebuild_from(&evaluator);
        assert_eq!(first.samples(), second.samples());
    }

    #[test]
    fn test_lookup_clamps_input() {
        let table = TransferTable::from_curve(&Curve::bypass(), 32).unwrap();
        assert_eq!(table.lookup(4.0), table.lookup(1.0));
        assert_eq!(table.lookup(-4.0), table.lookup(-1.0));
        assert!(table.lookup(f32::NAN).abs() < 1e-5);
    }

    #[test]
    fn test_identity_table_passes_signal() {
        let table = TransferTable::from_curve(&Curve::bypass(), 1024).unwrap();
        let mut buffer: Vec<f32> = (0..128).map(|i| (i as f32 * 0.1).sin()).collect();
        let original = buffer.clone();
        table.lookup_buffer(&mut buffer);
        for (a, b) in buffer.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }
}
