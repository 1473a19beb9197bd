//! Click-free parameter changes.
//!
//! A [`LinearSmoother`] walks from its current value to a new target in a
//! fixed number of equal steps. Unlike a one-pole smoother it lands exactly
//! on the target after the ramp time, which keeps a blend of 1.0 bit exact
//! once it settles.

/// A value that ramps linearly towards its target, one step per sample.
#[derive(Debug, Clone)]
pub struct LinearSmoother {
    current: f32,
    target: f32,
    step: f32,
    /// Samples left in the current ramp.
    remaining: u32,
    /// Samples a full ramp takes.
    ramp_samples: u32,
}

impl LinearSmoother {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Set the ramp length from a sample rate and a time in seconds.
    ///
    /// Snaps to the target; call before processing starts.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        let samples = (sample_rate * ramp_seconds).max(0.0);
        self.ramp_samples = if samples.is_finite() {
            samples.round() as u32
        } else {
            0
        };
        self.snap();
    }

    /// Start a ramp towards `target` from wherever the value is now.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;

        if self.ramp_samples == 0 {
            self.snap();
            return;
        }
        self.remaining = self.ramp_samples;
        self.step = (self.target - self.current) / self.ramp_samples as f32;
    }

    /// Jump straight to the target.
    pub fn snap(&mut self) {
        self.current = self.target;
        self.remaining = 0;
        self.step = 0.0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.remaining == 0 {
            return self.current;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.current = self.target;
        } else {
            self.current += self.step;
        }
        self.current
    }

    /// Advance `samples` samples at once.
    pub fn skip(&mut self, samples: usize) {
        let samples = samples.min(self.remaining as usize) as u32;
        if samples == self.remaining {
            self.snap();
        } else {
            self.remaining -= samples;
            self.current += self.step * samples as f32;
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_smoothing(&self) -> bool {
        self.remaining > 0
    }
}

impl Default for LinearSmoother {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_target_exactly_after_ramp() {
        let mut smoother = LinearSmoother::new(0.0);
        smoother.reset(1000.0, 0.01);
        smoother.set_target(1.0);

        let values: Vec<f32> = (0..10).map(|_| smoother.next_value()).collect();
        assert!((values[0] - 0.1).abs() < 1e-6);
        assert_eq!(values[9], 1.0);
        assert!(!smoother.is_smoothing());
        assert_eq!(smoother.next_value(), 1.0);
    }

    #[test]
    fn test_ramp_is_monotonic() {
        let mut smoother = LinearSmoother::new(1.0);
        smoother.reset(48_000.0, 0.01);
        smoother.set_target(0.25);

        let mut previous = smoother.current();
        while smoother.is_smoothing() {
            let value = smoother.next_value();
            assert!(value <= previous);
            previous = value;
        }
        assert_eq!(previous, 0.25);
    }

    #[test]
    fn test_zero_ramp_is_immediate() {
        let mut smoother = LinearSmoother::new(0.0);
        smoother.reset(44_100.0, 0.0);
        smoother.set_target(0.7);
        assert_eq!(smoother.current(), 0.7);
        assert!(!smoother.is_smoothing());
    }

    #[test]
    fn test_retarget_mid_ramp_starts_from_current_value() {
        let mut smoother = LinearSmoother::new(0.0);
        smoother.reset(100.0, 0.1);
        smoother.set_target(1.0);
        for _ in 0..5 {
            smoother.next_value();
        }
        let midway = smoother.current();

        smoother.set_target(0.0);
        let next = smoother.next_value();
        assert!(next < midway);
        assert!((midway - next - midway / 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_skip_matches_stepping() {
        let mut stepped = LinearSmoother::new(0.0);
        stepped.reset(1000.0, 0.02);
        stepped.set_target(1.0);
        let mut skipped = stepped.clone();

        for _ in 0..7 {
            stepped.next_value();
        }
        skipped.skip(7);
        assert!((stepped.current() - skipped.current()).abs() < 1e-6);

        skipped.skip(100);
        assert_eq!(skipped.current(), 1.0);
    }
}
