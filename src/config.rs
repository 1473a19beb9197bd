#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    curve::Parameterization, edit::ControlPointMode, error::ConfigError,
    table::lookup::check_resolution, DEFAULT_TABLE_RESOLUTION,
};

/// Session-wide settings for the shaper.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaperConfig {
    /// Points in each transfer table. Power of two.
    pub table_resolution: usize,
    pub parameterization: Parameterization,
    pub control_point_mode: ControlPointMode,
    /// Time the dry/wet blend takes to reach a new setting.
    pub mix_ramp_seconds: f32,
    /// Tables that may wait for the audio thread at once.
    pub publish_queue: usize,
}

impl ShaperConfig {
    pub fn with_table_resolution(mut self, resolution: usize) -> Self {
        self.table_resolution = resolution;
        self
    }

    pub fn with_parameterization(mut self, parameterization: Parameterization) -> Self {
        self.parameterization = parameterization;
        self
    }

    pub fn with_control_point_mode(mut self, mode: ControlPointMode) -> Self {
        self.control_point_mode = mode;
        self
    }

    pub fn with_mix_ramp(mut self, seconds: f32) -> Self {
        self.mix_ramp_seconds = seconds;
        self
    }

    pub fn with_publish_queue(mut self, capacity: usize) -> Self {
        self.publish_queue = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_resolution(self.table_resolution)?;
        if !(self.mix_ramp_seconds.is_finite() && self.mix_ramp_seconds >= 0.0) {
            return Err(ConfigError::MixRamp(self.mix_ramp_seconds));
        }
        if self.publish_queue == 0 {
            return Err(ConfigError::PublishQueue);
        }
        Ok(())
    }
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            table_resolution: DEFAULT_TABLE_RESOLUTION,
            parameterization: Parameterization::Linear,
            control_point_mode: ControlPointMode::Independent,
            mix_ramp_seconds: 0.01,
            publish_queue: 4,
        }
    }
}
