//! Encode parameters and the immutable search configuration

use crate::io::configuration::{FULL_SCALE, MAX_QUALITY};
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Quality and scale for a single encode attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EncodeParameters {
    /// Lossy compression quality, 1 to 100
    pub quality: u8,
    /// Percentage of the source dimensions, 1 to 100
    pub scale: u8,
}

impl EncodeParameters {
    /// Full quality at full size, the first attempt of every search
    pub const fn full_quality() -> Self {
        Self {
            quality: MAX_QUALITY,
            scale: FULL_SCALE,
        }
    }

    /// Whether the attempt keeps the source dimensions
    pub const fn is_full_scale(&self) -> bool {
        self.scale >= FULL_SCALE
    }
}

impl fmt::Display for EncodeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quality {}, scale {}%", self.quality, self.scale)
    }
}

/// Stage of the two-phase search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Lowering quality at full scale
    Quality,
    /// Lowering scale at the minimum quality
    Scale,
}

/// Limits that drive one convergence search
///
/// Built once from the command line and passed by reference into every search;
/// nothing in the loop reads process-wide state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvergenceConfig {
    max_bytes: u64,
    min_quality: u8,
    shrink_step: u8,
    min_scale: u8,
}

impl ConvergenceConfig {
    /// Validate and build a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_bytes` is zero
    /// - `min_quality` is outside 1..=100
    /// - `shrink_step` is outside 1..=99
    /// - `min_scale` is outside 1..=99
    pub fn new(max_bytes: u64, min_quality: u8, shrink_step: u8, min_scale: u8) -> Result<Self> {
        if max_bytes == 0 {
            return Err(invalid_parameter(
                "size",
                &max_bytes,
                &"must be greater than zero",
            ));
        }
        if min_quality == 0 || min_quality > MAX_QUALITY {
            return Err(invalid_parameter(
                "min_quality",
                &min_quality,
                &"must be between 1 and 100",
            ));
        }
        if shrink_step == 0 || shrink_step >= FULL_SCALE {
            return Err(invalid_parameter(
                "shrink_step",
                &shrink_step,
                &"must be between 1 and 99",
            ));
        }
        if min_scale == 0 || min_scale >= FULL_SCALE {
            return Err(invalid_parameter(
                "min_scale",
                &min_scale,
                &"must be between 1 and 99",
            ));
        }

        Ok(Self {
            max_bytes,
            min_quality,
            shrink_step,
            min_scale,
        })
    }

    /// Size ceiling in bytes; candidates must be strictly smaller
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Lowest quality tried in the quality phase and used throughout the scale phase
    pub const fn min_quality(&self) -> u8 {
        self.min_quality
    }

    /// Scale percentage removed at each scale-phase step
    pub const fn shrink_step(&self) -> u8 {
        self.shrink_step
    }

    /// Termination floor for the scale phase
    pub const fn min_scale(&self) -> u8 {
        self.min_scale
    }

    /// Number of attempts in the quality phase
    pub const fn quality_attempts(&self) -> usize {
        (MAX_QUALITY - self.min_quality) as usize + 1
    }

    /// Number of attempts in the scale phase before the floor is reached
    pub const fn scale_attempts(&self) -> usize {
        let span = FULL_SCALE - self.min_scale;
        (span / self.shrink_step) as usize
    }

    /// Upper bound on encode attempts for a single file
    pub const fn attempt_budget(&self) -> usize {
        self.quality_attempts() + self.scale_attempts()
    }
}
