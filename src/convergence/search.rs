//! Size-convergence loop: re-encode until the candidate fits under the ceiling

use crate::convergence::parameters::{ConvergenceConfig, EncodeParameters, Phase};
use crate::convergence::schedule::ParameterSchedule;
use crate::encoder::{Encoder, candidate_size};
use crate::io::error::Result;
use std::path::Path;

/// One measured encode attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based attempt number within the search
    pub number: usize,
    /// Phase that produced the parameters
    pub phase: Phase,
    /// Parameters used for this attempt
    pub parameters: EncodeParameters,
    /// Measured candidate size in bytes
    pub size: u64,
}

/// Terminal state of a search that did not hit an encode error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// The candidate at `parameters` is strictly smaller than the ceiling
    Success {
        /// Parameters of the accepted candidate
        parameters: EncodeParameters,
        /// Size of the accepted candidate
        size: u64,
        /// Encode attempts performed, including the accepted one
        attempts: usize,
    },
    /// The schedule ran out at the scale floor without meeting the ceiling
    Exhausted {
        /// Encode attempts performed
        attempts: usize,
        /// Smallest candidate size seen
        smallest: u64,
    },
}

impl Convergence {
    /// Whether the search produced an acceptable candidate
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Number of encode attempts the search performed
    pub const fn attempts(&self) -> usize {
        match self {
            Self::Success { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Run the two-phase search for one source image
///
/// Each attempt overwrites `candidate`; on [`Convergence::Success`] the file at
/// `candidate` holds the accepted encode. The observer sees every measured attempt.
///
/// # Errors
///
/// Returns the first encode or measurement error. A failed attempt is never
/// retried, and a candidate that is missing after an encode counts as a failure.
pub fn converge(
    encoder: &mut dyn Encoder,
    source: &Path,
    candidate: &Path,
    config: &ConvergenceConfig,
    mut observer: impl FnMut(&Attempt),
) -> Result<Convergence> {
    let mut smallest = u64::MAX;
    let mut attempts = 0;

    for (phase, parameters) in ParameterSchedule::new(config) {
        attempts += 1;
        encoder.encode(source, parameters, candidate)?;
        let size = candidate_size(candidate)?;
        smallest = smallest.min(size);

        observer(&Attempt {
            number: attempts,
            phase,
            parameters,
            size,
        });

        // Strict: a candidate exactly at the ceiling is rejected
        if size < config.max_bytes() {
            return Ok(Convergence::Success {
                parameters,
                size,
                attempts,
            });
        }
    }

    Ok(Convergence::Exhausted { attempts, smallest })
}
