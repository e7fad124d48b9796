//! Ordered sequence of encode parameters explored by the search

use crate::convergence::parameters::{ConvergenceConfig, EncodeParameters, Phase};
use crate::io::configuration::FULL_SCALE;

/// Yields the greedy two-phase parameter sequence
///
/// Quality phase: quality 100 down to the minimum quality in steps of one, at full scale.
/// Scale phase: scale `100 - step`, `100 - 2 * step`, ... at the minimum quality, ending
/// before the scale would drop below the configured floor. Neither phase revisits the
/// other's parameter, so the sequence is finite.
#[derive(Clone, Debug)]
pub struct ParameterSchedule {
    config: ConvergenceConfig,
    next: Option<(Phase, EncodeParameters)>,
}

impl ParameterSchedule {
    /// Create a schedule positioned at the first attempt
    pub const fn new(config: &ConvergenceConfig) -> Self {
        Self {
            config: *config,
            next: Some((Phase::Quality, EncodeParameters::full_quality())),
        }
    }

    /// Phase of the next attempt, `None` once the schedule is exhausted
    pub fn phase(&self) -> Option<Phase> {
        self.next.map(|(phase, _)| phase)
    }

    fn scale_step(&self, from: u8) -> Option<(Phase, EncodeParameters)> {
        let scale = from.checked_sub(self.config.shrink_step())?;
        (scale >= self.config.min_scale()).then_some((
            Phase::Scale,
            EncodeParameters {
                quality: self.config.min_quality(),
                scale,
            },
        ))
    }

    fn advance(&self, phase: Phase, current: EncodeParameters) -> Option<(Phase, EncodeParameters)> {
        match phase {
            Phase::Quality => {
                let quality = current.quality.saturating_sub(1);
                if quality >= self.config.min_quality() {
                    Some((
                        Phase::Quality,
                        EncodeParameters {
                            quality,
                            scale: FULL_SCALE,
                        },
                    ))
                } else {
                    self.scale_step(FULL_SCALE)
                }
            }
            Phase::Scale => self.scale_step(current.scale),
        }
    }
}

impl Iterator for ParameterSchedule {
    type Item = (Phase, EncodeParameters);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.advance(current.0, current.1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some((Phase::Quality, parameters)) => {
                let quality_left = (parameters.quality - self.config.min_quality()) as usize + 1;
                quality_left + self.config.scale_attempts()
            }
            Some((Phase::Scale, parameters)) => {
                ((parameters.scale - self.config.min_scale()) / self.config.shrink_step()) as usize
                    + 1
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ParameterSchedule {}

