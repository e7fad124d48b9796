//! Deterministic encoder that writes synthetic candidates of a computed size

use crate::convergence::parameters::EncodeParameters;
use crate::encoder::Encoder;
use crate::io::error::{Result, ShrinkError, file_system};
use std::path::Path;

/// Maps encode parameters to the byte size of the candidate to produce
///
/// `None` simulates an encoder failure for that attempt.
pub type SizeModel = Box<dyn Fn(EncodeParameters) -> Option<u64>>;

/// Encoder that never touches image data
///
/// Each call writes a file of exactly the modelled size and records the
/// parameters, so searches can be checked attempt by attempt.
pub struct SyntheticEncoder {
    model: SizeModel,
    calls: Vec<EncodeParameters>,
    available: bool,
    leave_empty: bool,
}

impl SyntheticEncoder {
    /// Create an encoder from an arbitrary size model
    pub fn new(model: impl Fn(EncodeParameters) -> Option<u64> + 'static) -> Self {
        Self {
            model: Box::new(model),
            calls: Vec::new(),
            available: true,
            leave_empty: false,
        }
    }

    /// Size proportional to quality and to the scaled pixel area
    ///
    /// `full_size` is the candidate size at quality 100 and scale 100.
    pub fn proportional(full_size: u64) -> Self {
        Self::new(move |parameters| {
            let quality = u128::from(parameters.quality);
            let scale = u128::from(parameters.scale);
            let size = u128::from(full_size) * quality * scale * scale / 1_000_000;
            // At most full_size
            u64::try_from(size).ok()
        })
    }

    /// Every attempt produces the same size
    pub fn constant(size: u64) -> Self {
        Self::new(move |_| Some(size))
    }

    /// Every attempt fails
    pub fn failing() -> Self {
        Self::new(|_| None)
    }

    /// Report the encoder as missing from [`Encoder::check_available`]
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Report success without leaving a candidate behind
    #[must_use]
    pub const fn without_output(mut self) -> Self {
        self.leave_empty = true;
        self
    }

    /// Candidate size the model assigns to `parameters`, `None` for a failed attempt
    pub fn modelled_size(&self, parameters: EncodeParameters) -> Option<u64> {
        (self.model)(parameters)
    }

    /// Parameters of every encode call so far, in order
    pub fn calls(&self) -> &[EncodeParameters] {
        &self.calls
    }
}

impl Encoder for SyntheticEncoder {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(ShrinkError::EncoderUnavailable {
                encoder: "synthetic",
                reason: "disabled for this run".to_string(),
            })
        }
    }

    fn encode(
        &mut self,
        source: &Path,
        parameters: EncodeParameters,
        candidate: &Path,
    ) -> Result<()> {
        self.calls.push(parameters);

        if !source.exists() {
            return Err(ShrinkError::Encode {
                path: source.to_path_buf(),
                quality: parameters.quality,
                scale: parameters.scale,
                reason: "source does not exist".to_string(),
            });
        }

        let size = self.modelled_size(parameters).ok_or_else(|| ShrinkError::Encode {
            path: source.to_path_buf(),
            quality: parameters.quality,
            scale: parameters.scale,
            reason: "size model rejected the attempt".to_string(),
        })?;

        if self.leave_empty {
            // Mimic an encoder that exits cleanly but writes nothing
            let _ = std::fs::remove_file(candidate);
            return Ok(());
        }

        let len = usize::try_from(size).map_err(|e| ShrinkError::Encode {
            path: source.to_path_buf(),
            quality: parameters.quality,
            scale: parameters.scale,
            reason: format!("synthetic size {size} is unusable: {e}"),
        })?;
        std::fs::write(candidate, vec![0u8; len])
            .map_err(|e| file_system(candidate, "write candidate", e))
    }
}
