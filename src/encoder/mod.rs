//! Encoders that turn a source image into a sized JPEG candidate

/// ImageMagick command-line encoder
pub mod magick;
/// In-process encoder built on the `image` crate
pub mod native;
/// Deterministic stand-in encoder for tests and benchmarks
pub mod synthetic;

use crate::convergence::parameters::EncodeParameters;
use crate::io::error::{Result, ShrinkError, file_system};
use clap::ValueEnum;
use std::path::Path;

/// Capability to re-encode a source image at a given quality and scale
///
/// Implementations overwrite `candidate` on every call; the caller owns the
/// candidate path for the duration of one file.
pub trait Encoder {
    /// Short name used in messages
    fn name(&self) -> &'static str;

    /// Verify the encoder can run before any file is touched
    ///
    /// # Errors
    ///
    /// Returns [`ShrinkError::EncoderUnavailable`] if a required tool is missing
    fn check_available(&self) -> Result<()>;

    /// Encode `source` with `parameters` into `candidate`
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be decoded or the candidate cannot be written
    fn encode(
        &mut self,
        source: &Path,
        parameters: EncodeParameters,
        candidate: &Path,
    ) -> Result<()>;
}

/// Encoder backends selectable from the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EncoderKind {
    /// Built-in JPEG encoder, no external tools required
    #[default]
    Native,
    /// ImageMagick `magick` or `convert` program
    Magick,
}

impl EncoderKind {
    /// Construct the selected encoder
    pub fn build(self) -> Box<dyn Encoder> {
        match self {
            Self::Native => Box::new(native::NativeEncoder::new()),
            Self::Magick => Box::new(magick::MagickEncoder::new()),
        }
    }
}

/// Measure a candidate produced by the last encode
///
/// # Errors
///
/// Returns [`ShrinkError::CandidateMissing`] if the candidate is absent or empty,
/// since an encode that leaves nothing behind is a failed encode rather than a
/// zero-byte success.
pub fn candidate_size(candidate: &Path) -> Result<u64> {
    match std::fs::metadata(candidate) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Ok(metadata.len()),
        Ok(_) => Err(ShrinkError::CandidateMissing {
            path: candidate.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ShrinkError::CandidateMissing {
            path: candidate.to_path_buf(),
        }),
        Err(e) => Err(file_system(candidate, "measure candidate", e)),
    }
}
