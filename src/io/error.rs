//! Error types for configuration, encoding and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all shrinking operations
#[derive(Debug)]
pub enum ShrinkError {
    /// Option or configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A directory given on the command line does not exist
    DirectoryNotFound {
        /// The missing directory
        path: PathBuf,
    },

    /// The selected encoder cannot run on this machine
    EncoderUnavailable {
        /// Encoder name as selected on the command line
        encoder: &'static str,
        /// Why the encoder could not be started
        reason: String,
    },

    /// Failed to decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to write an encoded candidate
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// The external encoder reported a failure for one attempt
    Encode {
        /// Source image being encoded
        path: PathBuf,
        /// Quality of the failed attempt
        quality: u8,
        /// Scale percentage of the failed attempt
        scale: u8,
        /// Encoder diagnostics
        reason: String,
    },

    /// An encode attempt finished without producing a usable candidate
    CandidateMissing {
        /// Where the candidate was expected
        path: PathBuf,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Some files of a batch could not be shrunk
    BatchIncomplete {
        /// Files that failed or could not reach the ceiling
        failed: usize,
        /// Files the batch attempted
        total: usize,
    },
}

impl ShrinkError {
    /// Whether the error only aborts the current file rather than the whole run
    pub const fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::ImageLoad { .. }
                | Self::ImageExport { .. }
                | Self::Encode { .. }
                | Self::CandidateMissing { .. }
                | Self::FileSystem { .. }
        )
    }
}

impl fmt::Display for ShrinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DirectoryNotFound { path } => {
                write!(f, "Directory not found: '{}'", path.display())
            }
            Self::EncoderUnavailable { encoder, reason } => {
                write!(f, "Encoder '{encoder}' is unavailable: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Encode {
                path,
                quality,
                scale,
                reason,
            } => {
                write!(
                    f,
                    "Encoding '{}' at quality {quality}, scale {scale}% failed: {reason}",
                    path.display()
                )
            }
            Self::CandidateMissing { path } => {
                write!(f, "Encoder produced no output at '{}'", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::BatchIncomplete { failed, total } => {
                write!(f, "{failed} of {total} files could not be shrunk")
            }
        }
    }
}

impl std::error::Error for ShrinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for shrink results
pub type Result<T> = std::result::Result<T, ShrinkError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ShrinkError {
    ShrinkError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error tied to a path and operation
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> ShrinkError {
    ShrinkError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
