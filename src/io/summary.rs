//! Per-file outcomes and the batch summary returned by the driver

use crate::convergence::parameters::EncodeParameters;
use crate::io::error::{Result, ShrinkError};
use crate::io::size::format_size;
use std::fmt;
use std::path::PathBuf;

/// What happened to one source file
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// An accepted candidate was moved to `output`
    Shrunk {
        /// Final output location
        output: PathBuf,
        /// Parameters of the accepted encode
        parameters: EncodeParameters,
        /// Size of the output in bytes
        size: u64,
        /// Encode attempts performed
        attempts: usize,
    },
    /// The output already existed and overwriting was not requested
    AlreadyExists {
        /// The existing output
        output: PathBuf,
    },
    /// No scheduled attempt got under the ceiling
    Exhausted {
        /// Encode attempts performed
        attempts: usize,
        /// Smallest candidate produced
        smallest: u64,
    },
    /// Encoding or moving failed for this file only
    Failed {
        /// Rendered error
        reason: String,
        /// Encode attempts started, including the failed one
        attempts: usize,
    },
    /// Dry run: the file would be processed into `output`
    Planned {
        /// Output the run would produce
        output: PathBuf,
    },
    /// Another source earlier in the run already maps to the same output
    Conflict {
        /// The contested output
        output: PathBuf,
        /// Source that keeps the output
        claimed_by: PathBuf,
    },
}

impl FileOutcome {
    /// Encode attempts spent on the file
    pub const fn attempts(&self) -> usize {
        match self {
            Self::Shrunk { attempts, .. }
            | Self::Exhausted { attempts, .. }
            | Self::Failed { attempts, .. } => *attempts,
            Self::AlreadyExists { .. } | Self::Planned { .. } | Self::Conflict { .. } => 0,
        }
    }

    /// Whether the file counts against a successful run
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Exhausted { .. } | Self::Failed { .. } | Self::Conflict { .. }
        )
    }

    /// One-character marker for progress displays
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Shrunk { .. } => "✓",
            Self::AlreadyExists { .. } | Self::Planned { .. } => "-",
            Self::Exhausted { .. } | Self::Failed { .. } | Self::Conflict { .. } => "✗",
        }
    }
}

/// Outcome for one source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    /// The source image
    pub source: PathBuf,
    /// Size of the source when scanned
    pub original_size: u64,
    /// What happened to it
    pub outcome: FileOutcome,
}

/// Everything a batch run did
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// One report per scanned source, in processing order
    pub files: Vec<FileReport>,
    /// The operator declined the confirmation prompt
    pub cancelled: bool,
}

impl BatchSummary {
    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }

    /// Files written
    pub fn shrunk(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Shrunk { .. }))
    }

    /// Files skipped because their output existed
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::AlreadyExists { .. }))
    }

    /// Files that failed, were exhausted or lost an output name to another source
    pub fn failed(&self) -> usize {
        self.count(FileOutcome::is_failure)
    }

    /// Total encode attempts across the batch
    pub fn attempts(&self) -> usize {
        self.files
            .iter()
            .map(|report| report.outcome.attempts())
            .sum()
    }

    /// Bytes saved by written outputs relative to their sources
    pub fn bytes_saved(&self) -> u64 {
        self.files
            .iter()
            .filter_map(|report| match report.outcome {
                FileOutcome::Shrunk { size, .. } => {
                    Some(report.original_size.saturating_sub(size))
                }
                _ => None,
            })
            .sum()
    }

    /// Convert into the process result: an error when any file could not be shrunk
    ///
    /// # Errors
    ///
    /// Returns [`ShrinkError::BatchIncomplete`] if any file failed, was exhausted or conflicted
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed();
        if failed == 0 {
            Ok(self)
        } else {
            Err(ShrinkError::BatchIncomplete {
                failed,
                total: self.files.len(),
            })
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cancelled {
            return write!(f, "Cancelled, no files were changed");
        }
        write!(
            f,
            "{} shrunk, {} skipped, {} failed ({} attempts, {} saved)",
            self.shrunk(),
            self.skipped(),
            self.failed(),
            self.attempts(),
            format_size(self.bytes_saved())
        )
    }
}
