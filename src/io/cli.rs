//! Command-line interface for shrinking oversized images in batch

use crate::convergence::parameters::ConvergenceConfig;
use crate::convergence::search::{Convergence, converge};
use crate::encoder::{Encoder, EncoderKind};
use crate::io::configuration::{
    DEFAULT_MAX_SIZE, DEFAULT_MIN_QUALITY, DEFAULT_MIN_SCALE, DEFAULT_SHRINK_STEP, OUTPUT_SUFFIX,
};
use crate::io::confirm::{AssumeYes, Confirm, TerminalConfirm};
use crate::io::error::{Result, file_system};
use crate::io::output::{OutputPolicy, candidate_path, discard, promote};
use crate::io::progress::ProgressManager;
use crate::io::scan::{SourceImage, scan_directories, validate_directories};
use crate::io::size::{format_size, parse_size};
use crate::io::summary::{BatchSummary, FileOutcome, FileReport};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shrinkfit")]
#[command(
    author,
    version,
    about = "Re-encode images as JPEG until each fits under a size limit"
)]
/// Command-line arguments for the shrinking tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directories to scan for oversized images
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directories: Vec<PathBuf>,

    /// Size limit, e.g. 500K, 1.5M or 200000 (binary units)
    #[arg(short, long, default_value = DEFAULT_MAX_SIZE)]
    pub size: String,

    /// Lowest JPEG quality tried before downscaling starts (1-100)
    #[arg(short, long, default_value_t = DEFAULT_MIN_QUALITY)]
    pub min_quality: u8,

    /// Percentage of the dimensions removed per downscale attempt (1-99)
    #[arg(short = 'p', long, default_value_t = DEFAULT_SHRINK_STEP)]
    pub shrink_step: u8,

    /// Smallest scale percentage tried before giving up (1-99)
    #[arg(long, default_value_t = DEFAULT_MIN_SCALE)]
    pub min_scale: u8,

    /// Suffix appended to output file names
    #[arg(long, default_value = OUTPUT_SUFFIX, allow_hyphen_values = true)]
    pub suffix: String,

    /// Write outputs here instead of next to each source
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Replace outputs that already exist
    #[arg(short = 'f', long)]
    pub overwrite: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Encoder backend
    #[arg(short, long, value_enum, default_value_t = EncoderKind::Native)]
    pub encoder: EncoderKind,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// List the files that would be shrunk without encoding anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Report every encode attempt
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the validated search configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the size does not parse or a limit is out of range
    pub fn convergence_config(&self) -> Result<ConvergenceConfig> {
        ConvergenceConfig::new(
            parse_size(&self.size)?,
            self.min_quality,
            self.shrink_step,
            self.min_scale,
        )
    }

    /// Output naming and overwrite policy
    pub fn output_policy(&self) -> OutputPolicy {
        OutputPolicy {
            suffix: self.suffix.clone(),
            output_dir: self.output_dir.clone(),
            overwrite: self.overwrite,
        }
    }
}

/// Orchestrates batch shrinking with progress tracking
pub struct FileProcessor {
    cli: Cli,
    encoder: Box<dyn Encoder>,
    confirm: Box<dyn Confirm>,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let encoder = cli.encoder.build();
        let confirm: Box<dyn Confirm> = if cli.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalConfirm)
        };
        Self::with_parts(cli, encoder, confirm)
    }

    /// Create a processor with explicit encoder and confirmation capabilities
    pub fn with_parts(cli: Cli, encoder: Box<dyn Encoder>, confirm: Box<dyn Confirm>) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            encoder,
            confirm,
            progress_manager,
        }
    }

    /// Process all oversized images according to CLI arguments
    ///
    /// Configuration and environment problems abort before any file is touched.
    /// Per-file failures are reported and recorded in the summary; the batch goes on.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An option is invalid or a directory does not exist
    /// - The encoder is unavailable
    /// - Scanning, confirmation or the scratch directory fails
    pub fn process(&mut self) -> Result<BatchSummary> {
        let config = self.cli.convergence_config()?;
        validate_directories(&self.cli.directories)?;
        self.encoder.check_available()?;

        let policy = self.cli.output_policy();
        let scan = scan_directories(
            &self.cli.directories,
            config.max_bytes(),
            self.cli.recursive,
        )?;
        for error in &scan.unreadable {
            self.report_error(&format!("Skipping: {error}"));
        }
        let sources = scan.images;
        let claimed_by = policy.conflicts(sources.iter().map(|source| source.path.as_path()));

        if sources.is_empty() {
            self.report(&format!(
                "No images at or above {} found",
                format_size(config.max_bytes())
            ));
            return Ok(BatchSummary::default());
        }

        if self.cli.dry_run {
            return Ok(self.plan(&sources, &claimed_by, &policy));
        }

        let prompt = format!(
            "Shrink {} image(s) to under {} using the {} encoder?",
            sources.len(),
            format_size(config.max_bytes()),
            self.encoder.name()
        );
        if !self.confirm.confirm(&prompt)? {
            self.report("Cancelled");
            return Ok(BatchSummary {
                files: Vec::new(),
                cancelled: true,
            });
        }

        let scratch = tempfile::Builder::new()
            .prefix("shrinkfit-")
            .tempdir()
            .map_err(|e| file_system(std::env::temp_dir(), "create scratch directory", e))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(sources.len());
        }

        let mut summary = BatchSummary::default();
        for (index, (source, claimed)) in sources.iter().zip(claimed_by).enumerate() {
            let outcome = match claimed {
                Some(first) => self.conflict(index, source, &policy, first),
                None => self.process_file(index, source, &config, &policy, scratch.path())?,
            };
            summary.files.push(FileReport {
                source: source.path.clone(),
                original_size: source.size,
                outcome,
            });
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        self.report(&summary.to_string());

        Ok(summary)
    }

    fn plan(
        &self,
        sources: &[SourceImage],
        claimed_by: &[Option<PathBuf>],
        policy: &OutputPolicy,
    ) -> BatchSummary {
        let files = sources
            .iter()
            .zip(claimed_by)
            .map(|(source, claimed)| {
                let output = policy.output_path(&source.path);
                let outcome = match claimed {
                    Some(first) => FileOutcome::Conflict {
                        output,
                        claimed_by: first.clone(),
                    },
                    None if policy.should_skip(&source.path) => {
                        FileOutcome::AlreadyExists { output }
                    }
                    None => FileOutcome::Planned { output },
                };
                self.report(&describe_plan(source, &outcome));
                FileReport {
                    source: source.path.clone(),
                    original_size: source.size,
                    outcome,
                }
            })
            .collect();

        BatchSummary {
            files,
            cancelled: false,
        }
    }

    fn process_file(
        &mut self,
        index: usize,
        source: &SourceImage,
        config: &ConvergenceConfig,
        policy: &OutputPolicy,
        scratch_dir: &Path,
    ) -> Result<FileOutcome> {
        let output = policy.output_path(&source.path);

        if policy.should_skip(&source.path) {
            self.report(&format!(
                "Skipping: {} (output exists)",
                source.path.display()
            ));
            let outcome = FileOutcome::AlreadyExists { output };
            self.complete(index, &outcome);
            return Ok(outcome);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, &source.path, config.attempt_budget());
        }

        let candidate = candidate_path(scratch_dir, &source.path);
        let verbose = self.cli.verbose;
        let mut measured = 0;
        let result = converge(
            self.encoder.as_mut(),
            &source.path,
            &candidate,
            config,
            |attempt| {
                measured = attempt.number;
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_attempt(index, attempt);
                    if verbose {
                        pm.println(&format!(
                            "  {} #{}: {} -> {}",
                            source.path.display(),
                            attempt.number,
                            attempt.parameters,
                            format_size(attempt.size)
                        ));
                    }
                }
            },
        );

        let outcome = match result {
            Ok(Convergence::Success {
                parameters,
                size,
                attempts,
            }) => match promote(&candidate, &output) {
                Ok(()) => {
                    self.report(&format!(
                        "Shrunk {}: {} -> {} ({parameters}, {attempts} attempts)",
                        source.path.display(),
                        format_size(source.size),
                        format_size(size)
                    ));
                    FileOutcome::Shrunk {
                        output,
                        parameters,
                        size,
                        attempts,
                    }
                }
                Err(error) => {
                    self.report_error(&format!("Error: {error}"));
                    FileOutcome::Failed {
                        reason: error.to_string(),
                        attempts,
                    }
                }
            },
            Ok(Convergence::Exhausted { attempts, smallest }) => {
                self.report_error(&format!(
                    "Could not shrink {} under {} (smallest {} after {attempts} attempts)",
                    source.path.display(),
                    format_size(config.max_bytes()),
                    format_size(smallest)
                ));
                FileOutcome::Exhausted { attempts, smallest }
            }
            Err(error) if error.is_per_file() => {
                self.report_error(&format!("Error: {error}"));
                FileOutcome::Failed {
                    reason: error.to_string(),
                    attempts: measured + 1,
                }
            }
            Err(error) => {
                self.discard_candidate(&candidate);
                return Err(error);
            }
        };

        if !matches!(outcome, FileOutcome::Shrunk { .. }) {
            self.discard_candidate(&candidate);
        }
        self.complete(index, &outcome);

        Ok(outcome)
    }

    fn conflict(
        &mut self,
        index: usize,
        source: &SourceImage,
        policy: &OutputPolicy,
        claimed_by: PathBuf,
    ) -> FileOutcome {
        let output = policy.output_path(&source.path);
        self.report_error(&format!(
            "Skipping {}: {} is already the output of {}",
            source.path.display(),
            output.display(),
            claimed_by.display()
        ));
        let outcome = FileOutcome::Conflict { output, claimed_by };
        self.complete(index, &outcome);
        outcome
    }

    // A leftover candidate only wastes scratch space; the file's outcome stands
    fn discard_candidate(&self, candidate: &Path) {
        if let Err(error) = discard(candidate) {
            self.report_error(&format!("Warning: {error}"));
        }
    }

    fn complete(&mut self, index: usize, outcome: &FileOutcome) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, outcome.marker());
        }
    }

    fn report(&self, message: &str) {
        if let Some(ref pm) = self.progress_manager {
            pm.println(message);
        }
    }

    // Errors are shown even in quiet mode
    #[allow(clippy::print_stderr)]
    fn report_error(&self, message: &str) {
        match self.progress_manager {
            Some(ref pm) => pm.println(message),
            None => eprintln!("{message}"),
        }
    }
}

fn describe_plan(source: &SourceImage, outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::AlreadyExists { output } => format!(
            "Would skip {} ({}): {} exists",
            source.path.display(),
            format_size(source.size),
            output.display()
        ),
        FileOutcome::Planned { output } => format!(
            "Would shrink {} ({}) -> {}",
            source.path.display(),
            format_size(source.size),
            output.display()
        ),
        FileOutcome::Conflict { output, claimed_by } => format!(
            "Would skip {}: {} is already the output of {}",
            source.path.display(),
            output.display(),
            claimed_by.display()
        ),
        _ => source.path.display().to_string(),
    }
}
