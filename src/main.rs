//! CLI entry point for shrinking oversized images

use clap::Parser;
use shrinkfit::io::cli::{Cli, FileProcessor};
use shrinkfit::io::summary::BatchSummary;
use std::process::ExitCode;

// Errors are rendered with Display rather than the Debug output of `Result` from main
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    match processor.process().and_then(BatchSummary::into_result) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
