//! Yes/no confirmation asked by the batch driver before touching files

use crate::io::error::{Result, file_system};
use std::io::{BufRead, Write};

/// Capability to ask the operator for permission
pub trait Confirm {
    /// Ask `prompt`; `true` means proceed
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Always proceeds, used for `--yes`
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Asks on stderr and reads one line from stdin
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{prompt} [y/N] ")
            .and_then(|()| stderr.flush())
            .map_err(|e| file_system("<stderr>", "write prompt", e))?;

        read_answer(&mut std::io::stdin().lock())
    }
}

/// Interpret one answer line; end of input counts as "no"
///
/// # Errors
///
/// Returns an error if reading from `input` fails
pub fn read_answer(input: &mut impl BufRead) -> Result<bool> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| file_system("<stdin>", "read answer", e))?;

    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
