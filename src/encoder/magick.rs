//! ImageMagick-backed encoder driven through its command-line interface

use crate::convergence::parameters::EncodeParameters;
use crate::encoder::Encoder;
use crate::io::configuration::MAGICK_PROGRAMS;
use crate::io::error::{Result, ShrinkError};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// Encoder that runs one ImageMagick process per attempt
///
/// The program is resolved lazily by probing `magick` and then `convert`.
#[derive(Debug, Default)]
pub struct MagickEncoder {
    program: Option<&'static str>,
}

impl MagickEncoder {
    /// Create an encoder that looks for ImageMagick on first use
    pub const fn new() -> Self {
        Self { program: None }
    }

    /// Create an encoder bound to a specific program name
    pub const fn with_program(program: &'static str) -> Self {
        Self {
            program: Some(program),
        }
    }

    fn candidates(&self) -> Vec<&'static str> {
        self.program
            .map_or_else(|| MAGICK_PROGRAMS.to_vec(), |program| vec![program])
    }

    fn resolve(&self) -> Result<&'static str> {
        let mut failures = Vec::new();
        for program in self.candidates() {
            match check_version(program) {
                Ok(()) => return Ok(program),
                Err(reason) => failures.push(format!("{program}: {reason}")),
            }
        }
        Err(ShrinkError::EncoderUnavailable {
            encoder: "magick",
            reason: failures.join("; "),
        })
    }
}

fn check_version(program: &str) -> std::result::Result<(), String> {
    let status = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| e.to_string())?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("exited with {status}"))
    }
}

/// Command-line arguments for one attempt, excluding the program name
pub fn magick_args(
    source: &Path,
    parameters: EncodeParameters,
    candidate: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![source.into()];
    if !parameters.is_full_scale() {
        args.push("-resize".into());
        args.push(format!("{}%", parameters.scale).into());
    }
    args.extend(
        [
            "-background".to_string(),
            "white".to_string(),
            "-alpha".to_string(),
            "remove".to_string(),
            "-quality".to_string(),
            parameters.quality.to_string(),
        ]
        .map(OsString::from),
    );
    // The explicit prefix keeps the output format independent of the candidate name
    let mut target = OsString::from("jpg:");
    target.push(candidate);
    args.push(target);
    args
}

impl Encoder for MagickEncoder {
    fn name(&self) -> &'static str {
        "magick"
    }

    fn check_available(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    fn encode(
        &mut self,
        source: &Path,
        parameters: EncodeParameters,
        candidate: &Path,
    ) -> Result<()> {
        let program = match self.program {
            Some(program) => program,
            None => {
                let resolved = self.resolve()?;
                self.program = Some(resolved);
                resolved
            }
        };

        let output = Command::new(program)
            .args(magick_args(source, parameters, candidate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ShrinkError::Encode {
                path: source.to_path_buf(),
                quality: parameters.quality,
                scale: parameters.scale,
                reason: format!("could not start {program}: {e}"),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ShrinkError::Encode {
                path: source.to_path_buf(),
                quality: parameters.quality,
                scale: parameters.scale,
                reason: format!("{program} exited with {}: {}", output.status, stderr.trim()),
            })
        }
    }
}
