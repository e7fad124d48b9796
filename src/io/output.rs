//! Output naming, candidate placement and promotion of accepted candidates

use crate::io::configuration::{CANDIDATE_SUFFIX, OUTPUT_EXTENSION};
use crate::io::error::{Result, file_system};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

/// Where accepted files go and what they are called
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPolicy {
    /// Appended to the source stem
    pub suffix: String,
    /// Target directory, or next to each source when `None`
    pub output_dir: Option<PathBuf>,
    /// Replace existing outputs instead of skipping the source
    pub overwrite: bool,
}

impl OutputPolicy {
    /// Final location for a source: stem + suffix + `.jpg`
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.{OUTPUT_EXTENSION}", stem.to_string_lossy(), self.suffix);

        match (&self.output_dir, source.parent()) {
            (Some(dir), _) => dir.join(output_name),
            (None, Some(parent)) => parent.join(output_name),
            (None, None) => PathBuf::from(output_name),
        }
    }

    /// Whether the source must be skipped because its output already exists
    pub fn should_skip(&self, source: &Path) -> bool {
        !self.overwrite && self.output_path(source).exists()
    }

    /// For each source, the earlier source in the same run that maps to the same output
    ///
    /// `a.png` and `a.gif` in one directory both become `a_small.jpg`; only the first
    /// keeps the output and the later one is reported as a conflict.
    pub fn conflicts<'a>(
        &self,
        sources: impl IntoIterator<Item = &'a Path>,
    ) -> Vec<Option<PathBuf>> {
        let mut claims: HashMap<PathBuf, &Path> = HashMap::new();
        sources
            .into_iter()
            .map(|source| match claims.entry(self.output_path(source)) {
                Entry::Occupied(first) => Some(first.get().to_path_buf()),
                Entry::Vacant(slot) => {
                    slot.insert(source);
                    None
                }
            })
            .collect()
    }
}

/// Scratch location for a source's candidate inside `scratch_dir`
///
/// The full source file name is kept so that `a.png` and `a.gif` never share a candidate.
pub fn candidate_path(scratch_dir: &Path, source: &Path) -> PathBuf {
    let name = source.file_name().unwrap_or_default().to_string_lossy();
    scratch_dir.join(format!("{name}{CANDIDATE_SUFFIX}.{OUTPUT_EXTENSION}"))
}

/// Move an accepted candidate to its final location
///
/// Falls back to copy and remove when the scratch directory lives on another filesystem.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the file cannot be moved
pub fn promote(candidate: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| file_system(parent, "create directory", e))?;
    }

    if std::fs::rename(candidate, destination).is_ok() {
        return Ok(());
    }

    std::fs::copy(candidate, destination)
        .map_err(|e| file_system(destination, "copy candidate", e))?;
    std::fs::remove_file(candidate).map_err(|e| file_system(candidate, "remove candidate", e))
}

/// Remove a leftover candidate, ignoring one that was never written
///
/// # Errors
///
/// Returns an error if an existing candidate cannot be removed
pub fn discard(candidate: &Path) -> Result<()> {
    match std::fs::remove_file(candidate) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(file_system(candidate, "remove candidate", e)),
    }
}
