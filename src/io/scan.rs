//! Directory scanning for images that are not already under the size ceiling

use crate::io::configuration::RECOGNIZED_EXTENSIONS;
use crate::io::error::{Result, ShrinkError, file_system};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A source image selected for shrinking
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceImage {
    /// Location of the image
    pub path: PathBuf,
    /// Size in bytes at scan time
    pub size: u64,
}

/// Whether the path carries one of the recognized image extensions
pub fn is_recognized_image(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

/// Confirm every directory exists before anything is scanned
///
/// # Errors
///
/// Returns [`ShrinkError::DirectoryNotFound`] for the first missing directory
pub fn validate_directories(directories: &[PathBuf]) -> Result<()> {
    directories
        .iter()
        .find(|directory| !directory.is_dir())
        .map_or(Ok(()), |missing| {
            Err(ShrinkError::DirectoryNotFound {
                path: missing.clone(),
            })
        })
}

/// Images selected by a scan, plus entries that could not be inspected
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Selected sources, sorted by path, each listed once
    pub images: Vec<SourceImage>,
    /// Broken symlinks, symlink loops and unreadable entries that were skipped
    pub unreadable: Vec<ShrinkError>,
}

/// Collect recognized images whose size is at or above `max_bytes`
///
/// Files are returned sorted by path, each at most once even when directories
/// overlap. Subdirectories are only entered when `recursive` is set. Symlinks are
/// followed; entries that cannot be inspected are skipped and listed in
/// [`ScanReport::unreadable`] instead of failing the scan.
///
/// # Errors
///
/// Returns [`ShrinkError::DirectoryNotFound`] if a directory is missing
pub fn scan_directories(
    directories: &[PathBuf],
    max_bytes: u64,
    recursive: bool,
) -> Result<ScanReport> {
    validate_directories(directories)?;

    let mut found = BTreeSet::new();
    let mut unreadable = Vec::new();
    for directory in directories {
        let walker = WalkDir::new(directory).min_depth(1).follow_links(true);
        let walker = if recursive {
            walker
        } else {
            walker.max_depth(1)
        };

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    unreadable.push(walk_error(directory, error));
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_recognized_image(entry.path()) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(error) => {
                    unreadable.push(walk_error(directory, error));
                    continue;
                }
            };
            if size >= max_bytes {
                let path = std::fs::canonicalize(entry.path())
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                found.insert(SourceImage { path, size });
            }
        }
    }

    Ok(ScanReport {
        images: found.into_iter().collect(),
        unreadable,
    })
}

fn walk_error(directory: &Path, error: walkdir::Error) -> ShrinkError {
    let path = error
        .path()
        .map_or_else(|| directory.to_path_buf(), Path::to_path_buf);
    file_system(path, "scan entry", std::io::Error::from(error))
}
