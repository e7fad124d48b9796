//! Tests for output naming, promotion and candidate cleanup

#[cfg(test)]
mod tests {
    use shrinkfit::io::output::{OutputPolicy, candidate_path, discard, promote};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn policy(output_dir: Option<PathBuf>, overwrite: bool) -> OutputPolicy {
        OutputPolicy {
            suffix: "_small".to_string(),
            output_dir,
            overwrite,
        }
    }

    // Tests outputs sit next to the source with suffix and jpg extension
    // Verified by keeping the source extension
    #[test]
    fn test_output_path_next_to_source() {
        let output = policy(None, false).output_path(Path::new("/photos/holiday.png"));
        assert_eq!(output, PathBuf::from("/photos/holiday_small.jpg"));
    }

    // Tests an output directory replaces the source directory
    // Verified by ignoring the output directory
    #[test]
    fn test_output_path_in_output_dir() {
        let output = policy(Some(PathBuf::from("/out")), false).output_path(Path::new("/photos/a.b.tiff"));
        assert_eq!(output, PathBuf::from("/out/a.b_small.jpg"));
    }

    // Tests sources sharing a stem are flagged against the first one to claim the output
    // Verified by letting the last source win the output name
    #[test]
    fn test_conflicting_outputs() {
        let sources = [
            Path::new("/photos/a.gif"),
            Path::new("/photos/a.png"),
            Path::new("/photos/b.png"),
            Path::new("/other/a.png"),
        ];

        let next_to_source = policy(None, false).conflicts(sources);
        assert_eq!(
            next_to_source,
            vec![None, Some(PathBuf::from("/photos/a.gif")), None, None]
        );

        // A shared output directory also merges sources from different directories
        let shared = policy(Some(PathBuf::from("/out")), true).conflicts(sources);
        assert_eq!(shared[3], Some(PathBuf::from("/photos/a.gif")));
    }

    // Tests skip decisions depend on existence and the overwrite flag
    // Verified by inverting the overwrite check
    #[test]
    fn test_should_skip() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("cat.png");
        fs::write(&source, b"src").unwrap();

        assert!(!policy(None, false).should_skip(&source));

        fs::write(dir.path().join("cat_small.jpg"), b"old").unwrap();
        assert!(policy(None, false).should_skip(&source));
        assert!(!policy(None, true).should_skip(&source));
    }

    // Tests sources sharing a stem get distinct candidates
    // Verified by deriving the candidate from the stem only
    #[test]
    fn test_candidate_paths_unique_per_source() {
        let scratch = Path::new("/scratch");
        let png = candidate_path(scratch, Path::new("/a/img.png"));
        let gif = candidate_path(scratch, Path::new("/a/img.gif"));

        assert_ne!(png, gif);
        assert!(png.starts_with(scratch));
        assert_eq!(png.extension().and_then(|e| e.to_str()), Some("jpg"));
    }

    // Tests promotion moves the candidate and creates missing directories
    // Verified by copying without removing the candidate
    #[test]
    fn test_promote_moves_candidate() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("c.jpg");
        fs::write(&candidate, b"jpeg").unwrap();
        let destination = dir.path().join("out/nested/final.jpg");

        promote(&candidate, &destination).unwrap();

        assert!(!candidate.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"jpeg");
    }

    // Tests promotion replaces an existing output
    // Verified by refusing to replace existing files
    #[test]
    fn test_promote_overwrites() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("c.jpg");
        let destination = dir.path().join("final.jpg");
        fs::write(&candidate, b"new").unwrap();
        fs::write(&destination, b"old").unwrap();

        promote(&candidate, &destination).unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"new");
    }

    // Tests discarding tolerates a candidate that was never written
    // Verified by propagating NotFound
    #[test]
    fn test_discard() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("c.jpg");

        assert!(discard(&candidate).is_ok());

        fs::write(&candidate, b"x").unwrap();
        discard(&candidate).unwrap();
        assert!(!candidate.exists());
    }
}
