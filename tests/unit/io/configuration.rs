//! Tests for default configuration values

#[cfg(test)]
mod tests {
    use shrinkfit::convergence::ConvergenceConfig;
    use shrinkfit::io::configuration::{
        DEFAULT_MAX_SIZE, DEFAULT_MIN_QUALITY, DEFAULT_MIN_SCALE, DEFAULT_SHRINK_STEP,
        OUTPUT_EXTENSION, OUTPUT_SUFFIX, RECOGNIZED_EXTENSIONS,
    };
    use shrinkfit::io::size::parse_size;

    // Tests the defaults form a valid configuration
    // Verified by setting the default step to 100
    #[test]
    fn test_defaults_are_valid() {
        let max_bytes = parse_size(DEFAULT_MAX_SIZE).unwrap();
        let config = ConvergenceConfig::new(
            max_bytes,
            DEFAULT_MIN_QUALITY,
            DEFAULT_SHRINK_STEP,
            DEFAULT_MIN_SCALE,
        );

        assert!(config.is_ok());
    }

    // Tests outputs cannot be mistaken for their sources
    // Verified by using an empty suffix
    #[test]
    fn test_output_naming_constants() {
        assert!(!OUTPUT_SUFFIX.is_empty());
        assert_eq!(OUTPUT_EXTENSION, "jpg");
        assert!(RECOGNIZED_EXTENSIONS.contains(&OUTPUT_EXTENSION));
        assert!(RECOGNIZED_EXTENSIONS.iter().all(|ext| *ext == ext.to_ascii_lowercase()));
    }
}
