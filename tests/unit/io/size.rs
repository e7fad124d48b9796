//! Tests for size string parsing and formatting

#[cfg(test)]
mod tests {
    use shrinkfit::ShrinkError;
    use shrinkfit::io::size::{format_size, parse_size};

    // Tests plain byte counts and every binary unit
    // Verified by switching units to powers of ten
    #[test]
    fn test_parse_units() {
        assert_eq!(parse_size("123456").unwrap(), 123_456);
        assert_eq!(parse_size("500K").unwrap(), 512_000);
        assert_eq!(parse_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1 << 30);
        assert_eq!(parse_size("1T").unwrap(), 1 << 40);
    }

    // Tests suffix variants and case are accepted
    // Verified by removing the trailing B handling
    #[test]
    fn test_parse_suffix_variants() {
        for input in ["800k", "800K", "800KB", "800kb", "800KiB", " 800 K "] {
            assert_eq!(parse_size(input).unwrap(), 800 * 1024, "input {input:?}");
        }
        assert_eq!(parse_size("42B").unwrap(), 42);
    }

    // Tests fractional sizes round down to whole bytes
    // Verified by rounding up instead
    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_size("1.5M").unwrap(), 1_572_864);
        assert_eq!(parse_size("0.5K").unwrap(), 512);
        assert_eq!(parse_size("1.0001K").unwrap(), 1024);
    }

    // Tests malformed, zero and overflowing sizes are configuration errors
    // Verified by defaulting unparseable input to zero
    #[test]
    fn test_parse_rejects_invalid() {
        for input in ["", "K", "abc", "12Q", "-5K", "-1.5M", "0", "0.0001", "99999999999T", "1..5M"] {
            assert!(
                matches!(
                    parse_size(input),
                    Err(ShrinkError::InvalidParameter { parameter: "size", .. })
                ),
                "input {input:?} should be rejected"
            );
        }
    }

    // Tests human-readable formatting picks the largest fitting unit
    // Verified by always formatting in bytes
    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(500 * 1024), "500.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
