//! Tests for the ImageMagick command construction and availability checks

#[cfg(test)]
mod tests {
    use shrinkfit::ShrinkError;
    use shrinkfit::convergence::EncodeParameters;
    use shrinkfit::encoder::Encoder;
    use shrinkfit::encoder::magick::{MagickEncoder, magick_args};
    use std::ffi::OsString;
    use std::path::Path;

    fn args(quality: u8, scale: u8) -> Vec<String> {
        magick_args(
            Path::new("in.png"),
            EncodeParameters { quality, scale },
            Path::new("/tmp/out.jpg"),
        )
        .into_iter()
        .map(|arg: OsString| arg.to_string_lossy().into_owned())
        .collect()
    }

    // Tests a full-scale attempt sets quality without resizing
    // Verified by always emitting -resize
    #[test]
    fn test_full_scale_args() {
        let args = args(85, 100);

        assert_eq!(args.first().map(String::as_str), Some("in.png"));
        assert!(!args.iter().any(|arg| arg == "-resize"));
        assert!(args.windows(2).any(|w| w[0] == "-quality" && w[1] == "85"));
        assert_eq!(args.last().map(String::as_str), Some("jpg:/tmp/out.jpg"));
    }

    // Tests a downscaled attempt passes the percentage to -resize
    // Verified by formatting scale without the percent sign
    #[test]
    fn test_scaled_args() {
        let args = args(60, 35);

        assert!(args.windows(2).any(|w| w[0] == "-resize" && w[1] == "35%"));
        assert!(args.windows(2).any(|w| w[0] == "-alpha" && w[1] == "remove"));
    }

    // Tests a missing program is reported as an unavailable encoder
    // Verified by treating spawn failures as available
    #[test]
    fn test_missing_program_unavailable() {
        let encoder = MagickEncoder::with_program("shrinkfit-no-such-program");

        match encoder.check_available() {
            Err(ShrinkError::EncoderUnavailable { encoder, reason }) => {
                assert_eq!(encoder, "magick");
                assert!(reason.contains("shrinkfit-no-such-program"));
            }
            other => unreachable!("expected EncoderUnavailable, got {other:?}"),
        }
    }

    // Tests encoding through a missing program fails instead of succeeding silently
    // Verified by ignoring the spawn error
    #[test]
    fn test_encode_with_missing_program_fails() {
        let mut encoder = MagickEncoder::with_program("shrinkfit-no-such-program");

        let result = encoder.encode(
            Path::new("in.png"),
            EncodeParameters::full_quality(),
            Path::new("out.jpg"),
        );

        assert!(matches!(result, Err(ShrinkError::Encode { .. })));
        assert_eq!(encoder.name(), "magick");
    }
}
