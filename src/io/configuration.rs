//! Search constants and runtime configuration defaults

// Quality scale shared by every encoder
/// Highest encoder quality, where the search starts
pub const MAX_QUALITY: u8 = 100;
/// Scale percentage meaning "no downscaling"
pub const FULL_SCALE: u8 = 100;

// Default values for configurable parameters
/// Default size ceiling when none is given
pub const DEFAULT_MAX_SIZE: &str = "500K";
/// Lowest quality tried before the search switches to downscaling
pub const DEFAULT_MIN_QUALITY: u8 = 80;
/// Percentage removed from the dimensions at each downscale attempt
pub const DEFAULT_SHRINK_STEP: u8 = 10;

// Prevents the downscale phase from running forever on incompressible sources
/// Smallest scale percentage the downscale phase may reach
pub const DEFAULT_MIN_SCALE: u8 = 1;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_small";
/// Extension of every produced file
pub const OUTPUT_EXTENSION: &str = "jpg";
/// Suffix for in-flight candidate files in the scratch directory
pub const CANDIDATE_SUFFIX: &str = ".candidate";

/// Source extensions picked up by the directory scanner (compared case-insensitively)
pub const RECOGNIZED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

// Background used when flattening transparency for JPEG output
/// RGB fill behind transparent pixels
pub const FLATTEN_BACKGROUND: [u8; 3] = [255, 255, 255];

// External encoder lookup, newest ImageMagick entry point first
/// Program names tried for the ImageMagick encoder
pub const MAGICK_PROGRAMS: &[&str] = &["magick", "convert"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
