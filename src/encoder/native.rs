//! JPEG re-encoding with transparency flattening and Lanczos downscaling

use crate::convergence::parameters::EncodeParameters;
use crate::encoder::Encoder;
use crate::io::configuration::{FLATTEN_BACKGROUND, FULL_SCALE};
use crate::io::error::{Result, ShrinkError, file_system};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Encoder running entirely in-process
///
/// The decoded source is kept between attempts on the same path, so a search
/// decodes each file once no matter how many attempts it takes.
#[derive(Default)]
pub struct NativeEncoder {
    cached: Option<(PathBuf, RgbImage)>,
}

impl NativeEncoder {
    /// Create an encoder with an empty decode cache
    pub const fn new() -> Self {
        Self { cached: None }
    }

    fn source_pixels(&mut self, source: &Path) -> Result<&RgbImage> {
        let entry = match self.cached.take() {
            Some(entry) if entry.0.as_path() == source => entry,
            _ => (source.to_path_buf(), flatten(&load_image(source)?)),
        };
        let (_, pixels) = self.cached.insert(entry);
        Ok(pixels)
    }
}

impl Encoder for NativeEncoder {
    fn name(&self) -> &'static str {
        "native"
    }

    fn check_available(&self) -> Result<()> {
        Ok(())
    }

    fn encode(
        &mut self,
        source: &Path,
        parameters: EncodeParameters,
        candidate: &Path,
    ) -> Result<()> {
        let pixels = self.source_pixels(source)?;
        let scaled;
        let frame = if parameters.is_full_scale() {
            pixels
        } else {
            let (width, height) =
                scaled_dimensions(pixels.width(), pixels.height(), parameters.scale);
            scaled = image::imageops::resize(pixels, width, height, FilterType::Lanczos3);
            &scaled
        };

        let file =
            File::create(candidate).map_err(|e| file_system(candidate, "create candidate", e))?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, parameters.quality)
            .encode_image(frame)
            .map_err(|e| ShrinkError::ImageExport {
                path: candidate.to_path_buf(),
                source: e,
            })?;
        writer
            .flush()
            .map_err(|e| file_system(candidate, "write candidate", e))
    }
}

/// Decode an image, guessing the format from its content
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| file_system(path, "open image", e))?
        .with_guessed_format()
        .map_err(|e| file_system(path, "detect image format", e))?
        .decode()
        .map_err(|e| ShrinkError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Composite the image over the flatten background, dropping alpha
pub fn flatten(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let [bg_r, bg_g, bg_b] = FLATTEN_BACKGROUND;
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |fg: u8, bg: u8| -> u8 {
            ((u16::from(fg) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        image::Rgb([blend(r, bg_r), blend(g, bg_g), blend(b, bg_b)])
    })
}

/// Dimensions after applying a scale percentage, never below one pixel per side
pub fn scaled_dimensions(width: u32, height: u32, scale: u8) -> (u32, u32) {
    let apply = |side: u32| -> u32 {
        let scaled = u64::from(side) * u64::from(scale) / u64::from(FULL_SCALE);
        (scaled as u32).max(1)
    };
    (apply(width), apply(height))
}
