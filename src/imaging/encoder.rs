//! Image encoder abstraction
//!
//! Each output format has one encoder behind the `ImageEncoder` trait so the
//! pipeline can pick one by `OutputFormat` without knowing codec details.
//! Encoding happens fully in memory.

use std::io::Cursor;

use image::{ColorType, DynamicImage, ImageEncoder as _};

use super::error::ImageError;
use super::model::DecodedImage;
use super::params::OutputFormat;

/// Trait for image encoders
pub trait ImageEncoder: Send + Sync {
    /// Encode a decoded image to the target format
    ///
    /// The image is written as-is; color-mode conversion is the transform
    /// stage's job. Encoders reject layouts their format cannot store.
    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>, ImageError>;
}

/// Baseline JPEG encoder
pub struct JpegEncoder {
    quality: u8,
}

impl JpegEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl ImageEncoder for JpegEncoder {
    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>, ImageError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;

        let mode = image.color_mode();
        if mode.has_alpha() {
            // JPEG has no alpha channel; callers that want JPEG from an
            // alpha image must flatten first.
            return Err(ImageError::UnsupportedColorMode {
                format: "jpeg".to_string(),
                mode: mode.to_string(),
            });
        }

        let img = image.as_dynamic();
        let narrowed;
        let img = match img.color() {
            ColorType::L8 | ColorType::Rgb8 => img,
            ColorType::L16 => {
                narrowed = DynamicImage::ImageLuma8(img.to_luma8());
                &narrowed
            }
            _ => {
                narrowed = DynamicImage::ImageRgb8(img.to_rgb8());
                &narrowed
            }
        };

        let mut output = Cursor::new(Vec::new());
        ImageJpegEncoder::new_with_quality(&mut output, self.quality)
            .write_image(img.as_bytes(), img.width(), img.height(), img.color())
            .map_err(|e| ImageError::encode_failed("jpeg", e.to_string()))?;

        Ok(output.into_inner())
    }
}

/// Lossless PNG encoder
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>, ImageError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;

        let img = image.as_dynamic();
        let narrowed;
        let img = match img.color() {
            ColorType::Rgb32F => {
                narrowed = DynamicImage::ImageRgb16(img.to_rgb16());
                &narrowed
            }
            ColorType::Rgba32F => {
                narrowed = DynamicImage::ImageRgba16(img.to_rgba16());
                &narrowed
            }
            _ => img,
        };

        let mut output = Cursor::new(Vec::new());
        ImagePngEncoder::new(&mut output)
            .write_image(img.as_bytes(), img.width(), img.height(), img.color())
            .map_err(|e| ImageError::encode_failed("png", e.to_string()))?;

        Ok(output.into_inner())
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder for the specified output format
    pub fn create(format: OutputFormat, jpeg_quality: u8) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder::new(jpeg_quality)),
            OutputFormat::Png => Box::new(PngEncoder),
        }
    }
}
