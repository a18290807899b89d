//! Image bomb protection
//!
//! Source images (from their header) and resize targets are checked against
//! per-side and total-pixel limits before any pixel buffer of that size is
//! allocated.

use super::config::ImageConfig;
use super::error::ImageError;

/// Size limits applied to decoded images and resize targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    /// Maximum width or height
    pub max_dimension: u32,
    /// Maximum total pixels (width * height)
    pub max_pixels: u64,
}

impl ImageLimits {
    pub fn from_config(config: &ImageConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            max_pixels: config.max_pixels,
        }
    }
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}

/// Reject dimensions above the configured limits
pub fn validate_dimensions(width: u32, height: u32, limits: &ImageLimits) -> Result<(), ImageError> {
    let pixels = width as u64 * height as u64;

    if width > limits.max_dimension || height > limits.max_dimension || pixels > limits.max_pixels
    {
        return Err(ImageError::image_bomb(width, height, limits.max_pixels));
    }

    Ok(())
}
