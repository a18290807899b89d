use serde::{Deserialize, Serialize};

use super::params::{AlphaFlatten, ResizeFilter};
use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_PIXELS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Quality used for every JPEG encode (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// How alpha is removed when converting to JPEG
    #[serde(default)]
    pub alpha_flatten: AlphaFlatten,

    /// Resampling filter for the resize endpoint
    #[serde(default)]
    pub resize_filter: ResizeFilter,

    /// Maximum width or height accepted for decoded and requested images
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Maximum total pixels accepted for decoded and requested images
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            alpha_flatten: AlphaFlatten::default(),
            resize_filter: ResizeFilter::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_max_pixels() -> u64 {
    DEFAULT_MAX_PIXELS
}
