//! Transformation parameter types
//!
//! Output formats, alpha flattening and resampling choices, and the
//! width/height pair the resize endpoint reads from its form fields.

use serde::{Deserialize, Serialize};

use super::error::ImageError;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Pick the re-encode format for a resized upload from its declared name
    ///
    /// `.jpg`/`.jpeg` (any case) stays JPEG; everything else becomes PNG.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            Self::Jpeg
        } else {
            Self::Png
        }
    }
}


/// How alpha is removed when an image is forced to 3-channel RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaFlatten {
    /// Keep the color channels as stored and drop alpha
    #[default]
    Discard,
    /// Composite over opaque white
    White,
    /// Composite over opaque black
    Black,
}

impl AlphaFlatten {
    /// Background color to composite over, if any
    pub fn background(&self) -> Option<[u8; 3]> {
        match self {
            AlphaFlatten::Discard => None,
            AlphaFlatten::White => Some([255, 255, 255]),
            AlphaFlatten::Black => Some([0, 0, 0]),
        }
    }
}


/// Resampling filter used by the resize transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    /// Bicubic (Catmull-Rom)
    #[default]
    CatmullRom,
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_resize_alg(self) -> fast_image_resize::ResizeAlg {
        use fast_image_resize::{FilterType, ResizeAlg};

        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}


/// Target size for the resize endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

impl ResizeParams {
    /// Parse the `width` and `height` form fields
    ///
    /// Both fields are required and must be positive integers. Aspect ratio
    /// is not checked: any W×H pair is a valid stretch target.
    pub fn from_form(width: Option<&str>, height: Option<&str>) -> Result<Self, ImageError> {
        let width = parse_dimension("width", width)?;
        let height = parse_dimension("height", height)?;

        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be greater than zero".to_string(),
            });
        }

        Ok(Self { width, height })
    }
}

fn parse_dimension(param: &str, value: Option<&str>) -> Result<u32, ImageError> {
    let value = value.ok_or_else(|| ImageError::invalid_param(param, "field required"))?;
    value.trim().parse::<u32>().map_err(|_| {
        ImageError::invalid_param(param, format!("value is not a valid integer: {:?}", value))
    })
}
