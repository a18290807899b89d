//! Image pipeline error types
//!
//! Every decode, transform and encode step returns one of these instead of
//! panicking, so the HTTP layer can decide deliberately how each failure is
//! reported.

use thiserror::Error;

/// Errors that can occur while converting or resizing an uploaded image
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    // === Decoding Errors ===
    /// The byte stream is not in any format the codec library recognises
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },
    /// The byte stream was recognised but could not be decoded
    #[error("Failed to decode image: {message}")]
    DecodeFailed { message: String },

    // === Processing Errors ===
    /// Resize operation failed
    #[error("Resize failed: {message}")]
    ResizeFailed { message: String },
    /// The target format cannot represent the image's color mode
    #[error("Cannot encode {mode} image as {format}")]
    UnsupportedColorMode { format: String, mode: String },
    /// Encoding to output format failed
    #[error("Failed to encode to {format}: {message}")]
    EncodeFailed { format: String, message: String },

    // === Safety Limits ===
    /// Image dimensions exceed safety limits (image bomb protection)
    #[error("Image dimensions {width}x{height} ({pixels} pixels) exceed limit of {max_pixels} pixels")]
    ImageBombDetected {
        width: u32,
        height: u32,
        pixels: u64,
        max_pixels: u64,
    },

    // === Parameter Errors ===
    /// A form parameter is missing or malformed
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },
    /// Requested dimensions are invalid
    #[error("Invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },
}

impl ImageError {
    /// Maps image errors to HTTP status codes
    ///
    /// Status mapping:
    /// - UnsupportedFormat → 415 (Unsupported Media Type)
    /// - DecodeFailed, ImageBombDetected, InvalidParameter, InvalidDimensions → 400
    /// - UnsupportedColorMode → 422 (Unprocessable Entity)
    /// - ResizeFailed, EncodeFailed → 500 (Internal Server Error)
    pub fn to_http_status(&self) -> u16 {
        match self {
            ImageError::UnsupportedFormat { .. } => 415,

            ImageError::DecodeFailed { .. }
            | ImageError::ImageBombDetected { .. }
            | ImageError::InvalidParameter { .. }
            | ImageError::InvalidDimensions { .. } => 400,

            ImageError::UnsupportedColorMode { .. } => 422,

            ImageError::ResizeFailed { .. } | ImageError::EncodeFailed { .. } => 500,
        }
    }

    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ImageError::UnsupportedFormat { .. } => "unsupported_format",
            ImageError::DecodeFailed { .. } => "decode_failed",
            ImageError::ResizeFailed { .. } => "resize_failed",
            ImageError::UnsupportedColorMode { .. } => "unsupported_color_mode",
            ImageError::EncodeFailed { .. } => "encode_failed",
            ImageError::ImageBombDetected { .. } => "image_bomb",
            ImageError::InvalidParameter { .. } => "invalid_parameter",
            ImageError::InvalidDimensions { .. } => "invalid_dimensions",
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        ImageError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        ImageError::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        ImageError::ResizeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn image_bomb(width: u32, height: u32, max_pixels: u64) -> Self {
        ImageError::ImageBombDetected {
            width,
            height,
            pixels: width as u64 * height as u64,
            max_pixels,
        }
    }
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => ImageError::unsupported_format(e.to_string()),
            other => ImageError::decode_failed(other.to_string()),
        }
    }
}
