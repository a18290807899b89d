//! Request-scoped image values
//!
//! One upload moves through these in order: `UploadedFile` → `ImageData`
//! → `DecodedImage` → `EncodedOutput`. Nothing here outlives the request.

use std::fmt;

use bytes::Bytes;
use image::{ColorType, DynamicImage};

use super::params::OutputFormat;

/// Raw upload as received from the multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-declared filename (validation input only)
    pub filename: Option<String>,
    /// Untouched file bytes
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: Option<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename,
            data: data.into(),
        }
    }
}

/// Channel layout of a decoded pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Grayscale
    L,
    /// Grayscale with alpha
    La,
    Rgb,
    Rgba,
    /// 16-bit or floating point layouts
    Other(ColorType),
}

impl ColorMode {
    pub fn has_alpha(&self) -> bool {
        match self {
            ColorMode::La | ColorMode::Rgba => true,
            ColorMode::L | ColorMode::Rgb => false,
            ColorMode::Other(color) => color.has_alpha(),
        }
    }
}

impl From<ColorType> for ColorMode {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 => ColorMode::L,
            ColorType::La8 => ColorMode::La,
            ColorType::Rgb8 => ColorMode::Rgb,
            ColorType::Rgba8 => ColorMode::Rgba,
            other => ColorMode::Other(other),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::L => write!(f, "L"),
            ColorMode::La => write!(f, "LA"),
            ColorMode::Rgb => write!(f, "RGB"),
            ColorMode::Rgba => write!(f, "RGBA"),
            ColorMode::Other(color) => write!(f, "{:?}", color),
        }
    }
}

/// In-memory pixel image produced by the decoder
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn color_mode(&self) -> ColorMode {
        self.image.color().into()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// Pipeline input: either still-compressed bytes or an already decoded image
#[derive(Debug, Clone)]
pub enum ImageData {
    Raw(Bytes),
    Decoded(DecodedImage),
}

impl ImageData {
    /// Size of the payload in bytes, or of the pixel buffer once decoded
    pub fn len(&self) -> usize {
        match self {
            ImageData::Raw(bytes) => bytes.len(),
            ImageData::Decoded(img) => img.as_dynamic().as_bytes().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<UploadedFile> for ImageData {
    fn from(file: UploadedFile) -> Self {
        ImageData::Raw(file.data)
    }
}

/// Encoded result ready to be sent back as an attachment
#[derive(Debug, Clone)]
pub struct EncodedOutput {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    /// Attachment filename, e.g. `converted_image.jpg`
    pub filename: String,
}

impl EncodedOutput {
    pub fn new(data: Vec<u8>, format: OutputFormat, stem: &str) -> Self {
        Self {
            data,
            format,
            filename: format!("{}.{}", stem, format.extension()),
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
