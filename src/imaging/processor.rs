//! Image processing implementation
//!
//! Handles the per-request pipeline: decode → limits → transform → encode

use std::io::Cursor;
use std::time::Instant;

use image::io::Reader as ImageReader;

use super::config::ImageConfig;
use super::encoder::EncoderFactory;
use super::error::ImageError;
use super::limits::{validate_dimensions, ImageLimits};
use super::metrics::PipelineMetrics;
use super::model::{DecodedImage, EncodedOutput, ImageData};
use super::params::OutputFormat;
use super::transform::Transform;

/// Decode image bytes, detecting the format from the content
///
/// The declared filename plays no part here. Header dimensions are checked
/// against `limits` before any pixel buffer is allocated.
pub fn decode(data: &[u8], limits: &ImageLimits) -> Result<DecodedImage, ImageError> {
    let format = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::decode_failed(e.to_string()))?
        .format()
        .ok_or_else(|| ImageError::unsupported_format("unrecognised image data"))?;

    let (width, height) = ImageReader::with_format(Cursor::new(data), format).into_dimensions()?;
    validate_dimensions(width, height, limits)?;

    let image = ImageReader::with_format(Cursor::new(data), format).decode()?;
    Ok(DecodedImage::new(image))
}

/// One fully-specified decode → transform → encode run
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Endpoint label for logs and metrics
    pub endpoint: &'static str,
    pub transform: Transform,
    pub target: OutputFormat,
    /// Attachment filename stem, e.g. `converted_image`
    pub filename_stem: &'static str,
    pub jpeg_quality: u8,
    pub limits: ImageLimits,
}

impl Pipeline {
    pub fn new(
        endpoint: &'static str,
        transform: Transform,
        target: OutputFormat,
        filename_stem: &'static str,
        config: &ImageConfig,
    ) -> Self {
        Self {
            endpoint,
            transform,
            target,
            filename_stem,
            jpeg_quality: config.jpeg_quality,
            limits: ImageLimits::from_config(config),
        }
    }

    /// Run the pipeline, recording the outcome in the global metrics
    pub fn run(&self, input: ImageData) -> Result<EncodedOutput, ImageError> {
        let metrics = PipelineMetrics::global();
        let timer = metrics.start_timer(self.endpoint);
        metrics.record_bytes_in(input.len());

        let result = self.execute(input);
        timer.observe_duration();

        match &result {
            Ok(output) => {
                metrics.record_success(self.endpoint);
                metrics.record_bytes_out(output.data.len());
            }
            Err(e) => metrics.record_failure(self.endpoint, e.kind()),
        }

        result
    }

    fn execute(&self, input: ImageData) -> Result<EncodedOutput, ImageError> {
        let started = Instant::now();

        let decoded = match input {
            ImageData::Raw(bytes) => decode(&bytes, &self.limits)?,
            ImageData::Decoded(image) => {
                validate_dimensions(image.width(), image.height(), &self.limits)?;
                image
            }
        };
        let (src_width, src_height) = decoded.dimensions();

        if let Transform::Resize { width, height, .. } = self.transform {
            validate_dimensions(width, height, &self.limits)?;
        }

        tracing::debug!(
            endpoint = self.endpoint,
            width = src_width,
            height = src_height,
            color_mode = %decoded.color_mode(),
            transform = self.transform.label(),
            "decoded image"
        );

        let transformed = self.transform.apply(decoded)?;
        let (out_width, out_height) = transformed.dimensions();

        let encoder = EncoderFactory::create(self.target, self.jpeg_quality);
        let data = encoder.encode(&transformed)?;

        tracing::debug!(
            endpoint = self.endpoint,
            format = self.target.as_str(),
            out_width,
            out_height,
            bytes = data.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "encoded image"
        );

        Ok(EncodedOutput::new(data, self.target, self.filename_stem))
    }
}
