//! Image conversion pipeline
//!
//! Every endpoint runs the same stages:
//! - Validate the declared filename against an extension allow-list
//! - Decode the bytes (format detected from content)
//! - Transform: pass through, force RGB, or stretch-resize
//! - Encode to JPEG or PNG in memory
//!
//! Stages return `ImageError` instead of panicking; the server decides how
//! each error is reported.

pub mod config;
pub mod encoder;
pub mod error;
pub mod limits;
pub mod metrics;
pub mod model;
pub mod params;
pub mod processor;
pub mod transform;
pub mod validation;

pub use config::ImageConfig;
pub use encoder::{EncoderFactory, ImageEncoder, JpegEncoder, PngEncoder};
pub use error::ImageError;
pub use limits::{validate_dimensions, ImageLimits};
pub use metrics::{export_prometheus, PipelineMetrics};
pub use model::{ColorMode, DecodedImage, EncodedOutput, ImageData, UploadedFile};
pub use params::{AlphaFlatten, OutputFormat, ResizeFilter, ResizeParams};
pub use processor::{decode, Pipeline};
pub use transform::{resize_exact, to_rgb, Transform};
pub use validation::AcceptedExtensions;
