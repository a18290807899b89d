// Constants module - centralized default values for configuration
//
// Every default the config layer falls back to lives here so the YAML
// defaults, the CLI and the tests agree on a single value.

// =============================================================================
// Server defaults
// =============================================================================

/// Default listen address (all interfaces)
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default maximum multipart upload size (50 MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

// =============================================================================
// Image defaults
// =============================================================================

/// Default JPEG quality, matching the common codec default of 75
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Default maximum width or height of a decoded or requested image
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Default maximum total pixels (100 megapixels)
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

// =============================================================================
// Response defaults
// =============================================================================

/// Attachment name stem for the three conversion endpoints
pub const CONVERTED_FILENAME_STEM: &str = "converted_image";

/// Attachment name stem for the resize endpoint
///
/// JPEG output is named `resized_image.jpg`, matching the conversion
/// endpoints, rather than the `resized_image.jpeg` that naming after the
/// lowercased codec name would give.
pub const RESIZED_FILENAME_STEM: &str = "resized_image";
