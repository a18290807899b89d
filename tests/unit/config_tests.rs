// Configuration loading unit tests

use std::io::Write;

use imgconv::config::*;
use imgconv::imaging::{AlphaFlatten, ResizeFilter};
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(yaml.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config_from_file() {
    let file = write_config(
        r#"
server:
  address: "127.0.0.1"
  port: 9000
  max_upload_size: 2097152
  error_policy: structured
image:
  jpeg_quality: 90
  alpha_flatten: white
  resize_filter: lanczos3
  max_dimension: 8192
  max_pixels: 50000000
logging:
  level: "imgconv=debug"
  format: pretty
"#,
    );

    let config = Config::from_file(file.path()).expect("Failed to load config");

    assert_eq!(config.server.listen_address(), "127.0.0.1:9000");
    assert_eq!(config.server.max_upload_size, 2 * 1024 * 1024);
    assert_eq!(config.server.error_policy, ErrorPolicy::Structured);
    assert_eq!(config.image.jpeg_quality, 90);
    assert_eq!(config.image.alpha_flatten, AlphaFlatten::White);
    assert_eq!(config.image.resize_filter, ResizeFilter::Lanczos3);
    assert_eq!(config.image.max_dimension, 8192);
    assert_eq!(config.image.max_pixels, 50_000_000);
    assert_eq!(config.logging.level, "imgconv=debug");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = write_config("");
    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.server.listen_address(), "0.0.0.0:8000");
    assert_eq!(config.server.error_policy, ErrorPolicy::Legacy);
    assert_eq!(config.image.alpha_flatten, AlphaFlatten::Discard);
    assert_eq!(config.image.resize_filter, ResizeFilter::CatmullRom);
}

#[test]
fn test_missing_file_is_error() {
    let err = Config::from_file("/nonexistent/imgconv.yaml").unwrap_err();
    assert!(err.contains("Failed to read config file"));
}

#[test]
fn test_unknown_enum_value_is_error() {
    let file = write_config("image:\n  resize_filter: mitchell\n");
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_out_of_range_quality_loads_but_fails_validation() {
    let file = write_config("image:\n  jpeg_quality: 150\n");
    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_err());
}
