//! Server configuration types.
//!
//! This module defines the server-level configuration including:
//! - Address and port bindings
//! - The multipart upload size limit
//! - The policy used to report pipeline failures
//!
//! Default values are sourced from `crate::constants`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADDRESS, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_PORT};

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_upload_size() -> usize {
    DEFAULT_MAX_UPLOAD_SIZE
}

/// How decode, transform, encode and form-binding failures reach the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Every failure is a bare 500 with no detail
    #[default]
    Legacy,
    /// Typed status codes with a JSON `{"error": ...}` body
    Structured,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes (default: 50 MB)
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Socket address string, e.g. `0.0.0.0:8000`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
