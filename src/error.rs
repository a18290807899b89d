// Error types module

use std::io;

use thiserror::Error;

/// Top-level error type for starting and running the service
///
/// Request-level failures never surface here; they are mapped to HTTP
/// responses by the server module. This type covers the process edges:
/// configuration, logging setup and the listening socket.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration errors (invalid YAML, missing env vars, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// The listen address could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server loop terminated with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}
