//! Response builders and the request error type.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{header, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::config::ErrorPolicy;
use crate::imaging::{EncodedOutput, ImageError};

/// Anything that stops a request before an image is returned
#[derive(Debug, Error)]
pub enum ApiError {
    /// Form binding or pipeline failure
    #[error(transparent)]
    Image(#[from] ImageError),
    /// The body is not `multipart/form-data`
    #[error("{0}")]
    Rejected(#[from] MultipartRejection),
    /// The multipart stream broke off or exceeded the upload limit
    #[error("{0}")]
    Upload(#[from] MultipartError),
    /// The blocking worker running the pipeline panicked or was cancelled
    #[error("image task failed: {0}")]
    Task(String),
}

impl ApiError {
    /// Status reported under `ErrorPolicy::Structured`
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Image(e) => StatusCode::from_u16(e.to_http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Rejected(e) => e.status(),
            ApiError::Upload(e) => e.status(),
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Image(e) => e.kind(),
            ApiError::Rejected(_) => "not_multipart",
            ApiError::Upload(_) => "upload_failed",
            ApiError::Task(_) => "task_failed",
        }
    }

    /// Render the error according to the configured policy
    ///
    /// Upload-limit breaches keep their 413 under both policies; everything
    /// else is a bare 500 under `Legacy`.
    pub fn into_response_with(self, policy: ErrorPolicy) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "request failed");
        } else {
            tracing::warn!(error = %self, kind = self.kind(), status = status.as_u16(), "request failed");
        }

        match policy {
            ErrorPolicy::Structured => error_json(status, &self.to_string()),
            ErrorPolicy::Legacy if status == StatusCode::PAYLOAD_TOO_LARGE => {
                (status, "Payload Too Large").into_response()
            }
            ErrorPolicy::Legacy => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Successful conversion: the encoded bytes as a named attachment
pub fn attachment_response(output: EncodedOutput) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", output.filename);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, output.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        output.data,
    )
        .into_response()
}

/// Extension check failure: HTTP 200 with a JSON error body
pub fn rejection_response(message: &str) -> Response {
    error_json(StatusCode::OK, message)
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
