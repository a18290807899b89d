//! Endpoint handlers.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::response::{IntoResponse, Response};
use http::{header, StatusCode};
use tracing::Instrument;
use uuid::Uuid;

use super::form::UploadForm;
use super::response::{attachment_response, rejection_response, ApiError};
use super::AppState;
use crate::constants::{CONVERTED_FILENAME_STEM, RESIZED_FILENAME_STEM};
use crate::imaging::{
    export_prometheus, AcceptedExtensions, EncodedOutput, ImageData, OutputFormat, Pipeline,
    PipelineMetrics, ResizeParams, Transform,
};

/// A fixed format-conversion endpoint
#[derive(Debug)]
pub struct ConversionRoute {
    pub path: &'static str,
    /// Label used in logs and metrics
    pub endpoint: &'static str,
    /// Multipart field carrying the file
    pub field: &'static str,
    pub accepted: AcceptedExtensions,
    /// Body of the 200 validation-failure response
    pub rejection: &'static str,
    /// Drop alpha before encoding
    pub force_rgb: bool,
    pub target: OutputFormat,
}

pub static CONVERSION_ROUTES: [ConversionRoute; 3] = [
    ConversionRoute {
        path: "/convert/png_to_jpg/",
        endpoint: "png_to_jpg",
        field: "png_file",
        accepted: AcceptedExtensions::PNG,
        rejection: "Please upload a PNG file.",
        force_rgb: true,
        target: OutputFormat::Jpeg,
    },
    ConversionRoute {
        path: "/convert/webp_to_png/",
        endpoint: "webp_to_png",
        field: "webp_file",
        accepted: AcceptedExtensions::WEBP,
        rejection: "Please upload a WebP file.",
        force_rgb: false,
        target: OutputFormat::Png,
    },
    ConversionRoute {
        path: "/convert/jpg_to_png/",
        endpoint: "jpg_to_png",
        field: "jpg_file",
        accepted: AcceptedExtensions::JPEG,
        rejection: "Please upload a JPG file.",
        force_rgb: false,
        target: OutputFormat::Png,
    },
];

pub const RESIZE_PATH: &str = "/resize/";
const RESIZE_ENDPOINT: &str = "resize";
const RESIZE_FILE_FIELD: &str = "image_file";
const RESIZE_REJECTION: &str = "Please upload an image file.";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        export_prometheus(),
    )
}

pub async fn convert(
    state: AppState,
    route: &'static ConversionRoute,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("request", endpoint = route.endpoint, %request_id);
    let policy = state.policy;

    async move {
        match convert_upload(&state, route, multipart).await {
            Ok(response) => response,
            Err(e) => e.into_response_with(policy),
        }
    }
    .instrument(span)
    .await
}

async fn convert_upload(
    state: &AppState,
    route: &'static ConversionRoute,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::collect(multipart?).await?;
    let file = form.take_file(route.field)?;

    if !route.accepted.accepts(file.filename.as_deref()) {
        return Ok(reject(
            route.endpoint,
            route.accepted,
            file.filename.as_deref(),
            route.rejection,
        ));
    }

    tracing::info!(
        filename = file.filename.as_deref().unwrap_or_default(),
        bytes = file.data.len(),
        "converting upload"
    );

    let transform = if route.force_rgb {
        Transform::ToRgb(state.image.alpha_flatten)
    } else {
        Transform::Passthrough
    };
    let pipeline = Pipeline::new(
        route.endpoint,
        transform,
        route.target,
        CONVERTED_FILENAME_STEM,
        &state.image,
    );

    let output = run_blocking(pipeline, file.into()).await?;
    Ok(respond(output))
}

pub async fn resize(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("request", endpoint = RESIZE_ENDPOINT, %request_id);
    let policy = state.policy;

    async move {
        match resize_upload(&state, multipart).await {
            Ok(response) => response,
            Err(e) => e.into_response_with(policy),
        }
    }
    .instrument(span)
    .await
}

async fn resize_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::collect(multipart?).await?;

    // all form fields bind before the filename is looked at
    let file = form.take_file(RESIZE_FILE_FIELD)?;
    let params = ResizeParams::from_form(form.text("width"), form.text("height"))?;

    let accepted = AcceptedExtensions::RESIZABLE;
    let filename = match file.filename.as_deref() {
        Some(name) if accepted.accepts(Some(name)) => name.to_string(),
        other => return Ok(reject(RESIZE_ENDPOINT, accepted, other, RESIZE_REJECTION)),
    };

    let target = OutputFormat::from_filename(&filename);
    tracing::info!(
        filename = %filename,
        bytes = file.data.len(),
        width = params.width,
        height = params.height,
        format = target.as_str(),
        "resizing upload"
    );

    let pipeline = Pipeline::new(
        RESIZE_ENDPOINT,
        Transform::Resize {
            width: params.width,
            height: params.height,
            filter: state.image.resize_filter,
        },
        target,
        RESIZED_FILENAME_STEM,
        &state.image,
    );

    let output = run_blocking(pipeline, file.into()).await?;
    Ok(respond(output))
}

fn reject(
    endpoint: &str,
    accepted: AcceptedExtensions,
    filename: Option<&str>,
    message: &str,
) -> Response {
    PipelineMetrics::global().record_rejection(endpoint);
    tracing::warn!(
        filename = filename.unwrap_or_default(),
        accepted = ?accepted.suffixes(),
        "rejected upload by extension"
    );
    rejection_response(message)
}

/// Decode, transform and encode off the async runtime
async fn run_blocking(pipeline: Pipeline, input: ImageData) -> Result<EncodedOutput, ApiError> {
    let output = tokio::task::spawn_blocking(move || pipeline.run(input))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;
    Ok(output)
}

fn respond(output: EncodedOutput) -> Response {
    tracing::info!(
        filename = %output.filename,
        bytes = output.data.len(),
        "conversion complete"
    );
    attachment_response(output)
}
