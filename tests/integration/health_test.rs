// Health and metrics endpoint integration tests

use super::test_harness::*;
use imgconv::config::ErrorPolicy;

#[tokio::test]
async fn test_health_returns_ok() {
    let response = get(router(ErrorPolicy::Legacy), "/health").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_metrics_after_conversion() {
    let form = MultipartBody::new().file("jpg_file", "m.jpg", &jpeg(8, 8));
    let converted = post_multipart(router(ErrorPolicy::Legacy), "/convert/jpg_to_png/", form).await;
    assert_eq!(converted.status, 200);

    let form = MultipartBody::new().file("jpg_file", "m.gif", b"GIF89a");
    let rejected = post_multipart(router(ErrorPolicy::Legacy), "/convert/jpg_to_png/", form).await;
    assert_eq!(rejected.status, 200);

    let response = get(router(ErrorPolicy::Legacy), "/metrics").await;
    assert_eq!(response.status, 200);
    assert!(response.header("content-type").starts_with("text/plain"));

    let body = response.text();
    assert!(body.contains("imgconv_conversions_total"));
    assert!(body.contains("endpoint=\"jpg_to_png\""));
    assert!(body.contains("imgconv_rejected_uploads_total"));
    assert!(body.contains("imgconv_conversion_duration_seconds"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = get(router(ErrorPolicy::Legacy), "/convert/gif_to_png/").await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_get_on_upload_route_is_405() {
    let response = get(router(ErrorPolicy::Legacy), "/resize/").await;
    assert_eq!(response.status, 405);
}

#[tokio::test]
async fn test_non_multipart_body() {
    let request = http::Request::builder()
        .method("POST")
        .uri("/convert/png_to_jpg/")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{}"))
        .unwrap();

    let legacy = send(router(ErrorPolicy::Legacy), request).await;
    assert_eq!(legacy.status, 500);

    let request = http::Request::builder()
        .method("POST")
        .uri("/convert/png_to_jpg/")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{}"))
        .unwrap();

    let structured = send(router(ErrorPolicy::Structured), request).await;
    assert!(structured.status.is_client_error());
}
