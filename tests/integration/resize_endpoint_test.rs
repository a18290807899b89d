// Resize endpoint integration tests
//
// - Output is exactly width x height, aspect ratio ignored
// - Output format follows the input filename: .jpg/.jpeg → JPEG, else PNG
// - width and height bind before the filename is checked

use super::test_harness::*;
use image::{GenericImageView, ImageFormat};
use imgconv::config::ErrorPolicy;

fn resize_form(filename: &str, data: &[u8], width: &str, height: &str) -> MultipartBody {
    MultipartBody::new()
        .file("image_file", filename, data)
        .text("width", width)
        .text("height", height)
}

#[tokio::test]
async fn test_resize_png_stretches_to_exact_size() {
    let form = resize_form("logo.png", &png_with_alpha(100, 100), "50", "200");
    let response = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"resized_image.png\""
    );
    assert_eq!(response.image_format(), ImageFormat::Png);
    assert_eq!(response.image().dimensions(), (50, 200));
}

#[tokio::test]
async fn test_resize_jpeg_stays_jpeg() {
    for filename in ["shot.jpg", "shot.JPEG"] {
        let form = resize_form(filename, &jpeg(40, 30), "20", "15");
        let response = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;

        assert_eq!(response.status, 200, "{}", filename);
        assert_eq!(response.header("content-type"), "image/jpeg");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"resized_image.jpg\""
        );
        assert_eq!(response.image().dimensions(), (20, 15));
    }
}

#[tokio::test]
async fn test_resize_upscale() {
    let form = resize_form("small.png", &png_rgb(4, 4), "64", "32");
    let response = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.image().dimensions(), (64, 32));
}

#[tokio::test]
async fn test_resize_rejects_unsupported_extension() {
    let form = resize_form("anim.gif", b"GIF89a", "10", "10");
    let response = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.json()["error"], "Please upload an image file.");
}

#[tokio::test]
async fn test_resize_missing_width_fails_before_extension_check() {
    let form = MultipartBody::new()
        .file("image_file", "doc.txt", b"text")
        .text("height", "10");

    let legacy = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;
    assert_eq!(legacy.status, 500);

    let form = MultipartBody::new()
        .file("image_file", "doc.txt", b"text")
        .text("height", "10");
    let structured = post_multipart(router(ErrorPolicy::Structured), "/resize/", form).await;
    assert_eq!(structured.status, 400);
    assert!(structured.json()["error"]
        .as_str()
        .unwrap()
        .contains("width"));
}

#[tokio::test]
async fn test_resize_non_integer_height() {
    let form = resize_form("logo.png", &png_rgb(10, 10), "10", "tall");
    let response = post_multipart(router(ErrorPolicy::Structured), "/resize/", form).await;

    assert_eq!(response.status, 400);
    assert!(response.json()["error"].as_str().unwrap().contains("height"));
}

#[tokio::test]
async fn test_resize_zero_dimension() {
    let form = resize_form("logo.png", &png_rgb(10, 10), "0", "10");

    let response = post_multipart(router(ErrorPolicy::Structured), "/resize/", form).await;
    assert_eq!(response.status, 400);
}

#[tokio::test]
async fn test_resize_alpha_png_named_jpg_cannot_encode() {
    // RGBA pixels routed to JPEG by the .jpg name
    let data = png_with_alpha(20, 20);

    let legacy = post_multipart(
        router(ErrorPolicy::Legacy),
        "/resize/",
        resize_form("transparent.jpg", &data, "10", "10"),
    )
    .await;
    assert_eq!(legacy.status, 500);

    let structured = post_multipart(
        router(ErrorPolicy::Structured),
        "/resize/",
        resize_form("transparent.jpg", &data, "10", "10"),
    )
    .await;
    assert_eq!(structured.status, 422);
    assert!(structured.json()["error"].as_str().unwrap().contains("RGBA"));
}

#[tokio::test]
async fn test_resize_16_bit_png_named_jpg_returns_jpeg() {
    let form = resize_form("scan.jpg", &png_rgb16(20, 20), "10", "8");
    let response = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"resized_image.jpg\""
    );
    assert_eq!(response.image_format(), ImageFormat::Jpeg);
    assert_eq!(response.image().dimensions(), (10, 8));
}

#[tokio::test]
async fn test_resize_16_bit_png_stays_opaque() {
    let form = resize_form("scan.png", &png_rgb16(20, 20), "6", "6");
    let response = post_multipart(router(ErrorPolicy::Legacy), "/resize/", form).await;

    assert_eq!(response.status, 200);
    assert!(!response.image().color().has_alpha());
}
