// Conversion endpoint integration tests
//
// Covers the three fixed-format endpoints end to end through the router:
// - Accepted uploads return the converted attachment
// - Rejected filenames return 200 with a JSON error and no decode attempt

use super::test_harness::*;
use image::{ColorType, GenericImageView, ImageFormat};
use imgconv::config::ErrorPolicy;

#[tokio::test]
async fn test_png_to_jpg_converts_alpha_png() {
    let form = MultipartBody::new().file("png_file", "photo.PNG", &png_with_alpha(64, 48));
    let response = post_multipart(router(ErrorPolicy::Legacy), "/convert/png_to_jpg/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"converted_image.jpg\""
    );
    assert_eq!(response.image_format(), ImageFormat::Jpeg);

    let image = response.image();
    assert_eq!(image.dimensions(), (64, 48));
    assert_eq!(image.color(), ColorType::Rgb8);
}

#[tokio::test]
async fn test_png_to_jpg_rejects_other_extensions() {
    let form = MultipartBody::new().file("png_file", "photo.jpg", &png_rgb(8, 8));
    let response = post_multipart(router(ErrorPolicy::Legacy), "/convert/png_to_jpg/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), "application/json");
    assert_eq!(response.json()["error"], "Please upload a PNG file.");
}

#[tokio::test]
async fn test_webp_to_png_converts() {
    let form = MultipartBody::new().file("webp_file", "tiny.webp", WEBP_1X1);
    let response = post_multipart(router(ErrorPolicy::Legacy), "/convert/webp_to_png/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"converted_image.png\""
    );
    assert_eq!(response.image_format(), ImageFormat::Png);
    assert_eq!(response.image().dimensions(), (1, 1));
}

#[tokio::test]
async fn test_webp_to_png_rejects_png_name() {
    let form = MultipartBody::new().file("webp_file", "tiny.png", WEBP_1X1);
    let response = post_multipart(router(ErrorPolicy::Legacy), "/convert/webp_to_png/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.json()["error"], "Please upload a WebP file.");
}

#[tokio::test]
async fn test_jpg_to_png_accepts_both_suffixes() {
    for filename in ["holiday.jpg", "HOLIDAY.JPEG"] {
        let form = MultipartBody::new().file("jpg_file", filename, &jpeg(30, 20));
        let response =
            post_multipart(router(ErrorPolicy::Legacy), "/convert/jpg_to_png/", form).await;

        assert_eq!(response.status, 200, "{}", filename);
        assert_eq!(response.header("content-type"), "image/png");
        assert_eq!(response.image_format(), ImageFormat::Png);
        assert_eq!(response.image().dimensions(), (30, 20));
    }
}

#[tokio::test]
async fn test_jpg_to_png_rejects_text_file_without_decoding() {
    // garbage bytes never reach the decoder
    let form = MultipartBody::new().file("jpg_file", "doc.txt", b"definitely not an image");
    let response = post_multipart(router(ErrorPolicy::Legacy), "/convert/jpg_to_png/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(
        response.json(),
        serde_json::json!({ "error": "Please upload a JPG file." })
    );
}

#[tokio::test]
async fn test_content_is_sniffed_not_trusted() {
    // a JPEG named .png still converts: only the name is validated
    let form = MultipartBody::new().file("png_file", "actually_jpeg.png", &jpeg(10, 10));
    let response = post_multipart(router(ErrorPolicy::Legacy), "/convert/png_to_jpg/", form).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.image_format(), ImageFormat::Jpeg);
}

#[tokio::test]
async fn test_jpg_to_png_is_deterministic() {
    let input = jpeg(16, 16);

    let first = post_multipart(
        router(ErrorPolicy::Legacy),
        "/convert/jpg_to_png/",
        MultipartBody::new().file("jpg_file", "a.jpg", &input),
    )
    .await;
    let second = post_multipart(
        router(ErrorPolicy::Legacy),
        "/convert/jpg_to_png/",
        MultipartBody::new().file("jpg_file", "b.jpg", &input),
    )
    .await;

    assert_eq!(first.status, 200);
    assert_eq!(first.body, second.body);
}
