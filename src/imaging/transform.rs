//! Pixel transforms applied between decode and encode

use std::num::NonZeroU32;

use fast_image_resize::{Image, MulDiv, PixelType, Resizer};
use image::{DynamicImage, ImageBuffer, Luma, LumaA, Rgb, RgbImage, Rgba};

use super::error::ImageError;
use super::model::DecodedImage;
use super::params::{AlphaFlatten, ResizeFilter};

/// Endpoint-specific transform stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Hand the decoded image to the encoder unchanged
    Passthrough,
    /// Force 3-channel RGB, removing alpha per the flatten policy
    ToRgb(AlphaFlatten),
    /// Stretch to exactly `width`×`height`, ignoring aspect ratio
    Resize {
        width: u32,
        height: u32,
        filter: ResizeFilter,
    },
}

impl Transform {
    pub fn apply(&self, image: DecodedImage) -> Result<DecodedImage, ImageError> {
        match *self {
            Transform::Passthrough => Ok(image),
            Transform::ToRgb(flatten) => Ok(to_rgb(image, flatten)),
            Transform::Resize {
                width,
                height,
                filter,
            } => resize_exact(&image, width, height, filter),
        }
    }

    /// Metric/log label for this transform
    pub fn label(&self) -> &'static str {
        match self {
            Transform::Passthrough => "passthrough",
            Transform::ToRgb(_) => "to_rgb",
            Transform::Resize { .. } => "resize",
        }
    }
}

/// Convert any color mode to RGB8
///
/// Images without alpha are converted directly. With `Discard` the stored
/// color channels are kept as-is; `White`/`Black` composite over that color.
pub fn to_rgb(image: DecodedImage, flatten: AlphaFlatten) -> DecodedImage {
    let img = image.into_dynamic();

    let background = match flatten.background() {
        Some(bg) if img.color().has_alpha() => bg,
        _ => return DecodedImage::new(DynamicImage::ImageRgb8(img.to_rgb8())),
    };

    let rgba = img.to_rgba8();
    let rgb = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([
            composite(r, background[0], a),
            composite(g, background[1], a),
            composite(b, background[2], a),
        ])
    });

    DecodedImage::new(DynamicImage::ImageRgb8(rgb))
}

fn composite(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}

/// Resize to exact dimensions, keeping the source color mode
///
/// 8-bit L/LA/RGB/RGBA are resized natively; 16-bit and float layouts are
/// narrowed to the 8-bit layout with the same channels, so an opaque image
/// never gains alpha. Alpha layouts are resized premultiplied so transparent
/// pixels don't bleed color into their neighbours.
pub fn resize_exact(
    image: &DecodedImage,
    target_w: u32,
    target_h: u32,
    filter: ResizeFilter,
) -> Result<DecodedImage, ImageError> {
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;
    let src_width = NonZeroU32::new(image.width())
        .ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(image.height())
        .ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;

    let img = image.as_dynamic();
    let (pixels, pixel_type) = match img {
        DynamicImage::ImageLuma8(buf) => (buf.as_raw().clone(), PixelType::U8),
        DynamicImage::ImageLumaA8(buf) => (buf.as_raw().clone(), PixelType::U8x2),
        DynamicImage::ImageRgb8(buf) => (buf.as_raw().clone(), PixelType::U8x3),
        DynamicImage::ImageRgba8(buf) => (buf.as_raw().clone(), PixelType::U8x4),
        // 16-bit and float layouts narrow to 8 bits with the same channels
        other => {
            let color = other.color();
            match (color.has_color(), color.has_alpha()) {
                (false, false) => (other.to_luma8().into_raw(), PixelType::U8),
                (false, true) => (other.to_luma_alpha8().into_raw(), PixelType::U8x2),
                (true, false) => (other.to_rgb8().into_raw(), PixelType::U8x3),
                (true, true) => (other.to_rgba8().into_raw(), PixelType::U8x4),
            }
        }
    };
    let has_alpha = matches!(pixel_type, PixelType::U8x2 | PixelType::U8x4);

    let mut src_image = Image::from_vec_u8(src_width, src_height, pixels, pixel_type)
        .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let alpha_mul_div = MulDiv::default();
    if has_alpha {
        alpha_mul_div
            .multiply_alpha_inplace(&mut src_image.view_mut())
            .map_err(|e| ImageError::resize_failed(format!("Alpha premultiply failed: {:?}", e)))?;
    }

    let mut dst_image = Image::new(dst_width, dst_height, pixel_type);
    let mut dst_view = dst_image.view_mut();

    let mut resizer = Resizer::new(filter.to_resize_alg());
    resizer
        .resize(&src_image.view(), &mut dst_view)
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    if has_alpha {
        alpha_mul_div
            .divide_alpha_inplace(&mut dst_view)
            .map_err(|e| ImageError::resize_failed(format!("Alpha unpremultiply failed: {:?}", e)))?;
    }

    let buf = dst_image.into_vec();
    let resized = match pixel_type {
        PixelType::U8 => ImageBuffer::<Luma<u8>, _>::from_raw(target_w, target_h, buf)
            .map(DynamicImage::ImageLuma8),
        PixelType::U8x2 => ImageBuffer::<LumaA<u8>, _>::from_raw(target_w, target_h, buf)
            .map(DynamicImage::ImageLumaA8),
        PixelType::U8x3 => ImageBuffer::<Rgb<u8>, _>::from_raw(target_w, target_h, buf)
            .map(DynamicImage::ImageRgb8),
        _ => ImageBuffer::<Rgba<u8>, _>::from_raw(target_w, target_h, buf)
            .map(DynamicImage::ImageRgba8),
    }
    .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))?;

    Ok(DecodedImage::new(resized))
}
