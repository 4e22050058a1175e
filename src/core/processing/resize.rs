use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, RgbImage, RgbaImage};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{OutputSize, ResampleFilter};

fn resize_alg(filter: ResampleFilter) -> ResizeAlg {
    match filter {
        ResampleFilter::Nearest => ResizeAlg::Nearest,
        ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResampleFilter::Mitchell => ResizeAlg::Convolution(FilterType::Mitchell),
        ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

fn resize_interleaved_u8(
    data: Vec<u8>,
    original_width: u32,
    original_height: u32,
    target: OutputSize,
    pixel_type: PixelType,
    filter: ResampleFilter,
) -> Result<Vec<u8>> {
    let resize_options = ResizeOptions::new().resize_alg(resize_alg(filter));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(original_width, original_height, data, pixel_type)
        .map_err(Error::processing)?;
    let mut dst_image = Image::new(target.width, target.height, pixel_type);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::processing)?;

    Ok(dst_image.into_vec())
}

pub fn resize_rgb8_image(img: &RgbImage, target: OutputSize, filter: ResampleFilter) -> Result<RgbImage> {
    let (width, height) = img.dimensions();
    let out = resize_interleaved_u8(
        img.as_raw().clone(),
        width,
        height,
        target,
        PixelType::U8x3,
        filter,
    )?;
    RgbImage::from_raw(target.width, target.height, out)
        .ok_or_else(|| Error::Processing("resized RGB buffer has unexpected length".to_string()))
}

pub fn resize_rgba8_image(
    img: &RgbaImage,
    target: OutputSize,
    filter: ResampleFilter,
) -> Result<RgbaImage> {
    let (width, height) = img.dimensions();
    let out = resize_interleaved_u8(
        img.as_raw().clone(),
        width,
        height,
        target,
        PixelType::U8x4,
        filter,
    )?;
    RgbaImage::from_raw(target.width, target.height, out)
        .ok_or_else(|| Error::Processing("resized RGBA buffer has unexpected length".to_string()))
}

/// Resize to exactly `target`, keeping an alpha channel if the source has one.
///
/// The result is always 8-bit: `Rgba8` when the source has alpha, `Rgb8` otherwise.
pub fn resize_image(img: &DynamicImage, target: OutputSize, filter: ResampleFilter) -> Result<DynamicImage> {
    if target.width == 0 || target.height == 0 {
        return Err(Error::ZeroSize {
            width: target.width,
            height: target.height,
        });
    }

    info!(
        "Resizing {}x{} -> {} ({})",
        img.width(),
        img.height(),
        target,
        filter
    );

    if img.color().has_alpha() {
        Ok(DynamicImage::ImageRgba8(resize_rgba8_image(
            &img.to_rgba8(),
            target,
            filter,
        )?))
    } else {
        Ok(DynamicImage::ImageRgb8(resize_rgb8_image(
            &img.to_rgb8(),
            target,
            filter,
        )?))
    }
}
