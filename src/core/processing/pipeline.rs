use image::DynamicImage;
use tracing::info;

use crate::core::processing::crop::resolve_crop_box;
use crate::core::processing::flatten::normalize_color;
use crate::core::processing::resize::{resize_image, resize_rgb8_image};
use crate::error::{Error, Result};
use crate::types::{BackdropColor, ColorMode, CropSpec, OutputSize, ResampleFilter};

/// Crop the centered box described by `spec` and resize it to exactly `output_size`.
///
/// Pure: no filesystem access. Alpha is preserved; the result is 8-bit RGB or RGBA.
pub fn crop_and_resize(
    source: &DynamicImage,
    spec: CropSpec,
    output_size: OutputSize,
    filter: ResampleFilter,
) -> Result<DynamicImage> {
    if output_size.width == 0 || output_size.height == 0 {
        return Err(Error::ZeroSize {
            width: output_size.width,
            height: output_size.height,
        });
    }

    let crop_box = resolve_crop_box(source.width(), source.height(), spec)?;
    info!(
        "Cropping {}x{} to {}x{} at ({}, {})",
        source.width(),
        source.height(),
        crop_box.width(),
        crop_box.height(),
        crop_box.left,
        crop_box.top
    );

    let cropped = source.crop_imm(crop_box.left, crop_box.top, crop_box.width(), crop_box.height());
    resize_image(&cropped, output_size, filter)
}

/// Opaque RGB image ready to be written for one export target.
pub fn conform_for_export(
    source: &DynamicImage,
    backdrop: BackdropColor,
    size: OutputSize,
    filter: ResampleFilter,
) -> Result<(DynamicImage, ColorMode)> {
    let (rgb, mode) = normalize_color(source, backdrop);
    if rgb.dimensions() == (size.width, size.height) {
        return Ok((DynamicImage::ImageRgb8(rgb), mode));
    }
    let resized = resize_rgb8_image(&rgb, size, filter)?;
    Ok((DynamicImage::ImageRgb8(resized), mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn crop_then_resize_hits_output_size() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([1, 2, 3])));
        let out = crop_and_resize(
            &src,
            CropSpec::Margin(0.16),
            OutputSize::square(64),
            ResampleFilter::Lanczos3,
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (64, 64));
    }

    #[test]
    fn crop_discards_the_border() {
        // red 10px frame around a blue 20x20 center
        let mut img = RgbImage::from_pixel(40, 40, Rgb([255, 0, 0]));
        for y in 10..30 {
            for x in 10..30 {
                img.put_pixel(x, y, Rgb([0, 0, 255]));
            }
        }
        let out = crop_and_resize(
            &DynamicImage::ImageRgb8(img),
            CropSpec::Fraction(0.5),
            OutputSize::square(20),
            ResampleFilter::Nearest,
        )
        .unwrap();
        assert!(out.to_rgb8().pixels().all(|p| *p == Rgb([0, 0, 255])));
    }

    #[test]
    fn invalid_spec_surfaces() {
        let src = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        assert!(matches!(
            crop_and_resize(
                &src,
                CropSpec::Fraction(2.0),
                OutputSize::square(10),
                ResampleFilter::Nearest
            ),
            Err(Error::InvalidCropSpec(_))
        ));
    }

    #[test]
    fn conform_skips_resize_at_target_size() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([9, 9, 9, 0])));
        let (out, mode) =
            conform_for_export(&src, BackdropColor::BLACK, OutputSize::square(16), ResampleFilter::Lanczos3)
                .unwrap();
        assert_eq!(mode, ColorMode::Transparent);
        assert!(!out.color().has_alpha());
        assert!(out.to_rgb8().pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn conform_resizes_when_needed() {
        let src = DynamicImage::ImageRgb8(RgbImage::new(30, 30));
        let (out, mode) =
            conform_for_export(&src, BackdropColor::BLACK, OutputSize::square(12), ResampleFilter::Bilinear)
                .unwrap();
        assert_eq!(mode, ColorMode::Opaque);
        assert_eq!((out.width(), out.height()), (12, 12));
    }
}
