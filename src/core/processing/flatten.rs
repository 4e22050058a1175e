use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use tracing::info;

use crate::types::{BackdropColor, ColorMode};

/// Blend one channel over the backdrop using `alpha` as weight, rounding to nearest.
#[inline]
fn blend_channel(src: u8, backdrop: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((src as u32 * a + backdrop as u32 * (255 - a) + 127) / 255) as u8
}

/// Composite an RGBA image onto an opaque backdrop.
pub fn flatten_onto(img: &RgbaImage, backdrop: BackdropColor) -> RgbImage {
    let [br, bg, bb] = backdrop.0;
    let mut out = RgbImage::new(img.width(), img.height());
    for (dst, src) in out.pixels_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = Rgb([
            blend_channel(r, br, a),
            blend_channel(g, bg, a),
            blend_channel(b, bb, a),
        ]);
    }
    out
}

/// Drop transparency: flatten onto `backdrop` when the image has alpha,
/// otherwise convert straight to RGB8. Returns the source color mode as well.
pub fn normalize_color(img: &DynamicImage, backdrop: BackdropColor) -> (RgbImage, ColorMode) {
    match ColorMode::of(img) {
        ColorMode::Transparent => {
            info!("Flattening alpha onto backdrop {}", backdrop);
            (flatten_onto(&img.to_rgba8(), backdrop), ColorMode::Transparent)
        }
        ColorMode::Opaque => (img.to_rgb8(), ColorMode::Opaque),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn transparent_pixels_take_backdrop_exactly() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([250, 10, 99, 0]));
        let out = flatten_onto(&img, BackdropColor([12, 34, 56]));
        assert!(out.pixels().all(|p| *p == Rgb([12, 34, 56])));
    }

    #[test]
    fn opaque_pixels_are_untouched() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([250, 10, 99, 255]));
        let out = flatten_onto(&img, BackdropColor::WHITE);
        assert!(out.pixels().all(|p| *p == Rgb([250, 10, 99])));
    }

    #[test]
    fn partial_alpha_blends() {
        // 255 * 128 / 255 rounds to 128 over black
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        let out = flatten_onto(&img, BackdropColor::BLACK);
        assert_eq!(*out.get_pixel(0, 0), Rgb([128, 128, 128]));

        let over_white = flatten_onto(
            &RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 64])),
            BackdropColor::WHITE,
        );
        // (255 * 191 + 127) / 255 = 191
        assert_eq!(*over_white.get_pixel(0, 0), Rgb([191, 191, 191]));
    }

    #[test]
    fn normalize_reports_mode() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(3, 3));
        let (_, mode) = normalize_color(&rgba, BackdropColor::BLACK);
        assert_eq!(mode, ColorMode::Transparent);

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([77])));
        let (rgb, mode) = normalize_color(&gray, BackdropColor::WHITE);
        assert_eq!(mode, ColorMode::Opaque);
        assert_eq!(*rgb.get_pixel(1, 1), Rgb([77, 77, 77]));
    }
}
