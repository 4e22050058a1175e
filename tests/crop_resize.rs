// Integration tests for the center-crop resizer
use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use iconprep::{
    CropParams, CropSpec, Error, OutputSize, ResampleFilter, crop_and_resize, crop_file_to_path,
    resolve_crop_box,
};
use proptest::prelude::*;

fn gradient(side: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(side, side, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn write_source(dir: &Path, name: &str, img: &DynamicImage) -> std::path::PathBuf {
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn output_always_matches_requested_size(
        side in 1u32..64,
        fraction in 0.01f64..=1.0,
        out_w in 1u32..48,
        out_h in 1u32..48,
    ) {
        prop_assume!((side as f64 * fraction).round() >= 1.0);
        let out = crop_and_resize(
            &gradient(side),
            CropSpec::Fraction(fraction),
            OutputSize::new(out_w, out_h).unwrap(),
            ResampleFilter::Lanczos3,
        )
        .unwrap();
        prop_assert_eq!((out.width(), out.height()), (out_w, out_h));
    }

    #[test]
    fn margin_crop_dimension_follows_rounding_rule(side in 2u32..2048, m in 0.0f64..0.49) {
        let margin = (side as f64 * m).round() as u32;
        prop_assume!(2 * margin < side);
        let b = resolve_crop_box(side, side, CropSpec::Margin(m)).unwrap();
        prop_assert_eq!(b.width(), side - 2 * margin);
        prop_assert_eq!(b.left, (side - b.width()) / 2);
    }
}

#[test]
fn margin_016_on_1024_keeps_696() {
    let b = resolve_crop_box(1024, 1024, CropSpec::Margin(0.16)).unwrap();
    assert_eq!(b.width(), 696);
    assert_eq!(b.height(), 696);
}

#[test]
fn repeated_runs_write_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "src.png", &gradient(96));
    let params = CropParams {
        crop: CropSpec::Fraction(0.58),
        size: OutputSize::square(128),
        filter: ResampleFilter::Lanczos3,
    };

    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");
    crop_file_to_path(&input, &first, &params).unwrap();
    crop_file_to_path(&input, &second, &params).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn written_file_has_exact_output_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "src.png", &gradient(100));
    let output = dir.path().join("nested/out/icon.png");

    let returned = crop_file_to_path(&input, &output, &CropParams::new(CropSpec::Margin(0.16))).unwrap();

    let on_disk = image::open(&output).unwrap();
    assert_eq!((on_disk.width(), on_disk.height()), (1024, 1024));
    assert_eq!(on_disk.to_rgb8(), returned.to_rgb8());
}

#[test]
fn transparency_survives_cropping() {
    let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 0])));
    let out = crop_and_resize(
        &src,
        CropSpec::MarginPixels(2),
        OutputSize::square(32),
        ResampleFilter::Bilinear,
    )
    .unwrap();
    assert!(out.color().has_alpha());
}

#[test]
fn missing_source_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = crop_file_to_path(
        &dir.path().join("absent.png"),
        &dir.path().join("out.png"),
        &CropParams::new(CropSpec::Fraction(0.5)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ImageLoad { .. }));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn invalid_spec_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "src.png", &gradient(16));
    let output = dir.path().join("out.png");

    let err = crop_file_to_path(&input, &output, &CropParams::new(CropSpec::MarginPixels(8))).unwrap_err();

    assert!(matches!(err, Error::InvalidCropSpec(_)));
    assert!(!output.exists());
}
