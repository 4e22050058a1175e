use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::CropSpec;

/// Pixel rectangle `(left, top, right, bottom)`, right/bottom exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

fn scaled(side: u32, fraction: f64) -> u64 {
    (side as f64 * fraction).round() as u64
}

/// Side length of the square crop for a size-fraction spec.
pub fn crop_dimension_for_fraction(side: u32, fraction: f64) -> Result<u32> {
    if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
        return Err(Error::InvalidCropSpec(format!(
            "size fraction must be in (0, 1], got {}",
            fraction
        )));
    }
    let dim = scaled(side, fraction);
    if dim == 0 || dim > side as u64 {
        return Err(Error::InvalidCropSpec(format!(
            "fraction {} of {}px resolves to {}px",
            fraction, side, dim
        )));
    }
    Ok(dim as u32)
}

/// Margin in pixels for a margin-fraction spec.
pub fn margin_for_fraction(side: u32, fraction: f64) -> Result<u32> {
    if !fraction.is_finite() || !(0.0..0.5).contains(&fraction) {
        return Err(Error::InvalidCropSpec(format!(
            "margin fraction must be in [0, 0.5), got {}",
            fraction
        )));
    }
    Ok(scaled(side, fraction) as u32)
}

fn margin_box(width: u32, height: u32, margin: u32) -> Result<CropBox> {
    let twice = margin as u64 * 2;
    if twice >= width as u64 || twice >= height as u64 {
        return Err(Error::InvalidCropSpec(format!(
            "margin of {}px leaves nothing of a {}x{} image",
            margin, width, height
        )));
    }
    Ok(CropBox {
        left: margin,
        top: margin,
        right: width - margin,
        bottom: height - margin,
    })
}

/// Resolve a crop spec against source dimensions.
///
/// Fractions are measured against the source width. A size-fraction crop is
/// square and centered with floor division, so when `side - crop_dim` is odd
/// the box sits one pixel closer to the top-left edge than to the bottom-right.
pub fn resolve_crop_box(width: u32, height: u32, spec: CropSpec) -> Result<CropBox> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidCropSpec(format!(
            "source image is empty ({}x{})",
            width, height
        )));
    }
    if width != height {
        warn!(
            "Source is not square ({}x{}); centering per axis from the width-derived crop",
            width, height
        );
    }

    let crop_box = match spec {
        CropSpec::Fraction(fraction) => {
            let dim = crop_dimension_for_fraction(width, fraction)?;
            if dim > height {
                return Err(Error::InvalidCropSpec(format!(
                    "crop of {}px does not fit image height {}px",
                    dim, height
                )));
            }
            let left = (width - dim) / 2;
            let top = (height - dim) / 2;
            CropBox {
                left,
                top,
                right: left + dim,
                bottom: top + dim,
            }
        }
        CropSpec::Margin(fraction) => margin_box(width, height, margin_for_fraction(width, fraction)?)?,
        CropSpec::MarginPixels(margin) => margin_box(width, height, margin)?,
    };

    debug!(
        "Resolved {} on {}x{} to box ({}, {}, {}, {})",
        spec, width, height, crop_box.left, crop_box.top, crop_box.right, crop_box.bottom
    );
    Ok(crop_box)
}
