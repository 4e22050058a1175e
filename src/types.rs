//! Shared types used across iconprep.
//! Includes `CropSpec`, `OutputSize`, `ResampleFilter`, `BackdropColor` and `ColorMode`.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How much of the source to keep, measured against the source width.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "kebab-case")]
pub enum CropSpec {
    /// Square crop of `round(width * f)` pixels, centered. `f` in (0, 1].
    Fraction(f64),
    /// Symmetric margin of `round(width * f)` pixels on every side. `f` in [0, 0.5).
    Margin(f64),
    /// Symmetric margin given directly in pixels.
    MarginPixels(u32),
}

impl std::fmt::Display for CropSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropSpec::Fraction(v) => write!(f, "Fraction({})", v),
            CropSpec::Margin(v) => write!(f, "Margin({})", v),
            CropSpec::MarginPixels(px) => write!(f, "MarginPixels({}px)", px),
        }
    }
}

/// Exact pixel dimensions of an output image.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Logical size string used in asset-catalog manifests, e.g. `1024x1024`.
    pub fn logical(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self::square(1024)
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    Mitchell,
    #[default]
    Lanczos3,
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResampleFilter::Nearest => "Nearest",
            ResampleFilter::Bilinear => "Bilinear",
            ResampleFilter::CatmullRom => "CatmullRom",
            ResampleFilter::Mitchell => "Mitchell",
            ResampleFilter::Lanczos3 => "Lanczos3",
        };
        write!(f, "{}", s)
    }
}

/// Whether an image carries transparency that must be flattened before export.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ColorMode {
    Opaque,
    Transparent,
}

impl ColorMode {
    pub fn of(image: &image::DynamicImage) -> Self {
        if image.color().has_alpha() {
            ColorMode::Transparent
        } else {
            ColorMode::Opaque
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Opaque => write!(f, "Opaque"),
            ColorMode::Transparent => write!(f, "Transparent"),
        }
    }
}

/// Opaque color composited beneath transparent pixels.
///
/// Parses from `#rrggbb`, `rrggbb` or `r,g,b`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackdropColor(pub [u8; 3]);

impl BackdropColor {
    pub const BLACK: BackdropColor = BackdropColor([0, 0, 0]);
    pub const WHITE: BackdropColor = BackdropColor([255, 255, 255]);
}

impl FromStr for BackdropColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "backdrop",
            value: s.to_string(),
        };
        let trimmed = s.trim();

        if trimmed.contains(',') {
            let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(invalid());
            }
            let mut rgb = [0u8; 3];
            for (slot, part) in rgb.iter_mut().zip(&parts) {
                *slot = part.parse::<u8>().map_err(|_| invalid())?;
            }
            return Ok(BackdropColor(rgb));
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(BackdropColor([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for BackdropColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BackdropColor> for String {
    fn from(color: BackdropColor) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for BackdropColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}
