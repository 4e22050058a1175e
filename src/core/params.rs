use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BackdropColor, CropSpec, OutputSize, ResampleFilter};

fn default_idiom() -> String {
    "universal".to_string()
}

fn default_author() -> String {
    "xcode".to_string()
}

fn default_version() -> u32 {
    1
}

/// Crop parameters suitable for config files and scripted runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropParams {
    pub crop: CropSpec,
    #[serde(default)]
    pub size: OutputSize,
    #[serde(default)]
    pub filter: ResampleFilter,
}

impl CropParams {
    pub fn new(crop: CropSpec) -> Self {
        Self {
            crop,
            size: OutputSize::default(),
            filter: ResampleFilter::default(),
        }
    }
}

/// One asset-catalog destination: a directory, the image filename inside it,
/// the required resolution and the manifest entry fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTarget {
    pub platform: String,
    pub dir: PathBuf,
    pub filename: String,
    #[serde(default)]
    pub size: OutputSize,
    #[serde(default = "default_idiom")]
    pub idiom: String,
}

impl ExportTarget {
    pub fn new(
        platform: impl Into<String>,
        dir: impl Into<PathBuf>,
        filename: impl Into<String>,
        size: OutputSize,
    ) -> Self {
        Self {
            platform: platform.into(),
            dir: dir.into(),
            filename: filename.into(),
            size,
            idiom: default_idiom(),
        }
    }

    /// Target with the conventional `AppIcon-<W>.png` filename.
    pub fn with_default_filename(
        platform: impl Into<String>,
        dir: impl Into<PathBuf>,
        size: OutputSize,
    ) -> Self {
        let filename = format!("AppIcon-{}.png", size.width);
        Self::new(platform, dir, filename, size)
    }

    pub fn image_path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Flattening, resampling and manifest settings shared by every target of one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub backdrop: BackdropColor,
    pub filter: ResampleFilter,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            backdrop: BackdropColor::BLACK,
            filter: ResampleFilter::default(),
            author: default_author(),
            version: default_version(),
        }
    }
}

/// Export configuration loadable from a JSON file.
///
/// ```json
/// {
///   "backdrop": "#000000",
///   "targets": [
///     { "platform": "ios", "dir": "ios/App/App/Assets.xcassets/AppIcon.appiconset", "filename": "AppIcon-512@2x.png" },
///     { "platform": "watchos", "dir": "ios/App/Watch/Assets.xcassets/AppIcon.appiconset", "filename": "AppIcon-1024.png" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportPlan {
    #[serde(flatten)]
    pub options: ExportOptions,
    #[serde(default)]
    pub targets: Vec<ExportTarget>,
}

impl ExportPlan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::InvalidArgument {
                arg: "plan",
                value: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_json(&text)
    }
}
