//! Asset-catalog `Contents.json` manifests.
//!
//! Each export directory owns exactly one manifest listing the images this
//! export wrote into it. Writing always replaces the whole file; nothing from
//! a previous manifest is merged in.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::ExportTarget;
use crate::error::{Error, Result};

pub const MANIFEST_FILE_NAME: &str = "Contents.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestImage {
    pub filename: String,
    pub idiom: String,
    pub platform: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub author: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ManifestImage>,
    pub info: ManifestInfo,
}

impl Manifest {
    pub fn for_target(target: &ExportTarget, author: &str, version: u32) -> Self {
        Self::for_targets([target], author, version)
    }

    /// One entry per target, in the order given.
    pub fn for_targets<'a>(
        targets: impl IntoIterator<Item = &'a ExportTarget>,
        author: &str,
        version: u32,
    ) -> Self {
        Self {
            images: targets
                .into_iter()
                .map(|target| ManifestImage {
                    filename: target.filename.clone(),
                    idiom: target.idiom.clone(),
                    platform: target.platform.clone(),
                    size: target.size.logical(),
                })
                .collect(),
            info: ManifestInfo {
                author: author.to_string(),
                version,
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Write `manifest` to `dir/Contents.json`, truncating any existing file.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = manifest_path(dir);
    let json = manifest.to_json()?;
    std::fs::write(&path, json).map_err(|e| Error::write(&path, e))?;
    info!("Wrote manifest {:?}", path);
    Ok(path)
}
