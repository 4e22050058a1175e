//! High-level, ergonomic library API: crop a source to a file or an in-memory
//! image, export an icon into asset catalogs, and chain the two. Prefer these
//! entrypoints over the low-level processing modules when integrating iconprep.
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{info, warn};

use crate::core::params::{CropParams, ExportOptions, ExportPlan, ExportTarget};
use crate::core::processing::pipeline::conform_for_export;
use crate::error::{Error, Result};
use crate::io::writers::manifest::{Manifest, write_manifest};
use crate::io::writers::png::{ensure_dir, write_png};
use crate::io::{ensure_source_exists, load_image};
use crate::types::ColorMode;

pub use crate::core::processing::pipeline::crop_and_resize;

/// One target written by `export_icon`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedTarget {
    pub platform: String,
    pub image_path: PathBuf,
    pub manifest_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Result of a successful export, in target order
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub source_mode: ColorMode,
    pub targets: Vec<ExportedTarget>,
}

/// Load `input`, crop and resize it per `params`, and write a PNG to `output`.
/// Returns the in-memory result that was written.
pub fn crop_file_to_path(input: &Path, output: &Path, params: &CropParams) -> Result<DynamicImage> {
    let source = load_image(input)?;
    let cropped = crop_and_resize(&source, params.crop, params.size, params.filter)?;
    write_png(output, &cropped)?;
    info!("Successfully cropped {:?} -> {:?}", input, output);
    Ok(cropped)
}

/// Flatten, conform and write `image` into every target.
///
/// Each target directory gets one manifest listing the images written into
/// it, so several targets may share a directory as long as their filenames
/// differ. Targets are processed in order. A failing target aborts the call,
/// but targets already written stay on disk: the operation is not atomic.
pub fn export_icon(
    image: &DynamicImage,
    targets: &[ExportTarget],
    options: &ExportOptions,
) -> Result<ExportReport> {
    if targets.is_empty() {
        return Err(Error::InvalidArgument {
            arg: "targets",
            value: "[]".to_string(),
        });
    }
    for (i, target) in targets.iter().enumerate() {
        let path = target.image_path();
        if targets[..i].iter().any(|t| t.image_path() == path) {
            return Err(Error::InvalidArgument {
                arg: "targets",
                value: format!("duplicate image path {}", path.display()),
            });
        }
    }

    let source_mode = ColorMode::of(image);
    let mut written = Vec::with_capacity(targets.len());

    for (i, target) in targets.iter().enumerate() {
        let (conformed, _) =
            conform_for_export(image, options.backdrop, target.size, options.filter)?;

        ensure_dir(&target.dir)?;
        let image_path = target.image_path();
        write_png(&image_path, &conformed).inspect_err(|e| {
            warn!(
                "Export to {:?} failed after {} completed target(s): {}",
                image_path,
                written.len(),
                e
            )
        })?;

        // only images already on disk are listed
        let siblings = targets[..=i].iter().filter(|t| t.dir == target.dir);
        let manifest = Manifest::for_targets(siblings, &options.author, options.version);
        let manifest_path = write_manifest(&target.dir, &manifest)?;

        info!(
            "Exported {} icon {} to {:?}",
            target.platform, target.size, image_path
        );
        written.push(ExportedTarget {
            platform: target.platform.clone(),
            image_path,
            manifest_path,
            width: conformed.width(),
            height: conformed.height(),
        });
    }

    Ok(ExportReport {
        source_mode,
        targets: written,
    })
}

/// Check that `source` exists, load it and run `export_icon`.
pub fn export_file(
    source: &Path,
    targets: &[ExportTarget],
    options: &ExportOptions,
) -> Result<ExportReport> {
    ensure_source_exists(source)?;
    let image = load_image(source)?;
    export_icon(&image, targets, options)
}

/// Crop `input` to `output`, then export the cropped pixels if a plan is given.
pub fn run_pipeline(
    input: &Path,
    output: &Path,
    params: &CropParams,
    export: Option<&ExportPlan>,
) -> Result<Option<ExportReport>> {
    let cropped = crop_file_to_path(input, output, params)?;
    match export {
        Some(plan) => export_icon(&cropped, &plan.targets, &plan.options).map(Some),
        None => Ok(None),
    }
}
