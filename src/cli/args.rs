use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use iconprep::{BackdropColor, ResampleFilter};

#[derive(Parser)]
#[command(name = "iconprep", version, about = "iconprep CLI")]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Crop a centered box out of a bitmap and resize it to a fixed size
    Crop(CropArgs),
    /// Flatten an icon and write it into one or more asset-catalog directories
    Export(ExportArgs),
    /// Crop, then export the cropped result
    Pipeline(PipelineArgs),
}

/// Exactly one of these selects the crop geometry
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct CropGeometryArgs {
    /// Keep a centered square of round(width * F) pixels, F in (0, 1]
    #[arg(long, value_name = "F")]
    pub fraction: Option<f64>,

    /// Drop round(width * F) pixels from every side, F in [0, 0.5)
    #[arg(long, value_name = "F")]
    pub margin: Option<f64>,

    /// Drop N pixels from every side
    #[arg(long, value_name = "N")]
    pub margin_px: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct CropArgs {
    /// Input bitmap
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub geometry: CropGeometryArgs,

    /// Output size. Options:
    /// - Square: any positive integer (e.g., 1024)
    /// - Explicit: WIDTHxHEIGHT (e.g., 1024x768)
    #[arg(long, default_value = "1024")]
    pub size: String,

    /// Resampling filter used for the final resize (default lanczos3). In a
    /// pipeline it also overrides the export plan's filter
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExportTargetArgs {
    /// Export target as PLATFORM=DIR or PLATFORM=DIR/FILENAME.png (repeatable).
    /// With a bare directory the image is named AppIcon-<width>.png
    #[arg(long = "target", value_name = "PLATFORM=PATH")]
    pub targets: Vec<String>,

    /// JSON export plan with backdrop, filter, manifest info and targets
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Backdrop color for transparent pixels (#rrggbb or r,g,b); default black
    #[arg(long)]
    pub backdrop: Option<BackdropColor>,

    /// Manifest author field
    #[arg(long)]
    pub author: Option<String>,

    /// Manifest version field
    #[arg(long)]
    pub manifest_version: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Source icon
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub export: ExportTargetArgs,

    /// Resolution of targets given with --target (same syntax as crop --size)
    #[arg(long, default_value = "1024")]
    pub size: String,

    /// Resampling filter used when the icon must be resized
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    #[command(flatten)]
    pub crop: CropArgs,

    #[command(flatten)]
    pub export: ExportTargetArgs,
}
