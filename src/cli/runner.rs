use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use iconprep::{
    CropParams, CropSpec, ExportPlan, ExportReport, ExportTarget, OutputSize, ResampleFilter,
    crop_file_to_path, export_file, run_pipeline,
};

use super::args::{
    CliArgs, Command, CropArgs, CropGeometryArgs, ExportArgs, ExportTargetArgs, PipelineArgs,
};
use super::errors::AppError;

/// Parse `1024` (square) or `1024x768`.
pub fn parse_size(size: &str) -> Result<OutputSize, AppError> {
    let invalid = || AppError::InvalidSize {
        size: size.to_string(),
    };
    let trimmed = size.trim();
    let (width, height) = match trimmed.split_once(['x', 'X']) {
        Some((w, h)) => (
            w.trim().parse::<u32>().map_err(|_| invalid())?,
            h.trim().parse::<u32>().map_err(|_| invalid())?,
        ),
        None => {
            let side = trimmed.parse::<u32>().map_err(|_| invalid())?;
            (side, side)
        }
    };

    if width == 0 || height == 0 {
        return Err(AppError::ZeroSize {
            size: size.to_string(),
        });
    }

    Ok(OutputSize { width, height })
}

/// Parse `PLATFORM=DIR` or `PLATFORM=DIR/FILENAME.png`.
pub fn parse_target(spec: &str, size: OutputSize) -> Result<ExportTarget, AppError> {
    let invalid = || AppError::InvalidTarget {
        target: spec.to_string(),
    };
    let (platform, path) = spec.split_once('=').ok_or_else(invalid)?;
    let platform = platform.trim();
    if platform.is_empty() || path.is_empty() {
        return Err(invalid());
    }

    let path = PathBuf::from(path);
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));

    if is_png {
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(invalid)?
            .to_string();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(ExportTarget::new(platform, dir, filename, size))
    } else {
        Ok(ExportTarget::with_default_filename(platform, path, size))
    }
}

fn crop_spec(geometry: &CropGeometryArgs) -> Result<CropSpec, AppError> {
    match (geometry.fraction, geometry.margin, geometry.margin_px) {
        (Some(f), None, None) => Ok(CropSpec::Fraction(f)),
        (None, Some(m), None) => Ok(CropSpec::Margin(m)),
        (None, None, Some(px)) => Ok(CropSpec::MarginPixels(px)),
        _ => Err(AppError::MissingArgument {
            arg: "exactly one of --fraction, --margin, --margin-px".to_string(),
        }),
    }
}

fn crop_params(args: &CropArgs) -> Result<CropParams, AppError> {
    Ok(CropParams {
        crop: crop_spec(&args.geometry)?,
        size: parse_size(&args.size)?,
        filter: args.filter.unwrap_or_default(),
    })
}

/// Merge the optional plan file with command line targets and overrides.
fn build_plan(
    args: &ExportTargetArgs,
    size: OutputSize,
    filter: Option<ResampleFilter>,
) -> Result<ExportPlan, AppError> {
    let mut plan = match &args.plan {
        Some(path) => {
            info!("Loading export plan: {:?}", path);
            ExportPlan::from_file(path)?
        }
        None => ExportPlan::default(),
    };

    if let Some(backdrop) = args.backdrop {
        plan.options.backdrop = backdrop;
    }
    if let Some(filter) = filter {
        plan.options.filter = filter;
    }
    if let Some(author) = &args.author {
        plan.options.author = author.clone();
    }
    if let Some(version) = args.manifest_version {
        plan.options.version = version;
    }
    for spec in &args.targets {
        plan.targets.push(parse_target(spec, size)?);
    }

    Ok(plan)
}

fn log_report(report: &ExportReport) {
    info!("Source color mode: {}", report.source_mode);
    for target in &report.targets {
        info!(
            "{}: {:?} ({}x{}), manifest {:?}",
            target.platform, target.image_path, target.width, target.height, target.manifest_path
        );
    }
}

fn run_crop(args: &CropArgs) -> Result<(), AppError> {
    let params = crop_params(args)?;
    info!(
        "Cropping {:?} with {} to {} ({})",
        args.input, params.crop, params.size, params.filter
    );
    crop_file_to_path(&args.input, &args.output, &params)?;
    Ok(())
}

fn run_export(args: &ExportArgs) -> Result<(), AppError> {
    let size = parse_size(&args.size)?;
    let plan = build_plan(&args.export, size, args.filter)?;
    if plan.targets.is_empty() {
        return Err(AppError::MissingArgument {
            arg: "--target or --plan with targets".to_string(),
        });
    }

    let report = export_file(&args.input, &plan.targets, &plan.options)?;
    log_report(&report);
    info!(
        "Successfully exported {:?} to {} target(s)",
        args.input,
        report.targets.len()
    );
    Ok(())
}

/// Crop parameters and export plan for `pipeline`. An explicit `--filter`
/// applies to both stages; otherwise the plan's filter is kept.
fn pipeline_inputs(args: &PipelineArgs) -> Result<(CropParams, ExportPlan), AppError> {
    let params = crop_params(&args.crop)?;
    let plan = build_plan(&args.export, params.size, args.crop.filter)?;
    Ok((params, plan))
}

fn run_pipeline_command(args: &PipelineArgs) -> Result<(), AppError> {
    let (params, plan) = pipeline_inputs(args)?;
    let export = if plan.targets.is_empty() {
        info!("No export targets given; stopping after crop");
        None
    } else {
        Some(&plan)
    };

    if let Some(report) = run_pipeline(&args.crop.input, &args.crop.output, &params, export)? {
        log_report(&report);
    }
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("iconprep=debug"))
        .init();
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    match &args.command {
        Command::Crop(crop) => run_crop(crop)?,
        Command::Export(export) => run_export(export)?,
        Command::Pipeline(pipeline) => run_pipeline_command(pipeline)?,
    }

    Ok(())
}
