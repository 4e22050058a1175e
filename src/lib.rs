#![doc = r#"
iconprep — center-crop, flatten and export application icons.

This crate turns a generated or hand-drawn bitmap into the icon files an app
and its companion watch app expect: it crops a centered box out of the source,
resizes it back to a fixed resolution, flattens any transparency onto an opaque
backdrop, and writes the result into one or more asset-catalog directories,
each with its own `Contents.json` manifest. It powers the `iconprep` CLI and can
be embedded in your own build scripts.

Crop a file to a new file
-------------------------
```rust,no_run
use std::path::Path;
use iconprep::{crop_file_to_path, CropParams, CropSpec, OutputSize, ResampleFilter};

fn main() -> iconprep::Result<()> {
    let params = CropParams {
        crop: CropSpec::Margin(0.16),
        size: OutputSize::square(1024),
        filter: ResampleFilter::Lanczos3,
    };

    crop_file_to_path(
        Path::new("art/app_icon_raw.png"),
        Path::new("art/app_icon_flush.png"),
        &params,
    )?;
    Ok(())
}
```

Crop in memory
--------------
```rust
use image::{DynamicImage, Rgb, RgbImage};
use iconprep::{crop_and_resize, CropSpec, OutputSize, ResampleFilter};

let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([20, 30, 40])));
let icon = crop_and_resize(
    &source,
    CropSpec::Fraction(0.5),
    OutputSize::square(48),
    ResampleFilter::CatmullRom,
)
.unwrap();
assert_eq!((icon.width(), icon.height()), (48, 48));
```

Export into asset catalogs
--------------------------
```rust,no_run
use std::path::Path;
use iconprep::{export_file, ExportOptions, ExportTarget, OutputSize};

fn main() -> iconprep::Result<()> {
    let targets = vec![
        ExportTarget::new(
            "ios",
            "ios/App/App/Assets.xcassets/AppIcon.appiconset",
            "AppIcon-512@2x.png",
            OutputSize::square(1024),
        ),
        ExportTarget::new(
            "watchos",
            "ios/App/Watch App/Assets.xcassets/AppIcon.appiconset",
            "AppIcon-1024.png",
            OutputSize::square(1024),
        ),
    ];

    let report = export_file(Path::new("app_icon.png"), &targets, &ExportOptions::default())?;
    for target in &report.targets {
        println!("{} -> {:?}", target.platform, target.image_path);
    }
    Ok(())
}
```

Exports are not atomic across targets: if the second target fails, the first
one stays written.

Error handling
--------------
All public functions return `iconprep::Result<T>`; match on `iconprep::Error`
to handle specific cases.

```rust,no_run
use std::path::Path;
use iconprep::{export_file, Error, ExportOptions, ExportTarget, OutputSize};

fn main() {
    let targets = [ExportTarget::with_default_filename("ios", "out/ios", OutputSize::square(1024))];
    match export_file(Path::new("/missing.png"), &targets, &ExportOptions::default()) {
        Ok(_) => {}
        Err(Error::SourceNotFound { path }) => eprintln!("{} not found", path.display()),
        Err(Error::Write { path, source }) => eprintln!("cannot write {}: {source}", path.display()),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`types`] — crop specs, sizes, filters and colors.
- [`io`] — image loading, PNG and manifest writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{CropParams, ExportOptions, ExportPlan, ExportTarget};
pub use crate::core::processing::crop::{CropBox, resolve_crop_box};
pub use error::{Error, Result};
pub use types::{BackdropColor, ColorMode, CropSpec, OutputSize, ResampleFilter};

// Writers
pub use io::writers::manifest::{MANIFEST_FILE_NAME, Manifest, ManifestImage, ManifestInfo};

// High-level API re-exports
pub use api::{
    ExportReport, ExportedTarget, crop_and_resize, crop_file_to_path, export_file, export_icon,
    run_pipeline,
};
