use std::path::Path;

use image::DynamicImage;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Fail with `SourceNotFound` when `path` does not point at a file.
pub fn ensure_source_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        warn!("Source image not found: {:?}", path);
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Decode a bitmap fully into memory. The format is guessed from the content.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let load_err = |source: image::ImageError| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    let img = image::ImageReader::open(path)
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)?;

    info!(
        "Loaded {:?}: {}x{} {:?}",
        path,
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        assert!(matches!(
            ensure_source_exists(&path),
            Err(Error::SourceNotFound { .. })
        ));
        assert!(matches!(load_image(&path), Err(Error::ImageLoad { .. })));
    }

    #[test]
    fn undecodable_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(ensure_source_exists(&path).is_ok());
        assert!(matches!(load_image(&path), Err(Error::ImageLoad { .. })));
    }
}
