use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::DynamicImage;
use image::codecs::png::PngEncoder;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};

/// Create `dir` and its parents; succeeds silently if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))
}

/// Encode `img` as PNG at `output`, creating the parent directory if needed.
///
/// The image is encoded into a temporary file next to `output` and renamed
/// into place, so a failed write never leaves a truncated PNG behind.
pub fn write_png(output: &Path, img: &DynamicImage) -> Result<()> {
    let parent = match output.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            ensure_dir(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(parent).map_err(|e| Error::write(output, e))?;
    let mut writer = BufWriter::new(tmp);
    img.write_with_encoder(PngEncoder::new(&mut writer))
        .map_err(|e| Error::write(output, std::io::Error::other(e)))?;
    writer.flush().map_err(|e| Error::write(output, e))?;
    let tmp = writer
        .into_inner()
        .map_err(|e| Error::write(output, e.into_error()))?;
    tmp.persist(output)
        .map_err(|e| Error::write(output, e.error))?;

    info!(
        "Wrote PNG {:?} ({}x{})",
        output,
        img.width(),
        img.height()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_into_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/icon.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([5, 6, 7])));

        write_png(&path, &img).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(*back.get_pixel(2, 1), Rgb([5, 6, 7]));
        assert_eq!(dir_entries(&dir.path().join("a/b/c")), ["icon.png"]);
    }

    #[test]
    fn failed_encode_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        fs::write(&path, b"previous").unwrap();

        // the PNG encoder refuses zero-width images
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = write_png(&path, &empty).unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"previous");
        assert_eq!(dir_entries(dir.path()), ["icon.png"]);
    }

    #[test]
    fn output_that_is_a_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        fs::create_dir(&path).unwrap();
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));

        let err = write_png(&path, &img).unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
        assert!(path.is_dir());
        assert_eq!(dir_entries(dir.path()), ["icon.png"]);
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("x/y");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
