//! Encode and write an image to disk

use crate::format::ImageFormatKind;
use crate::{ExportError, ExportResult};
use image::RgbaImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything after the first dot of the file name, so `shot.tar.png`
/// gives `tar.png`. `None` when there is no suffix.
pub fn complete_suffix(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    match name.split_once('.') {
        Some((_, suffix)) if !suffix.is_empty() => Some(suffix),
        _ => None,
    }
}

/// Final path and encoder for a requested path.
///
/// No suffix appends `.png`; a suffix outside the supported set is an
/// `InvalidDestination`.
pub fn target_with_format(path: &Path) -> ExportResult<(PathBuf, ImageFormatKind)> {
    match complete_suffix(path) {
        None => {
            let mut with_ext = path.as_os_str().to_owned();
            with_ext.push(".png");
            Ok((PathBuf::from(with_ext), ImageFormatKind::Png))
        }
        Some(ext) => ImageFormatKind::from_extension(ext)
            .map(|kind| (path.to_path_buf(), kind))
            .ok_or_else(|| ExportError::InvalidDestination(path.to_path_buf())),
    }
}

/// Write `image` to `path` with the encoder its extension names.
pub fn save_image(image: &RgbaImage, path: &Path) -> ExportResult<PathBuf> {
    let (target, kind) = target_with_format(path)?;
    let name = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_owned();

    let mut out = BufWriter::new(File::create(&target)?);
    kind.encode(image, &name, &mut out)?;
    out.flush()?;

    log::info!(
        "[EXPORT] Saved {}x{} {:?} to {}",
        image.width(),
        image.height(),
        kind,
        target.display()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snaprect_writer_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn image() -> RgbaImage {
        RgbaImage::from_pixel(12, 8, Rgba([10, 120, 200, 255]))
    }

    #[test]
    fn missing_extension_gets_png() {
        let dir = temp_dir();
        let written = save_image(&image(), &dir.join("shot")).unwrap();
        assert_eq!(written, dir.join("shot.png"));
        let loaded = image::open(&written).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (12, 8));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn explicit_extension_picks_encoder() {
        let dir = temp_dir();
        let written = save_image(&image(), &dir.join("shot.BMP")).unwrap();
        assert_eq!(written, dir.join("shot.BMP"));
        let loaded = image::load_from_memory_with_format(
            &std::fs::read(&written).unwrap(),
            image::ImageFormat::Bmp,
        )
        .unwrap();
        assert_eq!(loaded.width(), 12);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn suffix_is_taken_after_the_first_dot() {
        assert_eq!(complete_suffix(Path::new("/a/shot.png")), Some("png"));
        assert_eq!(complete_suffix(Path::new("/a.b/shot.tar.png")), Some("tar.png"));
        assert_eq!(complete_suffix(Path::new("/a.b/shot")), None);
        assert!(matches!(
            target_with_format(Path::new("/a/shot.tar.png")),
            Err(ExportError::InvalidDestination(_))
        ));
    }

    #[test]
    fn unsupported_extension_aborts_without_a_file() {
        let dir = temp_dir();
        let target = dir.join("shot.gif");
        let result = save_image(&image(), &target);
        assert!(matches!(result, Err(ExportError::InvalidDestination(_))));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
        std::fs::remove_dir_all(dir).ok();
    }
}
