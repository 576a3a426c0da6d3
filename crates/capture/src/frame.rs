//! Captured screen snapshots and cropping

use crate::{CaptureError, CaptureResult, Rect};
use image::RgbaImage;
use std::path::Path;

/// Full-screen pixels of one monitor, root-relative.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub image: RgbaImage,
}

impl Snapshot {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Bounds of the snapshot as a root rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Save as PNG
    pub fn save_png(&self, path: &Path) -> CaptureResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Crop to a root-relative rectangle.
    ///
    /// Parts of `rect` hanging off the snapshot are cut away; a rectangle
    /// with no area left after that is an error.
    pub fn crop(&self, rect: &Rect) -> CaptureResult<RgbaImage> {
        if rect.is_empty() {
            return Err(CaptureError::EmptyRect(*rect));
        }

        let visible = self
            .bounds()
            .intersection(rect)
            .ok_or(CaptureError::OutOfBounds {
                rect: *rect,
                width: self.width(),
                height: self.height(),
            })?;

        Ok(image::imageops::crop_imm(
            &self.image,
            visible.x as u32,
            visible.y as u32,
            visible.width as u32,
            visible.height as u32,
        )
        .to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> Snapshot {
        Snapshot::new(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, 0, 255])
        }))
    }

    #[test]
    fn crop_keeps_origin_pixels() {
        let snapshot = gradient(64, 48);
        let cropped = snapshot.crop(&Rect::new(5, 7, 10, 20)).unwrap();
        assert_eq!(cropped.dimensions(), (10, 20));
        assert_eq!(cropped.get_pixel(0, 0), &Rgba([5, 7, 0, 255]));
        assert_eq!(cropped.get_pixel(9, 19), &Rgba([14, 26, 0, 255]));
    }

    #[test]
    fn crop_cuts_overhang() {
        let snapshot = gradient(64, 48);
        let cropped = snapshot.crop(&Rect::new(60, 40, 10, 10)).unwrap();
        assert_eq!(cropped.dimensions(), (4, 8));
    }

    #[test]
    fn crop_rejects_zero_area() {
        let snapshot = gradient(64, 48);
        assert!(matches!(
            snapshot.crop(&Rect::new(5, 5, 0, 10)),
            Err(CaptureError::EmptyRect(_))
        ));
        assert!(matches!(
            snapshot.crop(&Rect::new(100, 100, 10, 10)),
            Err(CaptureError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn png_round_trip_through_temp_file() {
        let dir = std::env::temp_dir().join(format!("snaprect_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.png");

        let snapshot = gradient(16, 8);
        snapshot.save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, snapshot.image);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
