//! Lossy quality reduction by down-and-up scaling

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Reduce detail for `quality` below 100.
///
/// The image is scaled by `quality * 5 / 1000 + 0.5` and back with
/// nearest-neighbour sampling. Quality is capped at 100, where the image
/// is returned untouched.
pub fn apply_quality(image: RgbaImage, quality: i64) -> RgbaImage {
    let quality = quality.min(100);
    if quality == 100 {
        return image;
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image;
    }

    let factor = quality as f64 * 5.0 / 1000.0 + 0.5;
    let scaled_w = ((width as f64 * factor) as u32).max(1);
    let scaled_h = ((height as f64 * factor) as u32).max(1);

    let small = imageops::resize(&image, scaled_w, scaled_h, FilterType::Nearest);
    imageops::resize(&small, width, height, FilterType::Nearest)
}
