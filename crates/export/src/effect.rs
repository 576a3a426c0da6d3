//! Whole-image blur and mosaic

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Downscale divisor shared by both effects.
const RADIUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Blur,
    Mosaic,
}

impl Effect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blur" => Some(Effect::Blur),
            "mosaic" => Some(Effect::Mosaic),
            _ => None,
        }
    }

    /// Shrink by `RADIUS` with smoothing, then scale back. Blur smooths
    /// on the way up too; mosaic keeps the blocks.
    pub fn apply(self, image: &RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return image.clone();
        }

        let small = imageops::resize(
            image,
            (width / RADIUS).max(1),
            (height / RADIUS).max(1),
            FilterType::Triangle,
        );
        let up = match self {
            Effect::Blur => FilterType::Triangle,
            Effect::Mosaic => FilterType::Nearest,
        };
        imageops::resize(&small, width, height, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn effects_keep_dimensions() {
        let image = checker(64, 48);
        assert_eq!(Effect::Blur.apply(&image).dimensions(), (64, 48));
        assert_eq!(Effect::Mosaic.apply(&image).dimensions(), (64, 48));
    }

    #[test]
    fn mosaic_produces_uniform_blocks() {
        let image = RgbaImage::from_fn(40, 40, |x, _| Rgba([(x * 6) as u8, 0, 0, 255]));
        let out = Effect::Mosaic.apply(&image);
        // 40 / 10 = 4 source pixels, each upscaled to a 10 pixel block.
        assert_eq!(out.get_pixel(0, 0), out.get_pixel(9, 0));
        assert_eq!(out.get_pixel(10, 5), out.get_pixel(19, 5));
    }

    #[test]
    fn tiny_images_survive() {
        let image = checker(3, 2);
        assert_eq!(Effect::Blur.apply(&image).dimensions(), (3, 2));
    }

    #[test]
    fn names() {
        assert_eq!(Effect::from_name("blur"), Some(Effect::Blur));
        assert_eq!(Effect::from_name("mosaic"), Some(Effect::Mosaic));
        assert_eq!(Effect::from_name("sepia"), None);
    }
}
