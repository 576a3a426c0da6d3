//! Output formats selected by file extension

use crate::ExportResult;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;
use std::io::Write;

/// Extensions accepted for saving, lower case.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "pgm", "xbm", "xpm"];

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatKind {
    Png,
    Jpeg,
    Bmp,
    Pgm,
    Xbm,
    Xpm,
}

impl ImageFormatKind {
    /// Case-insensitive lookup; `None` for anything outside the supported set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "pgm" => Some(Self::Pgm),
            "xbm" => Some(Self::Xbm),
            "xpm" => Some(Self::Xpm),
            _ => None,
        }
    }

    /// Write `image` to `out`. `name` becomes the C identifier in XBM/XPM.
    pub fn encode<W: Write>(self, image: &RgbaImage, name: &str, out: &mut W) -> ExportResult<()> {
        let dynamic = DynamicImage::ImageRgba8(image.clone());
        match self {
            Self::Png => dynamic.write_with_encoder(PngEncoder::new(out))?,
            Self::Jpeg => DynamicImage::ImageRgb8(dynamic.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(out, JPEG_QUALITY))?,
            Self::Bmp => dynamic.write_with_encoder(BmpEncoder::new(out))?,
            Self::Pgm => DynamicImage::ImageLuma8(dynamic.to_luma8()).write_with_encoder(
                PnmEncoder::new(out).with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary)),
            )?,
            Self::Xbm => write_xbm(image, &c_identifier(name), out)?,
            Self::Xpm => write_xpm(image, &c_identifier(name), out)?,
        }
        Ok(())
    }
}

fn c_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn is_dark(pixel: &image::Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    if a < 128 {
        return false;
    }
    let luma = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
    luma < 128
}

/// X11 bitmap: one bit per pixel, dark pixels set, rows padded to a byte,
/// least significant bit first.
fn write_xbm<W: Write>(image: &RgbaImage, name: &str, out: &mut W) -> std::io::Result<()> {
    let (width, height) = image.dimensions();
    writeln!(out, "#define {}_width {}", name, width)?;
    writeln!(out, "#define {}_height {}", name, height)?;
    writeln!(out, "static char {}_bits[] = {{", name)?;

    let mut bytes = Vec::with_capacity(((width as usize + 7) / 8) * height as usize);
    for y in 0..height {
        for chunk_start in (0..width).step_by(8) {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = chunk_start + bit;
                if x < width && is_dark(image.get_pixel(x, y)) {
                    byte |= 1 << bit;
                }
            }
            bytes.push(byte);
        }
    }

    for (i, line) in bytes.chunks(12).enumerate() {
        let items: Vec<String> = line.iter().map(|b| format!("0x{:02x}", b)).collect();
        let last = (i + 1) * 12 >= bytes.len();
        writeln!(out, " {}{}", items.join(", "), if last { "" } else { "," })?;
    }
    writeln!(out, "}};")
}

/// Printable characters used for XPM colour codes, quotes and backslash excluded.
const XPM_CHARS: &[u8] =
    b".#abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+@$%&*=-;:>,<'[]{}|~^";

fn xpm_code(mut index: usize, chars_per_pixel: usize) -> String {
    let base = XPM_CHARS.len();
    let mut code = Vec::with_capacity(chars_per_pixel);
    for _ in 0..chars_per_pixel {
        code.push(XPM_CHARS[index % base]);
        index /= base;
    }
    String::from_utf8_lossy(&code).into_owned()
}

/// X11 pixmap with a palette of the distinct colours in the image.
/// Mostly transparent pixels map to `None`.
fn write_xpm<W: Write>(image: &RgbaImage, name: &str, out: &mut W) -> std::io::Result<()> {
    let (width, height) = image.dimensions();

    let key = |p: &image::Rgba<u8>| -> Option<[u8; 3]> {
        (p.0[3] >= 128).then_some([p.0[0], p.0[1], p.0[2]])
    };

    let mut palette: Vec<Option<[u8; 3]>> = Vec::new();
    let mut lookup: HashMap<Option<[u8; 3]>, usize> = HashMap::new();
    for pixel in image.pixels() {
        let k = key(pixel);
        if !lookup.contains_key(&k) {
            lookup.insert(k, palette.len());
            palette.push(k);
        }
    }

    let base = XPM_CHARS.len();
    let mut chars_per_pixel = 1;
    while base.pow(chars_per_pixel as u32) < palette.len().max(1) {
        chars_per_pixel += 1;
    }

    writeln!(out, "/* XPM */")?;
    writeln!(out, "static char *{}[] = {{", name)?;
    writeln!(out, "\"{} {} {} {}\",", width, height, palette.len(), chars_per_pixel)?;
    for (index, colour) in palette.iter().enumerate() {
        let value = match colour {
            Some([r, g, b]) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            None => "None".to_string(),
        };
        writeln!(out, "\"{} c {}\",", xpm_code(index, chars_per_pixel), value)?;
    }

    for y in 0..height {
        let row: String = (0..width)
            .map(|x| {
                let index = lookup.get(&key(image.get_pixel(x, y))).copied().unwrap_or(0);
                xpm_code(index, chars_per_pixel)
            })
            .collect();
        let sep = if y + 1 == height { "" } else { "," };
        writeln!(out, "\"{}\"{}", row, sep)?;
    }
    writeln!(out, "}};")
}
