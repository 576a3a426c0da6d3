//! Clipboard delivery

use crate::ExportResult;
use arboard::{Clipboard, ImageData};
use image::RgbaImage;
use std::borrow::Cow;

pub trait ClipboardSink {
    fn set_image(&mut self, image: &RgbaImage) -> ExportResult<()>;
}

/// System clipboard through arboard, opened on first use.
///
/// The handle is kept for the lifetime of the sink; on X11 the image is
/// only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_image(&mut self, image: &RgbaImage) -> ExportResult<()> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new()?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard.set_image(ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Borrowed(image.as_raw()),
        })?;
        log::info!(
            "[EXPORT] Copied {}x{} image to clipboard",
            image.width(),
            image.height()
        );
        Ok(())
    }
}
