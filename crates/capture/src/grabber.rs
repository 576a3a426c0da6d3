//! Pixel grabbing for a rectangle of a screen

use crate::{paths, CaptureResult, Rect, ScreenInfo, Snapshot};
use image::RgbaImage;

/// Grab the pixels of `rect` (root-relative) on `screen`.
pub trait PixelGrabber {
    fn grab(&self, screen: &ScreenInfo, rect: &Rect) -> CaptureResult<RgbaImage>;
}

/// Live capture of the monitor through xcap.
///
/// Every grab re-captures the whole screen, stores it as the session's
/// full-screen temp file, then crops and stores the selection temp file.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorGrabber;

impl MonitorGrabber {
    /// Capture the full screen without cropping.
    pub fn capture_screen(&self, screen: &ScreenInfo) -> CaptureResult<Snapshot> {
        let image = screen.monitor()?.capture_image()?;
        let snapshot = Snapshot::new(image);
        if let Err(e) = snapshot.save_png(paths::fullscreen_file()) {
            log::warn!("[CAPTURE] Could not store full-screen snapshot: {}", e);
        }
        Ok(snapshot)
    }
}

impl PixelGrabber for MonitorGrabber {
    fn grab(&self, screen: &ScreenInfo, rect: &Rect) -> CaptureResult<RgbaImage> {
        let snapshot = self.capture_screen(screen)?;
        let cropped = snapshot.crop(rect)?;
        cropped.save_with_format(paths::selection_file(), image::ImageFormat::Png)?;
        log::debug!(
            "[CAPTURE] Grabbed {}x{} at ({}, {}) on {}",
            cropped.width(),
            cropped.height(),
            rect.x,
            rect.y,
            screen.name
        );
        Ok(cropped)
    }
}

/// Crops an already captured snapshot; the screen argument is ignored.
#[derive(Debug, Clone)]
pub struct SnapshotGrabber {
    snapshot: Snapshot,
}

impl SnapshotGrabber {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl PixelGrabber for SnapshotGrabber {
    fn grab(&self, _screen: &ScreenInfo, rect: &Rect) -> CaptureResult<RgbaImage> {
        self.snapshot.crop(rect)
    }
}
