//! Screen capture module for SnapRect
//!
//! Provides screen geometry, pixel grabbing and top-level window enumeration.

pub mod frame;
pub mod grabber;
pub mod monitor;
pub mod paths;
pub mod window_list;

pub use frame::Snapshot;
pub use grabber::{MonitorGrabber, PixelGrabber, SnapshotGrabber};
pub use monitor::{screen_for_session, ScreenInfo};
pub use window_list::{default_enumerator, session_windows, WindowEnumerator, XcapWindows};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Screen capture failed: {0}")]
    Grab(String),

    #[error("No monitor found")]
    NoMonitor,

    #[error("Requested rectangle {0:?} has no area")]
    EmptyRect(Rect),

    #[error("Requested rectangle {rect:?} lies outside a {width}x{height} screen")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<xcap::XCapError> for CaptureError {
    fn from(err: xcap::XCapError) -> Self {
        CaptureError::Grab(err.to_string())
    }
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Axis-aligned rectangle in physical pixels.
///
/// Width and height are signed so that the selection arithmetic
/// (offsets, clamps against the root size) stays in one integer domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanned by two opposite corners, in any drag direction.
    pub fn from_corners(ax: i32, ay: i32, bx: i32, by: i32) -> Self {
        Self {
            x: ax.min(bx),
            y: ay.min(by),
            width: (ax - bx).abs(),
            height: (ay - by).abs(),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment: left/top edges inclusive.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Strict containment: the pointer must be inside every edge.
    pub fn contains_strict(&self, x: i32, y: i32) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink (positive) or grow (negative) every edge by `by` pixels.
    pub fn inset(&self, by: i32) -> Rect {
        Rect::new(
            self.x + by,
            self.y + by,
            self.width - 2 * by,
            self.height - 2 * by,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_normalizes_any_drag_direction() {
        assert_eq!(Rect::from_corners(120, 220, 20, 20), Rect::new(20, 20, 100, 200));
        assert_eq!(Rect::from_corners(20, 220, 120, 20), Rect::new(20, 20, 100, 200));
    }

    #[test]
    fn strict_containment_excludes_edges() {
        let r = Rect::new(10, 10, 100, 100);
        assert!(r.contains(10, 10));
        assert!(!r.contains_strict(10, 10));
        assert!(r.contains_strict(11, 11));
        assert!(!r.contains_strict(110, 50));
    }

    #[test]
    fn intersection_clips_to_overlap() {
        let screen = Rect::new(0, 0, 1920, 1080);
        let window = Rect::new(-50, 1000, 400, 300);
        assert_eq!(screen.intersection(&window), Some(Rect::new(0, 1000, 350, 80)));
        assert_eq!(screen.intersection(&Rect::new(2000, 0, 10, 10)), None);
    }
}
