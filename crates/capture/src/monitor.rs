//! Monitor discovery and session screen choice

use crate::{CaptureError, CaptureResult, Rect};
use xcap::Monitor;

/// The monitor a capture session runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenInfo {
    /// Position in `xcap::Monitor::all()` order.
    pub index: usize,
    pub name: String,
    /// Bounds in virtual-desktop coordinates.
    pub bounds: Rect,
    pub is_primary: bool,
}

impl ScreenInfo {
    /// Root rectangle: the screen bounds moved to the origin.
    pub fn root(&self) -> Rect {
        Rect::new(0, 0, self.bounds.width, self.bounds.height)
    }

    /// Convert virtual-desktop coordinates to root coordinates.
    pub fn to_root(&self, rect: &Rect) -> Rect {
        rect.translated(-self.bounds.x, -self.bounds.y)
    }

    pub(crate) fn monitor(&self) -> CaptureResult<Monitor> {
        Monitor::all()?
            .into_iter()
            .nth(self.index)
            .ok_or(CaptureError::NoMonitor)
    }
}

/// All monitors, in enumeration order.
pub fn screens() -> CaptureResult<Vec<ScreenInfo>> {
    let monitors = Monitor::all()?;
    Ok(monitors
        .iter()
        .enumerate()
        .map(|(index, monitor)| ScreenInfo {
            index,
            name: monitor.name().unwrap_or_else(|_| format!("Monitor {}", index)),
            bounds: Rect::new(
                monitor.x().unwrap_or(0),
                monitor.y().unwrap_or(0),
                monitor.width().unwrap_or(0) as i32,
                monitor.height().unwrap_or(0) as i32,
            ),
            is_primary: monitor.is_primary().unwrap_or(index == 0),
        })
        .collect())
}

/// Pick the screen for a new session.
///
/// The monitor under the cursor wins when it is a secondary one; otherwise
/// the primary monitor is used.
pub fn screen_for_session() -> CaptureResult<ScreenInfo> {
    let all = screens()?;
    choose_screen(&all, cursor_position()).ok_or(CaptureError::NoMonitor)
}

fn choose_screen(all: &[ScreenInfo], cursor: Option<(i32, i32)>) -> Option<ScreenInfo> {
    let under_cursor = cursor.and_then(|(x, y)| all.iter().find(|s| s.bounds.contains(x, y)));
    if let Some(screen) = under_cursor {
        if !screen.is_primary {
            return Some(screen.clone());
        }
    }
    all.iter()
        .find(|s| s.is_primary)
        .or_else(|| all.first())
        .cloned()
}

#[cfg(windows)]
fn cursor_position() -> Option<(i32, i32)> {
    use ::windows::Win32::Foundation::POINT;
    use ::windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }.ok()?;
    Some((point.x, point.y))
}

#[cfg(not(windows))]
fn cursor_position() -> Option<(i32, i32)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<ScreenInfo> {
        vec![
            ScreenInfo {
                index: 0,
                name: "left".into(),
                bounds: Rect::new(-1280, 0, 1280, 1024),
                is_primary: false,
            },
            ScreenInfo {
                index: 1,
                name: "main".into(),
                bounds: Rect::new(0, 0, 1920, 1080),
                is_primary: true,
            },
        ]
    }

    #[test]
    fn secondary_under_cursor_is_chosen() {
        let chosen = choose_screen(&layout(), Some((-100, 10))).unwrap();
        assert_eq!(chosen.name, "left");
        assert_eq!(chosen.root(), Rect::new(0, 0, 1280, 1024));
    }

    #[test]
    fn falls_back_to_primary() {
        assert_eq!(choose_screen(&layout(), Some((50, 50))).unwrap().name, "main");
        assert_eq!(choose_screen(&layout(), None).unwrap().name, "main");
        assert!(choose_screen(&[], None).is_none());
    }

    #[test]
    fn to_root_removes_screen_offset() {
        let left = &layout()[0];
        assert_eq!(
            left.to_root(&Rect::new(-1200, 20, 300, 200)),
            Rect::new(80, 20, 300, 200)
        );
    }
}
