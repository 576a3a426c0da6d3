//! Top-level window enumeration for click-to-select

use crate::{Rect, ScreenInfo};

/// Source of candidate window rectangles, topmost first.
pub trait WindowEnumerator {
    /// Window bounds in virtual-desktop coordinates.
    fn list_top_level_windows(&self) -> Vec<Rect>;
}

/// Windows considered for snapping on `screen`, in root coordinates.
///
/// Only the primary screen gets a list; on secondary screens the
/// selection snaps to the whole root instead. Rectangles are clipped to
/// the screen, windows entirely off-screen are dropped, order is kept.
pub fn session_windows(enumerator: &dyn WindowEnumerator, screen: &ScreenInfo) -> Vec<Rect> {
    if !screen.is_primary {
        return Vec::new();
    }

    enumerator
        .list_top_level_windows()
        .iter()
        .filter_map(|rect| screen.bounds.intersection(rect))
        .map(|rect| screen.to_root(&rect))
        .collect()
}

/// Platform enumerator.
pub fn default_enumerator() -> Box<dyn WindowEnumerator> {
    #[cfg(windows)]
    {
        Box::new(win32::Win32Windows)
    }
    #[cfg(not(windows))]
    {
        Box::new(XcapWindows)
    }
}

/// Minimum edge for a window to be worth snapping to.
const MIN_WINDOW_EDGE: i32 = 50;

/// Cross-platform enumeration through xcap.
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapWindows;

impl WindowEnumerator for XcapWindows {
    fn list_top_level_windows(&self) -> Vec<Rect> {
        let windows = match xcap::Window::all() {
            Ok(windows) => windows,
            Err(e) => {
                log::warn!("[CAPTURE] Window enumeration failed: {}", e);
                return Vec::new();
            }
        };

        windows
            .iter()
            .filter(|w| !w.is_minimized().unwrap_or(true))
            .map(|w| {
                Rect::new(
                    w.x().unwrap_or(0),
                    w.y().unwrap_or(0),
                    w.width().unwrap_or(0) as i32,
                    w.height().unwrap_or(0) as i32,
                )
            })
            .filter(|r| r.width > MIN_WINDOW_EDGE && r.height > MIN_WINDOW_EDGE)
            .collect()
    }
}

#[cfg(windows)]
mod win32 {
    use super::{WindowEnumerator, MIN_WINDOW_EDGE};
    use crate::Rect;
    use ::windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
    use ::windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_CLOAKED};
    use ::windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetAncestor, GetWindow, GetWindowLongW, GetWindowRect, IsIconic,
        IsWindowVisible, GA_ROOT, GWL_EXSTYLE, GWL_STYLE, GW_OWNER, WS_DISABLED,
        WS_EX_TOOLWINDOW,
    };

    /// `EnumWindows` walk in Z-order, skipping tool, cloaked and owned windows.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Win32Windows;

    impl WindowEnumerator for Win32Windows {
        fn list_top_level_windows(&self) -> Vec<Rect> {
            let mut rects: Vec<Rect> = Vec::new();
            unsafe {
                let _ = EnumWindows(
                    Some(collect_window),
                    LPARAM(&mut rects as *mut Vec<Rect> as isize),
                );
            }
            rects
        }
    }

    unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let rects = &mut *(lparam.0 as *mut Vec<Rect>);
        if let Some(rect) = snappable_rect(hwnd) {
            rects.push(rect);
        }
        BOOL(1)
    }

    unsafe fn snappable_rect(hwnd: HWND) -> Option<Rect> {
        if !IsWindowVisible(hwnd).as_bool() || IsIconic(hwnd).as_bool() {
            return None;
        }

        let style = GetWindowLongW(hwnd, GWL_STYLE) as u32;
        let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
        if style & WS_DISABLED.0 != 0 || ex_style & WS_EX_TOOLWINDOW.0 != 0 {
            return None;
        }

        // Windows parked on another virtual desktop report as cloaked.
        let mut cloaked: u32 = 0;
        if DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut _ as *mut _,
            std::mem::size_of::<u32>() as u32,
        )
        .is_ok()
            && cloaked != 0
        {
            return None;
        }

        if let Ok(owner) = GetWindow(hwnd, GW_OWNER) {
            if !owner.is_invalid() {
                return None;
            }
        }
        if GetAncestor(hwnd, GA_ROOT) != hwnd {
            return None;
        }

        let mut bounds = RECT::default();
        GetWindowRect(hwnd, &mut bounds).ok()?;
        let rect = Rect::new(
            bounds.left,
            bounds.top,
            bounds.right - bounds.left,
            bounds.bottom - bounds.top,
        );

        (rect.width > MIN_WINDOW_EDGE && rect.height > MIN_WINDOW_EDGE).then_some(rect)
    }
}
