//! Keyboard micro-adjustment of a placed selection

use crate::RECORD_MIN_SIZE;
use capture::Rect;

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    S,
    C,
    Other,
}

impl Key {
    pub fn is_arrow(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Up | Key::Down)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        alt: false,
    };
}

fn grow(len: i32, by: i32, max: i32) -> i32 {
    (len + by).min(max).max(RECORD_MIN_SIZE)
}

/// Nudge, grow or shrink `rect` by one pixel.
///
/// Plain arrows move, Ctrl grows towards the arrow, exactly Ctrl+Shift
/// shrinks from that side. Non-arrow keys return `rect` unchanged.
pub fn micro_adjust(rect: Rect, key: Key, modifiers: Modifiers, root: &Rect) -> Rect {
    let mut out = rect;

    if modifiers == Modifiers::CTRL_SHIFT {
        match key {
            Key::Left => {
                out.x = (out.x + 1).max(0);
                out.width = grow(out.width, -1, root.width);
            }
            Key::Right => out.width = grow(out.width, -1, root.width),
            Key::Up => {
                out.y = (out.y + 1).max(0);
                out.height = grow(out.height, -1, root.height);
            }
            Key::Down => out.height = grow(out.height, -1, root.height),
            _ => {}
        }
    } else if modifiers.ctrl {
        match key {
            Key::Left => {
                out.x = (out.x - 1).max(0);
                out.width = grow(out.width, 1, root.width);
            }
            Key::Right => out.width = grow(out.width, 1, root.width),
            Key::Up => {
                out.y = (out.y - 1).max(0);
                out.height = grow(out.height, 1, root.height);
            }
            Key::Down => out.height = grow(out.height, 1, root.height),
            _ => {}
        }
    } else {
        match key {
            Key::Left => out.x = (out.x - 1).max(0),
            Key::Right => out.x = (out.x + 1).min(root.width - out.width),
            Key::Up => out.y = (out.y - 1).max(0),
            Key::Down => out.y = (out.y + 1).min(root.height - out.height),
            _ => {}
        }
    }

    out
}
