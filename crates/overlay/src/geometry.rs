//! Hit testing of the pointer against the selection frame

use crate::SPACING;
use capture::Rect;

/// Region of the selection the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Moving,
    Outside,
}

impl Direction {
    /// The eight resize handles.
    pub const HANDLES: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
    ];

    pub fn is_handle(self) -> bool {
        !matches!(self, Direction::Moving | Direction::Outside)
    }
}

/// `value` lies strictly within `SPACING` of `edge`.
fn near(value: i32, edge: i32) -> bool {
    value > edge - SPACING && value < edge + SPACING
}

/// Resolve which of the nine regions `(x, y)` falls in.
///
/// Corners are tested before edges and edges before the interior: the
/// corner windows overlap the edge bands, which overlap the interior.
/// Edge bands only look at their own axis.
pub fn resolve(x: i32, y: i32, rect: &Rect) -> Direction {
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    if near(x, left) && near(y, top) {
        Direction::TopLeft
    } else if near(x, right) && near(y, bottom) {
        Direction::BottomRight
    } else if near(x, right) && near(y, top) {
        Direction::TopRight
    } else if near(x, left) && near(y, bottom) {
        Direction::BottomLeft
    } else if near(x, left) {
        Direction::Left
    } else if near(x, right) {
        Direction::Right
    } else if near(y, top) {
        Direction::Top
    } else if near(y, bottom) {
        Direction::Bottom
    } else if rect.contains_strict(x, y) {
        Direction::Moving
    } else {
        Direction::Outside
    }
}
