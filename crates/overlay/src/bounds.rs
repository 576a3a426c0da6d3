//! Size floors and root-bounds clamping for the selection

use crate::geometry::Direction;
use crate::RECORD_MIN_SIZE;
use capture::Rect;

/// Pointer position and selection captured when an adjusting press starts.
///
/// Resizes and moves are computed from this snapshot rather than from the
/// previous frame, so replaying a pointer position gives the same rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAnchor {
    pub start_x: i32,
    pub start_y: i32,
    pub record: Rect,
}

impl DragAnchor {
    pub fn new(start_x: i32, start_y: i32, record: Rect) -> Self {
        Self {
            start_x,
            start_y,
            record,
        }
    }
}

/// Apply one single-edge rule, leaving the other axis of `rect` untouched.
fn resize_edge(edge: Direction, rect: Rect, anchor: &DragAnchor, x: i32, y: i32, root: &Rect) -> Rect {
    let rec = &anchor.record;
    let offset_x = x - anchor.start_x;
    let offset_y = y - anchor.start_y;
    let mut out = rect;

    match edge {
        Direction::Top => {
            out.y = (rec.y + offset_y).min(rec.y + rec.height - RECORD_MIN_SIZE).max(1);
            out.height = (rec.height - offset_y).min(root.height).max(RECORD_MIN_SIZE);
        }
        Direction::Bottom => {
            out.height = (rec.height + offset_y).min(root.height).max(RECORD_MIN_SIZE);
        }
        Direction::Left => {
            out.x = (rec.x + offset_x).min(rec.x + rec.width - RECORD_MIN_SIZE).max(1);
            out.width = (rec.width - offset_x).min(root.width).max(RECORD_MIN_SIZE);
        }
        Direction::Right => {
            out.width = (rec.width + offset_x).min(root.width).max(RECORD_MIN_SIZE);
        }
        _ => {}
    }

    out
}

/// Resize `rect` by dragging `handle` to `(x, y)`.
///
/// Corner handles apply the two edge rules of their axes independently.
/// `Moving` and `Outside` leave the rectangle unchanged.
pub fn resize(handle: Direction, rect: Rect, anchor: &DragAnchor, x: i32, y: i32, root: &Rect) -> Rect {
    let edges: &[Direction] = match handle {
        Direction::TopLeft => &[Direction::Top, Direction::Left],
        Direction::TopRight => &[Direction::Top, Direction::Right],
        Direction::BottomLeft => &[Direction::Bottom, Direction::Left],
        Direction::BottomRight => &[Direction::Bottom, Direction::Right],
        Direction::Top => &[Direction::Top],
        Direction::Bottom => &[Direction::Bottom],
        Direction::Left => &[Direction::Left],
        Direction::Right => &[Direction::Right],
        Direction::Moving | Direction::Outside => &[],
    };

    edges
        .iter()
        .fold(rect, |acc, &edge| resize_edge(edge, acc, anchor, x, y, root))
}

/// Translate the anchored selection by the pointer delta, keeping it on
/// screen. The origin never goes below 1.
pub fn drag_move(rect: Rect, anchor: &DragAnchor, x: i32, y: i32, root: &Rect) -> Rect {
    let rec = &anchor.record;
    Rect {
        x: (rec.x + x - anchor.start_x).min(root.width - rect.width).max(1),
        y: (rec.y + y - anchor.start_y).min(root.height - rect.height).max(1),
        ..rect
    }
}

/// Settle a freshly dragged selection on release.
///
/// Each dimension is raised to `RECORD_MIN_SIZE`, then a rectangle running
/// off the right or bottom of the root is pushed back in, keeping its size.
pub fn settle_after_drag(rect: Rect, root: &Rect) -> Rect {
    let mut out = rect;
    out.width = out.width.max(RECORD_MIN_SIZE);
    out.height = out.height.max(RECORD_MIN_SIZE);

    if out.x + out.width > root.width {
        out.x = root.width - out.width;
    }
    if out.y + out.height > root.height {
        out.y = root.height - out.height;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: Rect = Rect::new(0, 0, 1000, 800);

    fn anchor(x: i32, y: i32, record: Rect) -> DragAnchor {
        DragAnchor::new(x, y, record)
    }

    #[test]
    fn top_edge_moves_origin_and_height() {
        let rec = Rect::new(100, 100, 200, 200);
        let a = anchor(200, 100, rec);
        let out = resize(Direction::Top, rec, &a, 200, 60, &ROOT);
        assert_eq!(out, Rect::new(100, 60, 200, 240));
    }

    #[test]
    fn top_edge_stops_at_min_size() {
        let rec = Rect::new(100, 100, 200, 200);
        let a = anchor(200, 100, rec);
        let out = resize(Direction::Top, rec, &a, 200, 500, &ROOT);
        assert_eq!(out.y, 100 + 200 - RECORD_MIN_SIZE);
        assert_eq!(out.height, RECORD_MIN_SIZE);
    }

    #[test]
    fn left_edge_floor_is_one() {
        let rec = Rect::new(20, 20, 100, 100);
        let a = anchor(20, 60, rec);
        let out = resize(Direction::Left, rec, &a, -200, 60, &ROOT);
        assert_eq!(out.x, 1);
        assert_eq!(out.width, 320);
    }

    #[test]
    fn right_and_bottom_cap_at_root() {
        let rec = Rect::new(10, 10, 100, 100);
        let a = anchor(110, 110, rec);
        let out = resize(Direction::BottomRight, rec, &a, 5000, 5000, &ROOT);
        assert_eq!(out, Rect::new(10, 10, ROOT.width, ROOT.height));
    }

    #[test]
    fn corner_applies_both_axes() {
        let rec = Rect::new(100, 100, 200, 200);
        let a = anchor(100, 100, rec);
        let out = resize(Direction::TopLeft, rec, &a, 80, 70, &ROOT);
        assert_eq!(out, Rect::new(80, 70, 220, 230));
    }

    #[test]
    fn single_edge_resize_respects_floor_and_ceiling() {
        let rec = Rect::new(300, 300, 120, 90);
        let a = anchor(360, 345, rec);
        for handle in Direction::HANDLES {
            for &(x, y) in &[(-4000, -4000), (360, 345), (4000, 4000), (0, 799), (999, 0)] {
                let out = resize(handle, rec, &a, x, y, &ROOT);
                assert!(out.width >= RECORD_MIN_SIZE && out.width <= ROOT.width, "{:?} {:?}", handle, out);
                assert!(out.height >= RECORD_MIN_SIZE && out.height <= ROOT.height, "{:?} {:?}", handle, out);
            }
        }
    }

    #[test]
    fn resize_is_idempotent_under_replay() {
        let rec = Rect::new(200, 150, 300, 200);
        let a = anchor(500, 350, rec);
        let once = resize(Direction::BottomRight, rec, &a, 530, 390, &ROOT);
        let twice = resize(Direction::BottomRight, once, &a, 530, 390, &ROOT);
        assert_eq!(once, twice);
    }

    #[test]
    fn move_keeps_rect_inside_root() {
        let rec = Rect::new(100, 100, 200, 100);
        let a = anchor(150, 150, rec);
        assert_eq!(drag_move(rec, &a, 170, 160, &ROOT), Rect::new(120, 110, 200, 100));
        assert_eq!(drag_move(rec, &a, 5000, 5000, &ROOT), Rect::new(800, 700, 200, 100));
        assert_eq!(drag_move(rec, &a, -5000, -5000, &ROOT), Rect::new(1, 1, 200, 100));
    }

    #[test]
    fn release_clamp_preserves_size() {
        let root = Rect::new(0, 0, 100, 100);
        let out = settle_after_drag(Rect::new(80, 10, 50, 20), &root);
        assert_eq!(out.x, 50);
        assert_eq!(out.width, 50);
    }

    #[test]
    fn release_floor_raises_tiny_selection() {
        let out = settle_after_drag(Rect::new(995, 795, 3, 3), &ROOT);
        assert_eq!(out, Rect::new(990, 790, 10, 10));
        let out = settle_after_drag(Rect::new(40, 40, 3, 3), &ROOT);
        assert_eq!(out, Rect::new(40, 40, 10, 10));
    }
}
