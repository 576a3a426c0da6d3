//! Scene model for the overlay
//!
//! Everything the host window needs to paint one frame, computed from a
//! selection snapshot. Painting itself belongs to the UI toolkit.

use crate::geometry::Direction;
use crate::selection::{Selection, Status};
use crate::TOOLBAR_Y_SPACING;
use capture::Rect;

/// Selection frame colour (#01bdff).
pub const FRAME_COLOR: [u8; 3] = [0x01, 0xbd, 0xff];

/// Frame stroke width in pixels.
pub const FRAME_WIDTH: i32 = 2;

/// Mask opacity before the pointer has moved.
pub const INITIAL_MASK_OPACITY: f32 = 0.5;

/// Mask opacity around a selection.
pub const MASK_OPACITY: f32 = 0.2;

/// Edge of the square magnifier, in pixels.
pub const MAGNIFIER_SIZE: i32 = 120;

/// Magnification of the area under the pointer.
pub const MAGNIFIER_ZOOM: i32 = 4;

/// Gap between the pointer and the magnifier.
const MAGNIFIER_OFFSET: i32 = 5;

/// Space kept below a toolbar before it flips.
const TOOLBAR_BOTTOM_MARGIN: i32 = 28;

/// Selections starting lower than this flip their toolbar above them.
const TOOLBAR_FLIP_MIN_Y: i32 = TOOLBAR_BOTTOM_MARGIN * 2 + 10;

/// Pointer shape to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Crosshair,
    Arrow,
    /// `\` diagonal, top-left and bottom-right corners.
    SizeFDiag,
    /// `/` diagonal, top-right and bottom-left corners.
    SizeBDiag,
    SizeHor,
    SizeVer,
    OpenHand,
    ClosedHand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarSize {
    pub width: i32,
    pub height: i32,
}

/// Dimmed area of the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskBand {
    pub rect: Rect,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeTip {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Enlarged view of the pixels around the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magnifier {
    /// Where the magnifier is drawn, `MAGNIFIER_SIZE` square.
    pub target: Rect,
    /// Root pixels shown in it, centred on the pointer.
    pub source: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    pub mask: Vec<MaskBand>,
    /// Selection inset by one pixel, stroked with `FRAME_COLOR`.
    pub frame: Option<Rect>,
    /// Centres of the resize handles.
    pub handles: Vec<(i32, i32)>,
    pub size_tip: Option<SizeTip>,
    /// Top-left corner of the toolbar once the selection is placed.
    pub toolbar: Option<(i32, i32)>,
    /// Shown while the area is being chosen.
    pub magnifier: Option<Magnifier>,
    pub cursor: CursorShape,
}

impl OverlayScene {
    pub fn build(selection: &Selection, root: &Rect, toolbar: ToolbarSize) -> Self {
        let cursor = cursor_shape(selection);

        if !selection.first_move {
            return Self {
                mask: vec![MaskBand {
                    rect: *root,
                    opacity: INITIAL_MASK_OPACITY,
                }],
                frame: None,
                handles: Vec::new(),
                size_tip: None,
                toolbar: None,
                magnifier: None,
                cursor,
            };
        }

        let rect = selection.rect;
        let mut scene = Self {
            mask: Vec::new(),
            frame: None,
            handles: Vec::new(),
            size_tip: None,
            toolbar: None,
            magnifier: None,
            cursor,
        };
        if !selection.first_release && selection.status != Status::Wait {
            let (x, y) = selection.pointer;
            scene.magnifier = Some(magnifier_at(x, y, root));
        }
        if rect.is_empty() || selection.status == Status::Wait {
            return scene;
        }

        let frame = rect.inset(1);
        scene.mask = mask_around(&frame, root);
        scene.frame = Some(frame);
        if selection.show_handles {
            scene.handles = handle_points(&frame);
        }
        scene.size_tip = Some(SizeTip {
            x: rect.x,
            y: rect.y,
            text: format!("{}X{}", rect.width, rect.height),
        });
        if selection.is_placed() {
            scene.toolbar = Some(toolbar_anchor(&rect, root, toolbar));
        }
        scene
    }
}

/// Four dimmed bands covering `root` minus `frame`.
fn mask_around(frame: &Rect, root: &Rect) -> Vec<MaskBand> {
    let Some(hole) = frame.intersection(root) else {
        return vec![MaskBand {
            rect: *root,
            opacity: MASK_OPACITY,
        }];
    };

    [
        Rect::new(root.x, root.y, root.width, hole.y - root.y),
        Rect::new(root.x, hole.bottom(), root.width, root.bottom() - hole.bottom()),
        Rect::new(root.x, hole.y, hole.x - root.x, hole.height),
        Rect::new(hole.right(), hole.y, root.right() - hole.right(), hole.height),
    ]
    .into_iter()
    .filter(|band| !band.is_empty())
    .map(|rect| MaskBand {
        rect,
        opacity: MASK_OPACITY,
    })
    .collect()
}

/// Corners first, then edge midpoints.
fn handle_points(frame: &Rect) -> Vec<(i32, i32)> {
    let (left, top, right, bottom) = (frame.x, frame.y, frame.right(), frame.bottom());
    let (mid_x, mid_y) = (frame.x + frame.width / 2, frame.y + frame.height / 2);
    vec![
        (left, top),
        (right, top),
        (left, bottom),
        (right, bottom),
        (left, mid_y),
        (mid_x, top),
        (right, mid_y),
        (mid_x, bottom),
    ]
}

/// Where the toolbar goes for `rect`.
///
/// Right-aligned below the selection; left-aligned when it would run off
/// the left edge; moved above (or inside) the selection near the bottom
/// of the screen.
pub fn toolbar_anchor(rect: &Rect, root: &Rect, toolbar: ToolbarSize) -> (i32, i32) {
    let mut x = rect.right() - toolbar.width;
    let mut y = (rect.bottom() + TOOLBAR_Y_SPACING).max(0);

    if toolbar.width > rect.right() {
        x = rect.x + TOOLBAR_Y_SPACING;
    }

    if y >= root.bottom() - toolbar.height - TOOLBAR_BOTTOM_MARGIN {
        y = if rect.y > TOOLBAR_FLIP_MIN_Y {
            rect.y - toolbar.height - TOOLBAR_Y_SPACING
        } else {
            rect.y + TOOLBAR_Y_SPACING
        };
    }

    (x, y)
}

/// Magnifier for a pointer at `(x, y)`.
///
/// Sits below-right of the pointer; pulled left near the right edge and
/// moved above the pointer near the bottom edge.
pub fn magnifier_at(x: i32, y: i32, root: &Rect) -> Magnifier {
    let mut left = x + MAGNIFIER_OFFSET;
    let mut top = y + MAGNIFIER_OFFSET;

    if x >= root.right() - MAGNIFIER_SIZE {
        left = (root.right() - MAGNIFIER_SIZE - MAGNIFIER_OFFSET).min(x + MAGNIFIER_OFFSET);
    }
    if y >= root.bottom() - MAGNIFIER_SIZE {
        top = y - MAGNIFIER_SIZE - MAGNIFIER_OFFSET;
    }

    let span = MAGNIFIER_SIZE / MAGNIFIER_ZOOM;
    Magnifier {
        target: Rect::new(left, top, MAGNIFIER_SIZE, MAGNIFIER_SIZE),
        source: Rect::new(x - span / 2, y - span / 2, span, span),
    }
}

pub fn cursor_shape(selection: &Selection) -> CursorShape {
    match selection.status {
        Status::Shooting => return CursorShape::Crosshair,
        Status::Wait => return CursorShape::Arrow,
        Status::Normal => {}
    }

    let region = if selection.is_pressed && selection.moving {
        selection.direction
    } else {
        selection.hover
    };

    match region {
        Direction::TopLeft | Direction::BottomRight => CursorShape::SizeFDiag,
        Direction::TopRight | Direction::BottomLeft => CursorShape::SizeBDiag,
        Direction::Left | Direction::Right => CursorShape::SizeHor,
        Direction::Top | Direction::Bottom => CursorShape::SizeVer,
        Direction::Moving | Direction::Outside if selection.is_pressed => CursorShape::ClosedHand,
        Direction::Moving | Direction::Outside => CursorShape::OpenHand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: Rect = Rect::new(0, 0, 1000, 800);
    const TOOLBAR: ToolbarSize = ToolbarSize {
        width: 300,
        height: 40,
    };

    fn placed(rect: Rect) -> Selection {
        Selection {
            rect,
            status: Status::Normal,
            first_press: true,
            first_release: true,
            first_move: true,
            show_handles: true,
            ..Selection::new()
        }
    }

    #[test]
    fn initial_scene_is_dimmed_root() {
        let scene = OverlayScene::build(&Selection::new(), &ROOT, TOOLBAR);
        assert_eq!(scene.mask.len(), 1);
        assert_eq!(scene.mask[0].rect, ROOT);
        assert_eq!(scene.mask[0].opacity, INITIAL_MASK_OPACITY);
        assert!(scene.frame.is_none());
        assert_eq!(scene.cursor, CursorShape::Crosshair);
    }

    #[test]
    fn placed_scene_has_frame_handles_tip_and_toolbar() {
        let scene = OverlayScene::build(&placed(Rect::new(100, 100, 400, 300)), &ROOT, TOOLBAR);
        assert_eq!(scene.frame, Some(Rect::new(101, 101, 398, 298)));
        assert_eq!(scene.mask.len(), 4);
        assert!(scene.mask.iter().all(|b| b.opacity == MASK_OPACITY));
        let dimmed: i32 = scene.mask.iter().map(|b| b.rect.width * b.rect.height).sum();
        assert_eq!(dimmed, ROOT.width * ROOT.height - 398 * 298);
        assert_eq!(scene.handles.len(), 8);
        assert_eq!(scene.size_tip.map(|t| t.text), Some("400X300".to_string()));
        assert_eq!(scene.toolbar, Some((200, 408)));
    }

    #[test]
    fn frozen_scene_draws_nothing() {
        let scene = OverlayScene::build(&placed(Rect::new(100, 100, 400, 300)).freeze(), &ROOT, TOOLBAR);
        assert!(scene.mask.is_empty());
        assert!(scene.frame.is_none());
        assert!(scene.handles.is_empty());
        assert!(scene.toolbar.is_none());
    }

    #[test]
    fn toolbar_left_aligns_when_too_wide() {
        let anchor = toolbar_anchor(&Rect::new(10, 100, 200, 100), &ROOT, TOOLBAR);
        assert_eq!(anchor, (18, 208));
    }

    #[test]
    fn toolbar_flips_near_bottom() {
        let anchor = toolbar_anchor(&Rect::new(400, 500, 300, 260), &ROOT, TOOLBAR);
        assert_eq!(anchor, (400, 452));

        let tall = toolbar_anchor(&Rect::new(400, 20, 300, 760), &ROOT, TOOLBAR);
        assert_eq!(tall, (400, 28));
    }

    #[test]
    fn magnifier_only_while_choosing() {
        let choosing = Selection {
            rect: Rect::new(100, 100, 200, 200),
            first_press: true,
            first_move: true,
            pointer: (300, 300),
            ..Selection::new()
        };
        let scene = OverlayScene::build(&choosing, &ROOT, TOOLBAR);
        let magnifier = scene.magnifier.unwrap();
        assert_eq!(magnifier.target, Rect::new(305, 305, MAGNIFIER_SIZE, MAGNIFIER_SIZE));
        assert_eq!(magnifier.source, Rect::new(285, 285, 30, 30));

        let scene = OverlayScene::build(&placed(Rect::new(100, 100, 200, 200)), &ROOT, TOOLBAR);
        assert!(scene.magnifier.is_none());
        assert!(OverlayScene::build(&Selection::new(), &ROOT, TOOLBAR).magnifier.is_none());
    }

    #[test]
    fn magnifier_stays_on_screen_near_edges() {
        let corner = magnifier_at(990, 790, &ROOT);
        assert_eq!(corner.target, Rect::new(875, 665, MAGNIFIER_SIZE, MAGNIFIER_SIZE));
        let left_edge = magnifier_at(0, 0, &ROOT);
        assert_eq!((left_edge.target.x, left_edge.target.y), (5, 5));
    }

    #[test]
    fn cursor_follows_hover_region() {
        let mut sel = placed(Rect::new(100, 100, 400, 300));
        sel.hover = Direction::TopRight;
        assert_eq!(cursor_shape(&sel), CursorShape::SizeBDiag);
        sel.hover = Direction::Bottom;
        assert_eq!(cursor_shape(&sel), CursorShape::SizeVer);
        sel.hover = Direction::Moving;
        assert_eq!(cursor_shape(&sel), CursorShape::OpenHand);
        sel.is_pressed = true;
        sel.moving = true;
        sel.direction = Direction::Moving;
        assert_eq!(cursor_shape(&sel), CursorShape::ClosedHand);
    }
}
