//! Selection state machine
//!
//! A [`Selection`] is an immutable snapshot. Every input handler consumes
//! the current snapshot and returns the next one together with a
//! [`Reaction`] telling the host what to do.

use crate::bounds::{self, DragAnchor};
use crate::geometry::{resolve, Direction};
use crate::keys::{micro_adjust, Key, Modifiers};
use capture::Rect;

/// Pointer button, as far as the overlay cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Other,
}

/// Pointer input in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { x: i32, y: i32, button: Button },
    Move { x: i32, y: i32 },
    Release { x: i32, y: i32, button: Button },
    DoubleClick { x: i32, y: i32, button: Button },
}

/// Interaction status of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Choosing the area; nothing placed yet.
    Shooting,
    /// Area placed; keyboard adjustment enabled.
    Normal,
    /// Frozen for capture; input ignored.
    Wait,
}

/// Coarse lifecycle phase derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Placed,
    Resizing,
    Moving,
    Frozen,
}

/// What the host should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing visible changed.
    Idle,
    Repaint,
    /// Tear the overlay down without capturing.
    Cancel,
    ContextMenu { x: i32, y: i32 },
    /// First release: the selection is now placed.
    Placed(Rect),
    /// Save with the configured destination.
    Save,
    /// Save to the clipboard, remembering it as the destination.
    CopyToClipboard,
}

/// Fixed inputs of one overlay session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    /// Screen bounds moved to the origin.
    pub root: Rect,
    /// Snap candidates in root coordinates, topmost first.
    pub windows: Vec<Rect>,
    /// Hover snapping walks `windows` on the primary screen and proposes
    /// the whole root elsewhere.
    pub is_primary: bool,
}

impl SelectionContext {
    pub fn new(root: Rect, windows: Vec<Rect>, is_primary: bool) -> Self {
        Self {
            root,
            windows,
            is_primary,
        }
    }

    /// Rectangle proposed while hovering at `(x, y)` before any press.
    fn hover_target(&self, x: i32, y: i32) -> Option<Rect> {
        if self.is_primary {
            self.windows
                .iter()
                .find(|w| w.contains_strict(x, y))
                .copied()
        } else {
            Some(self.root)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub rect: Rect,
    pub status: Status,
    /// Region grabbed by the last adjusting press.
    pub direction: Direction,
    /// Region under the pointer at the last move.
    pub hover: Direction,
    pub drag_start: (i32, i32),
    /// Pointer position at the last move.
    pub pointer: (i32, i32),
    /// Rectangle at the last adjusting press.
    pub drag_record: Option<Rect>,
    pub is_pressed: bool,
    pub first_press: bool,
    pub first_drag: bool,
    pub first_release: bool,
    pub first_move: bool,
    pub moving: bool,
    pub show_handles: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self {
            rect: Rect::default(),
            status: Status::Shooting,
            direction: Direction::Outside,
            hover: Direction::Outside,
            drag_start: (0, 0),
            pointer: (0, 0),
            drag_record: None,
            is_pressed: false,
            first_press: false,
            first_drag: false,
            first_release: false,
            first_move: false,
            moving: false,
            show_handles: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.status == Status::Wait {
            Phase::Frozen
        } else if !self.first_press {
            Phase::Idle
        } else if !self.first_release {
            Phase::Dragging
        } else if self.is_pressed && self.moving && self.direction == Direction::Moving {
            Phase::Moving
        } else if self.is_pressed && self.moving && self.direction.is_handle() {
            Phase::Resizing
        } else {
            Phase::Placed
        }
    }

    pub fn is_placed(&self) -> bool {
        self.first_release && self.status != Status::Wait
    }

    /// Stop reacting to input and hide the chrome ahead of a capture.
    pub fn freeze(self) -> Selection {
        Selection {
            status: Status::Wait,
            show_handles: false,
            is_pressed: false,
            moving: false,
            ..self
        }
    }

    pub fn on_pointer(self, event: PointerEvent, ctx: &SelectionContext) -> (Selection, Reaction) {
        if self.status == Status::Wait {
            return (self, Reaction::Idle);
        }

        match event {
            PointerEvent::Press { x, y, button } => self.press(x, y, button),
            PointerEvent::Move { x, y } => self.pointer_move(x, y, ctx),
            PointerEvent::Release { .. } => self.release(ctx),
            PointerEvent::DoubleClick { .. } => (self, Reaction::Save),
        }
    }

    fn press(self, x: i32, y: i32, button: Button) -> (Selection, Reaction) {
        let mut next = self;
        next.drag_start = (x, y);

        if button == Button::Secondary {
            next.moving = false;
            let reaction = if self.first_press {
                Reaction::ContextMenu { x, y }
            } else {
                Reaction::Cancel
            };
            return (next, reaction);
        }

        if !next.first_press {
            next.first_press = true;
        } else if button == Button::Primary {
            next.moving = true;
            next.direction = resolve(x, y, &next.rect);
            next.drag_record = Some(next.rect);
        }
        next.is_pressed = true;

        (next, Reaction::Repaint)
    }

    fn pointer_move(self, x: i32, y: i32, ctx: &SelectionContext) -> (Selection, Reaction) {
        let mut next = self;
        let mut changed = false;

        if !next.first_move {
            next.first_move = true;
            changed = true;
        }

        // The magnifier follows the pointer until the first release.
        if !next.first_release && next.pointer != (x, y) {
            changed = true;
        }
        next.pointer = (x, y);

        if next.is_pressed && next.first_press {
            next.first_drag = true;
        }

        if next.first_press {
            if !next.first_release {
                if next.is_pressed {
                    next.rect = Rect::from_corners(next.drag_start.0, next.drag_start.1, x, y);
                    changed = true;
                }
            } else if next.is_pressed {
                if let Some(record) = next.drag_record {
                    let anchor = DragAnchor::new(next.drag_start.0, next.drag_start.1, record);
                    next.rect = match next.direction {
                        Direction::Moving if next.moving => {
                            bounds::drag_move(next.rect, &anchor, x, y, &ctx.root)
                        }
                        handle if handle.is_handle() => {
                            bounds::resize(handle, next.rect, &anchor, x, y, &ctx.root)
                        }
                        _ => next.rect,
                    };
                    changed = true;
                }
            }

            next.hover = resolve(x, y, &next.rect);
            let show_handles = next.hover != Direction::Moving;
            if show_handles != next.show_handles {
                next.show_handles = show_handles;
                changed = true;
            }
        } else if let Some(target) = ctx.hover_target(x, y) {
            next.rect = target;
            changed = true;
        }

        let reaction = if changed {
            Reaction::Repaint
        } else {
            Reaction::Idle
        };
        (next, reaction)
    }

    fn release(self, ctx: &SelectionContext) -> (Selection, Reaction) {
        let mut next = self;
        next.moving = false;
        next.is_pressed = false;

        if !next.first_press || next.first_release {
            return (next, Reaction::Repaint);
        }

        next.first_release = true;
        next.status = Status::Normal;
        if next.first_drag {
            next.rect = bounds::settle_after_drag(next.rect, &ctx.root);
        }
        log::debug!("[OVERLAY] Selection placed at {:?}", next.rect);

        (next, Reaction::Placed(next.rect))
    }

    pub fn on_key(self, key: Key, modifiers: Modifiers, ctx: &SelectionContext) -> (Selection, Reaction) {
        if key == Key::Escape {
            return (self, Reaction::Cancel);
        }
        if self.status != Status::Normal {
            return (self, Reaction::Idle);
        }

        if modifiers.ctrl && modifiers != Modifiers::CTRL_SHIFT {
            match key {
                Key::S => return (self, Reaction::Save),
                Key::C => return (self, Reaction::CopyToClipboard),
                _ => {}
            }
        }

        if !key.is_arrow() {
            return (self, Reaction::Idle);
        }

        let rect = micro_adjust(self.rect, key, modifiers, &ctx.root);
        (Selection { rect, ..self }, Reaction::Repaint)
    }
}
