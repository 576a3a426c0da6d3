//! Overlay module for SnapRect
//!
//! Selection state machine, hit testing and the scene model drawn over the
//! frozen screen.

pub mod bounds;
pub mod geometry;
pub mod keys;
pub mod render;
pub mod selection;
pub mod surface;

pub use bounds::DragAnchor;
pub use geometry::{resolve, Direction};
pub use keys::{Key, Modifiers};
pub use render::{CursorShape, Magnifier, OverlayScene, ToolbarSize};
pub use selection::{
    Button, PointerEvent, Reaction, Selection, SelectionContext, Status,
};
pub use surface::{CaptureSurface, OverlayEvent};

use capture::Rect;
use thiserror::Error;

/// Smallest committed selection edge, in pixels.
pub const RECORD_MIN_SIZE: i32 = 10;

/// Half-width of the band around an edge that grabs it.
pub const SPACING: i32 = 5;

/// Gap between the selection and its toolbar.
pub const TOOLBAR_Y_SPACING: i32 = 8;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("No selection made")]
    NoSelection,

    #[error("Selection {0:?} is empty")]
    EmptySelection(Rect),

    #[error("Overlay event channel closed")]
    ChannelClosed,
}

pub type OverlayResult<T> = Result<T, OverlayError>;
