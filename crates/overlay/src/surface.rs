//! Capture surface: owns the selection for one session and publishes what
//! happens to it on a typed event channel.

use crate::render::{OverlayScene, ToolbarSize};
use crate::selection::{PointerEvent, Reaction, Selection, SelectionContext};
use crate::{Key, Modifiers, OverlayError, OverlayResult};
use capture::Rect;
use crossbeam_channel::{Receiver, Sender};

/// Save destination index forced by the copy shortcut.
pub const CLIPBOARD_DESTINATION: usize = 3;

/// Events published by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    SelectionChanged(Rect),
    Placed(Rect),
    /// `index` overrides the configured destination when set.
    SaveRequested { index: Option<usize> },
    Cancelled,
    ContextMenu { x: i32, y: i32 },
}

pub struct CaptureSurface {
    context: SelectionContext,
    selection: Selection,
    events: Sender<OverlayEvent>,
}

impl CaptureSurface {
    pub fn new(context: SelectionContext, events: Sender<OverlayEvent>) -> Self {
        Self {
            context,
            selection: Selection::new(),
            events,
        }
    }

    /// Surface plus the receiving end of its event channel.
    pub fn with_channel(context: SelectionContext) -> (Self, Receiver<OverlayEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(context, tx), rx)
    }

    pub fn on_pointer_event(&mut self, event: PointerEvent) -> OverlayResult<Reaction> {
        let (next, reaction) = self.selection.on_pointer(event, &self.context);
        self.apply(next, reaction)
    }

    pub fn on_key_event(&mut self, key: Key, modifiers: Modifiers) -> OverlayResult<Reaction> {
        let (next, reaction) = self.selection.on_key(key, modifiers, &self.context);
        self.apply(next, reaction)
    }

    pub fn current_rect(&self) -> Rect {
        self.selection.rect
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn root(&self) -> Rect {
        self.context.root
    }

    /// The placed rectangle, ready for capture.
    pub fn committed_rect(&self) -> OverlayResult<Rect> {
        if !self.selection.first_release {
            return Err(OverlayError::NoSelection);
        }
        let rect = self.selection.rect;
        if rect.is_empty() {
            return Err(OverlayError::EmptySelection(rect));
        }
        Ok(rect)
    }

    /// Hide the chrome and ignore further input.
    pub fn freeze(&mut self) {
        self.selection = self.selection.freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.selection.phase() == crate::selection::Phase::Frozen
    }

    pub fn scene(&self, toolbar: ToolbarSize) -> OverlayScene {
        OverlayScene::build(&self.selection, &self.context.root, toolbar)
    }

    /// Save requested from the toolbar or context menu.
    pub fn request_save(&self, index: Option<usize>) -> OverlayResult<()> {
        self.publish(OverlayEvent::SaveRequested { index })
    }

    pub fn cancel(&self) -> OverlayResult<()> {
        self.publish(OverlayEvent::Cancelled)
    }

    fn apply(&mut self, next: Selection, reaction: Reaction) -> OverlayResult<Reaction> {
        let previous = self.selection.rect;
        self.selection = next;

        match reaction {
            Reaction::Placed(rect) => self.publish(OverlayEvent::Placed(rect))?,
            Reaction::Save => self.request_save(None)?,
            Reaction::CopyToClipboard => self.request_save(Some(CLIPBOARD_DESTINATION))?,
            Reaction::Cancel => self.cancel()?,
            Reaction::ContextMenu { x, y } => self.publish(OverlayEvent::ContextMenu { x, y })?,
            Reaction::Repaint | Reaction::Idle => {
                if next.rect != previous {
                    self.publish(OverlayEvent::SelectionChanged(next.rect))?;
                }
            }
        }

        Ok(reaction)
    }

    fn publish(&self, event: OverlayEvent) -> OverlayResult<()> {
        log::trace!("[OVERLAY] {:?}", event);
        self.events
            .send(event)
            .map_err(|_| OverlayError::ChannelClosed)
    }
}
