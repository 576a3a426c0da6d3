//! Capture pipeline for a committed selection.
//!
//! `Armed -> Frozen -> Captured -> (Effected) -> Persisted -> Notified ->
//! Terminated`. Any error ends the session at `Terminated`.

use crate::config::SharedSettings;
use crate::notify::{Notification, Notifier};
use capture::{PixelGrabber, Rect, ScreenInfo};
use chrono::Local;
use export::settings::{SAVE_OP, SAVE_SECTION};
use export::{
    apply_quality, resolve_destination, save_image, specified_path_target, ClipboardSink,
    DestinationDirs, Effect, ExportError, ExportResult, SaveDestination, SavePlan, SavePrompt,
    SettingsStore,
};
use image::RgbaImage;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Pause after hiding the chrome so the last overlay frame is gone.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// How long the process lingers after notifying.
pub const EXIT_DELAY: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Armed,
    Frozen,
    Captured,
    Effected,
    Persisted,
    Notified,
    Terminated,
}

impl PipelineStage {
    pub fn display_text(&self) -> &'static str {
        match self {
            PipelineStage::Armed => "Selecting",
            PipelineStage::Frozen => "Preparing capture",
            PipelineStage::Captured => "Captured",
            PipelineStage::Effected => "Effect applied",
            PipelineStage::Persisted => "Saved",
            PipelineStage::Notified => "Done",
            PipelineStage::Terminated => "Finished",
        }
    }

    pub fn can_freeze(&self) -> bool {
        matches!(self, PipelineStage::Armed)
    }

    pub fn can_capture(&self) -> bool {
        matches!(self, PipelineStage::Frozen)
    }
}

/// Where the image goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// Follow `save.save_op`.
    Configured,
    /// Path from `--save-path`, unless a destination is picked in the
    /// overlay.
    Specified(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub file: Option<PathBuf>,
    pub clipboard: bool,
    pub effective_index: i64,
}

/// Platform services the pipeline drives.
pub struct Collaborators {
    pub grabber: Box<dyn PixelGrabber>,
    pub clipboard: Box<dyn ClipboardSink>,
    pub prompt: Box<dyn SavePrompt>,
    pub notifier: Box<dyn Notifier>,
    pub dirs: DestinationDirs,
}

pub struct CapturePipeline {
    stage: PipelineStage,
    screen: ScreenInfo,
    settings: SharedSettings,
    target: SaveTarget,
    effect: Option<Effect>,
    /// Destination picked for this save from the toolbar, menu or Ctrl+C.
    chosen_index: Option<i64>,
    parts: Collaborators,
    outcome: Option<SaveOutcome>,
}

impl CapturePipeline {
    pub fn new(
        screen: ScreenInfo,
        settings: SharedSettings,
        target: SaveTarget,
        parts: Collaborators,
    ) -> Self {
        Self {
            stage: PipelineStage::Armed,
            screen,
            settings,
            target,
            effect: None,
            chosen_index: None,
            parts,
            outcome: None,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn set_effect(&mut self, effect: Option<Effect>) {
        self.effect = effect;
    }

    /// The save goes to the `--save-path` file as given.
    fn writes_specified_path(&self) -> bool {
        matches!(self.target, SaveTarget::Specified(_)) && self.chosen_index.is_none()
    }

    /// Destination index the save resolves through, `None` for the
    /// `--save-path` file.
    fn destination_index(&self) -> Option<i64> {
        if self.writes_specified_path() {
            return None;
        }
        Some(
            self.chosen_index
                .unwrap_or_else(|| self.settings.lock().save_op()),
        )
    }

    /// The next save will open the file dialog.
    pub fn will_prompt(&self) -> bool {
        self.destination_index().and_then(SaveDestination::from_index)
            == Some(SaveDestination::FileDialog)
    }

    /// Freeze for a save. `index` replaces the stored destination first.
    /// Returns false when a save is already under way.
    pub fn request_save(&mut self, index: Option<usize>) -> bool {
        if !self.stage.can_freeze() {
            return false;
        }
        if let Some(index) = index {
            self.settings
                .lock()
                .set_value(SAVE_SECTION, SAVE_OP, Value::from(index));
            self.chosen_index = Some(index as i64);
        }
        self.stage = PipelineStage::Frozen;
        log::info!("[PIPELINE] {}", self.stage.display_text());
        true
    }

    /// Grab `rect`, or the whole root when `None`.
    pub fn capture(&mut self, rect: Option<Rect>) -> ExportResult<RgbaImage> {
        let rect = rect.unwrap_or_else(|| self.screen.root());
        if rect.is_empty() {
            return Err(ExportError::EmptySelection);
        }
        let image = self.parts.grabber.grab(&self.screen, &rect)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(ExportError::EmptySelection);
        }
        self.stage = PipelineStage::Captured;
        log::info!(
            "[PIPELINE] Captured {}x{} at ({}, {})",
            image.width(),
            image.height(),
            rect.x,
            rect.y
        );
        Ok(image)
    }

    /// Optional effect, then quality reduction. Files written to the
    /// `--save-path` target keep full quality.
    pub fn post_process(&mut self, image: RgbaImage) -> RgbaImage {
        let image = match self.effect {
            Some(effect) => {
                self.stage = PipelineStage::Effected;
                effect.apply(&image)
            }
            None => image,
        };
        if self.writes_specified_path() {
            return image;
        }
        let quality = self.settings.lock().save_quality();
        apply_quality(image, quality)
    }

    pub fn persist(&mut self, image: &RgbaImage) -> ExportResult<SaveOutcome> {
        let now = Local::now();
        let plan = match (self.destination_index(), &self.target) {
            (None, SaveTarget::Specified(path)) => SavePlan {
                file: Some(specified_path_target(path, &now)?),
                clipboard: false,
                effective_index: SaveDestination::Desktop.index(),
            },
            (index, _) => {
                let mut settings = self.settings.lock();
                let index = index.unwrap_or_else(|| settings.save_op());
                resolve_destination(
                    index,
                    &mut *settings,
                    &self.parts.dirs,
                    self.parts.prompt.as_ref(),
                    &now,
                )?
            }
        };

        let file = match &plan.file {
            Some(path) => Some(save_image(image, path)?),
            None => None,
        };
        if plan.clipboard {
            self.parts.clipboard.set_image(image)?;
        }

        let outcome = SaveOutcome {
            file,
            clipboard: plan.clipboard,
            effective_index: plan.effective_index,
        };
        self.stage = PipelineStage::Persisted;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    pub fn notify(&mut self) {
        if let Some(outcome) = &self.outcome {
            let file = if outcome.effective_index == SaveDestination::Clipboard.index() {
                None
            } else {
                outcome.file.as_deref()
            };
            self.parts.notifier.notify(&Notification::saved(file));
        }
        self.stage = PipelineStage::Notified;
    }

    /// Capture through notify in one go.
    pub fn run(&mut self, rect: Option<Rect>) -> ExportResult<SaveOutcome> {
        if !self.stage.can_capture() {
            self.request_save(None);
        }
        match self.run_stages(rect) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                match &e {
                    ExportError::UserCancel => log::info!("[PIPELINE] Save cancelled"),
                    other => log::error!("[PIPELINE] Capture failed: {}", other),
                }
                self.stage = PipelineStage::Terminated;
                Err(e)
            }
        }
    }

    fn run_stages(&mut self, rect: Option<Rect>) -> ExportResult<SaveOutcome> {
        let image = self.capture(rect)?;
        let image = self.post_process(image);
        let outcome = self.persist(&image)?;
        self.notify();
        Ok(outcome)
    }

    pub fn finish(&mut self) {
        self.stage = PipelineStage::Terminated;
        log::debug!("[PIPELINE] {}", self.stage.display_text());
    }
}
