//! Export module for SnapRect
//!
//! Post-processing of a captured selection and delivery to a file, the
//! clipboard, or both.

pub mod clipboard;
pub mod destination;
pub mod effect;
pub mod format;
pub mod quality;
pub mod settings;
pub mod writer;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use destination::{
    resolve_destination, specified_path_target, timestamped_name, DestinationDirs, DialogPrompt,
    SaveDestination, SavePlan, SavePrompt,
};
pub use effect::Effect;
pub use format::ImageFormatKind;
pub use quality::apply_quality;
pub use settings::{MemorySettings, SettingsStore};
pub use writer::{complete_suffix, save_image, target_with_format};

use std::path::PathBuf;
use thiserror::Error;

/// Prefix of generated file names.
pub const APP_NAME: &str = "SnapRect";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid destination: {0}")]
    InvalidDestination(PathBuf),

    #[error("Selection has no pixels")]
    EmptySelection,

    #[error("Save cancelled")]
    UserCancel,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Capture error: {0}")]
    Capture(#[from] capture::CaptureError),
}

impl From<arboard::Error> for ExportError {
    fn from(err: arboard::Error) -> Self {
        ExportError::Clipboard(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
