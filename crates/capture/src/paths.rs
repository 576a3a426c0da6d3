//! Per-session temporary image files.
//!
//! Both files are overwritten by every session.

use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

static FULLSCREEN_FILE: Lazy<PathBuf> =
    Lazy::new(|| std::env::temp_dir().join("snaprect-fullscreen.png"));

static SELECTION_FILE: Lazy<PathBuf> =
    Lazy::new(|| std::env::temp_dir().join("snaprect-selection.png"));

/// Snapshot of the whole session screen.
pub fn fullscreen_file() -> &'static Path {
    &FULLSCREEN_FILE
}

/// Crop of the committed selection.
pub fn selection_file() -> &'static Path {
    &SELECTION_FILE
}
