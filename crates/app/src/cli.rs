//! Command line interface

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Interactive screen-region capture.
#[derive(Debug, Parser)]
#[command(name = "snaprect", version)]
#[command(group(
    ArgGroup::new("mode")
        .args(["fullscreen", "top_window", "delay", "save_path"])
        .multiple(false)
))]
pub struct Cli {
    /// Capture the whole screen and exit
    #[arg(short, long)]
    pub fullscreen: bool,

    /// Capture the topmost window and exit
    #[arg(short = 'w', long)]
    pub top_window: bool,

    /// Start the selection after SECS seconds
    #[arg(short, long, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Save the selection to PATH instead of the configured destination
    #[arg(short, long, value_name = "PATH")]
    pub save_path: Option<PathBuf>,

    /// Do not show desktop notifications
    #[arg(short, long)]
    pub no_notification: bool,
}

/// How a session captures; fixed once started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureMode {
    Interactive,
    FullScreen,
    TopWindow,
    Delayed(u64),
    SpecifiedPath(PathBuf),
}

impl Cli {
    pub fn mode(&self) -> CaptureMode {
        if self.fullscreen {
            CaptureMode::FullScreen
        } else if self.top_window {
            CaptureMode::TopWindow
        } else if let Some(secs) = self.delay {
            CaptureMode::Delayed(secs)
        } else if let Some(path) = &self.save_path {
            CaptureMode::SpecifiedPath(path.clone())
        } else {
            CaptureMode::Interactive
        }
    }
}
