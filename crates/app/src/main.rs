//! SnapRect - interactive screen-region capture

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;
mod config;
mod notify;
mod overlay_app;
mod pipeline;
mod timer;

use crate::cli::{CaptureMode, Cli};
use crate::config::{shared, JsonSettings, SharedSettings};
use crate::notify::{DesktopNotifier, Notification, Notifier, SilentNotifier};
use crate::overlay_app::OverlayApp;
use crate::pipeline::{
    CapturePipeline, Collaborators, PipelineStage, SaveTarget, EXIT_DELAY, SETTLE_DELAY,
};
use crate::timer::OneShot;
use anyhow::Context;
use capture::{
    default_enumerator, screen_for_session, session_windows, MonitorGrabber, PixelGrabber, Rect,
    ScreenInfo, SnapshotGrabber,
};
use clap::Parser;
use eframe::egui;
use export::{DestinationDirs, DialogPrompt, SystemClipboard};
use overlay::{CaptureSurface, SelectionContext};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Delays shorter than this start right away.
const MIN_NOTIFIED_DELAY: u64 = 2;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mode = cli.mode();
    log::info!("[PIPELINE] Starting in {:?} mode", mode);

    let settings = shared(JsonSettings::load_default());
    let notifier: Box<dyn Notifier> = if cli.no_notification {
        Box::new(SilentNotifier)
    } else {
        Box::new(DesktopNotifier)
    };

    let pipeline = match mode {
        CaptureMode::FullScreen => run_direct(settings, notifier, None)?,
        CaptureMode::TopWindow => {
            let screen = screen_for_session()?;
            let windows = session_windows(default_enumerator().as_ref(), &screen);
            let rect = windows.first().copied().unwrap_or_else(|| screen.root());
            run_direct(settings, notifier, Some(rect))?
        }
        CaptureMode::Delayed(secs) => {
            if secs >= MIN_NOTIFIED_DELAY {
                notifier.notify(&Notification::delayed_start(secs));
                std::thread::sleep(Duration::from_secs(secs));
            }
            run_interactive(settings, notifier, SaveTarget::Configured)?
        }
        CaptureMode::SpecifiedPath(path) => {
            check_parent_exists(&path)?;
            run_interactive(settings, notifier, SaveTarget::Specified(path))?
        }
        CaptureMode::Interactive => run_interactive(settings, notifier, SaveTarget::Configured)?,
    };

    let stage = pipeline.lock().stage();
    if stage == PipelineStage::Notified {
        // Keep the process alive so the notification action can be used.
        let mut exit = OneShot::new();
        exit.start(EXIT_DELAY);
        exit.wait();
    }
    pipeline.lock().finish();
    Ok(())
}

fn check_parent_exists(path: &Path) -> anyhow::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        anyhow::bail!("Directory does not exist: {}", parent.display());
    }
    Ok(())
}

fn collaborators(grabber: Box<dyn PixelGrabber>, notifier: Box<dyn Notifier>) -> Collaborators {
    Collaborators {
        grabber,
        clipboard: Box::new(SystemClipboard::new()),
        prompt: Box::new(DialogPrompt),
        notifier,
        dirs: DestinationDirs::from_system(),
    }
}

/// Non-interactive capture of `rect`, or the whole screen.
fn run_direct(
    settings: SharedSettings,
    notifier: Box<dyn Notifier>,
    rect: Option<Rect>,
) -> anyhow::Result<Arc<Mutex<CapturePipeline>>> {
    let screen = screen_for_session()?;
    let parts = collaborators(Box::new(MonitorGrabber), notifier);
    let mut pipeline = CapturePipeline::new(screen, settings, SaveTarget::Configured, parts);

    pipeline.request_save(None);
    let mut settle = OneShot::new();
    settle.start(SETTLE_DELAY);
    settle.wait();
    if let Err(e) = pipeline.run(rect) {
        log::warn!("[PIPELINE] Nothing saved: {}", e);
    }
    Ok(Arc::new(Mutex::new(pipeline)))
}

fn run_interactive(
    settings: SharedSettings,
    notifier: Box<dyn Notifier>,
    target: SaveTarget,
) -> anyhow::Result<Arc<Mutex<CapturePipeline>>> {
    let screen = screen_for_session()?;
    let snapshot = MonitorGrabber
        .capture_screen(&screen)
        .context("Failed to capture the screen")?;
    let windows = session_windows(default_enumerator().as_ref(), &screen);
    log::info!(
        "[PIPELINE] Session on {} ({}x{}), {} windows",
        screen.name,
        screen.bounds.width,
        screen.bounds.height,
        windows.len()
    );

    let context = SelectionContext::new(screen.root(), windows, screen.is_primary);
    let (surface, events) = CaptureSurface::with_channel(context);
    let parts = collaborators(Box::new(SnapshotGrabber::new(snapshot.clone())), notifier);
    let pipeline = Arc::new(Mutex::new(CapturePipeline::new(
        screen.clone(),
        settings,
        target,
        parts,
    )));

    let native_options = eframe::NativeOptions {
        viewport: overlay_viewport(&screen),
        ..Default::default()
    };

    let pipeline_for_app = pipeline.clone();
    eframe::run_native(
        "SnapRect",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(OverlayApp::new(
                cc,
                surface,
                events,
                pipeline_for_app,
                snapshot,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Overlay failed: {}", e))?;

    Ok(pipeline)
}

fn overlay_viewport(screen: &ScreenInfo) -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title("SnapRect")
        .with_position([screen.bounds.x as f32, screen.bounds.y as f32])
        .with_inner_size([screen.bounds.width as f32, screen.bounds.height as f32])
        .with_decorations(false)
        .with_resizable(false)
        .with_always_on_top()
        .with_fullscreen(true)
        .with_taskbar(false)
}
