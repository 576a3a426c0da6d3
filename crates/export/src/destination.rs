//! Where a saved selection goes

use crate::format::ImageFormatKind;
use crate::settings::{SettingsStore, CLIPBOARD_MARKER};
use crate::writer::{complete_suffix, target_with_format};
use crate::{ExportError, ExportResult, APP_NAME};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// `save.save_op` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDestination {
    Desktop = 0,
    LastUsedDir = 1,
    FileDialog = 2,
    Clipboard = 3,
    ConfiguredDir = 4,
}

impl SaveDestination {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Desktop),
            1 => Some(Self::LastUsedDir),
            2 => Some(Self::FileDialog),
            3 => Some(Self::Clipboard),
            4 => Some(Self::ConfiguredDir),
            _ => None,
        }
    }

    pub fn index(self) -> i64 {
        self as i64
    }

    /// Label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Save to desktop",
            Self::LastUsedDir => "Autosave",
            Self::FileDialog => "Save to specified folder",
            Self::Clipboard => "Copy to clipboard",
            Self::ConfiguredDir => "Autosave and copy to clipboard",
        }
    }

    pub const ALL: [SaveDestination; 5] = [
        Self::Desktop,
        Self::LastUsedDir,
        Self::FileDialog,
        Self::Clipboard,
        Self::ConfiguredDir,
    ];
}

/// Standard directories a save can land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationDirs {
    pub desktop: PathBuf,
    pub pictures: PathBuf,
    pub temp: PathBuf,
}

impl DestinationDirs {
    pub fn from_system() -> Self {
        let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            desktop: dirs::desktop_dir().unwrap_or_else(|| home.clone()),
            pictures: dirs::picture_dir().unwrap_or(home),
            temp: std::env::temp_dir(),
        }
    }
}

/// Outcome of destination resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub file: Option<PathBuf>,
    pub clipboard: bool,
    /// Destination actually used; 3 when a stored "clipboard" path turned
    /// an autosave into a clipboard-only save.
    pub effective_index: i64,
}

/// Asks the user for a file to save to.
pub trait SavePrompt {
    /// `None` when the user cancels.
    fn ask_save_path(&self, suggested: &Path) -> Option<PathBuf>;
}

/// Native save dialog through rfd.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPrompt;

impl SavePrompt for DialogPrompt {
    fn ask_save_path(&self, suggested: &Path) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save")
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("BMP", &["bmp"])
            .add_filter("PGM", &["pgm"])
            .add_filter("XBM", &["xbm"])
            .add_filter("XPM", &["xpm"]);
        if let Some(dir) = suggested.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = suggested.file_name().and_then(|n| n.to_str()) {
            dialog = dialog.set_file_name(name);
        }
        dialog.save_file()
    }
}

/// `<App><yyyyMMddHHmmss>.png`
pub fn timestamped_name(now: &DateTime<Local>) -> String {
    format!("{}{}.png", APP_NAME, now.format("%Y%m%d%H%M%S"))
}

/// File in `dir`, or clipboard-only when the stored path is the marker.
fn stored_dir_plan(stored: &str, dirs: &DestinationDirs, name: &str, clipboard: bool, index: i64) -> SavePlan {
    if stored.is_empty() {
        SavePlan {
            file: Some(dirs.desktop.join(name)),
            clipboard,
            effective_index: index,
        }
    } else if stored == CLIPBOARD_MARKER {
        SavePlan {
            file: None,
            clipboard: true,
            effective_index: SaveDestination::Clipboard.index(),
        }
    } else {
        SavePlan {
            file: Some(Path::new(stored).join(name)),
            clipboard,
            effective_index: index,
        }
    }
}

/// Turn `save.save_op` into a plan, updating `common.default_savepath`.
pub fn resolve_destination(
    index: i64,
    settings: &mut dyn SettingsStore,
    dirs: &DestinationDirs,
    prompt: &dyn SavePrompt,
    now: &DateTime<Local>,
) -> ExportResult<SavePlan> {
    let name = timestamped_name(now);

    let plan = match SaveDestination::from_index(index) {
        Some(SaveDestination::Desktop) => {
            settings.set_default_savepath(&dirs.desktop.to_string_lossy());
            SavePlan {
                file: Some(dirs.desktop.join(&name)),
                clipboard: false,
                effective_index: index,
            }
        }
        Some(SaveDestination::LastUsedDir) => {
            stored_dir_plan(&settings.default_savepath(), dirs, &name, false, index)
        }
        Some(SaveDestination::FileDialog) => {
            let chosen = prompt
                .ask_save_path(&dirs.pictures.join(&name))
                .ok_or(ExportError::UserCancel)?;
            let valid = complete_suffix(&chosen)
                .and_then(ImageFormatKind::from_extension)
                .is_some();
            if !valid {
                log::warn!("[EXPORT] Unsupported file suffix: {}", chosen.display());
                return Err(ExportError::InvalidDestination(chosen));
            }
            if let Some(dir) = chosen.parent() {
                settings.set_default_savepath(&dir.to_string_lossy());
            }
            SavePlan {
                file: Some(chosen),
                clipboard: false,
                effective_index: index,
            }
        }
        Some(SaveDestination::Clipboard) => {
            settings.set_default_savepath(CLIPBOARD_MARKER);
            SavePlan {
                file: None,
                clipboard: true,
                effective_index: index,
            }
        }
        Some(SaveDestination::ConfiguredDir) => {
            stored_dir_plan(&settings.default_savepath(), dirs, &name, true, index)
        }
        None => SavePlan {
            file: Some(dirs.temp.join(&name)),
            clipboard: false,
            effective_index: index,
        },
    };

    log::debug!("[EXPORT] Destination {} resolved to {:?}", index, plan);
    Ok(plan)
}

/// Output file for a path given on the command line.
///
/// A directory (or a path without a file name) gets a timestamped
/// name; otherwise the extension rules of [`target_with_format`] apply.
pub fn specified_path_target(path: &Path, now: &DateTime<Local>) -> ExportResult<PathBuf> {
    if path.is_dir() || path.file_name().is_none() {
        return Ok(path.join(timestamped_name(now)));
    }
    target_with_format(path).map(|(target, _)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use chrono::TimeZone;
    use std::cell::RefCell;

    struct FixedPrompt {
        answer: Option<PathBuf>,
        asked: RefCell<Option<PathBuf>>,
    }

    impl FixedPrompt {
        fn new(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(PathBuf::from),
                asked: RefCell::new(None),
            }
        }
    }

    impl SavePrompt for FixedPrompt {
        fn ask_save_path(&self, suggested: &Path) -> Option<PathBuf> {
            *self.asked.borrow_mut() = Some(suggested.to_path_buf());
            self.answer.clone()
        }
    }

    fn dirs() -> DestinationDirs {
        DestinationDirs {
            desktop: PathBuf::from("/home/u/Desktop"),
            pictures: PathBuf::from("/home/u/Pictures"),
            temp: PathBuf::from("/tmp"),
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    const NAME: &str = "SnapRect20240309140507.png";

    fn resolve(index: i64, settings: &mut MemorySettings, prompt: &FixedPrompt) -> ExportResult<SavePlan> {
        resolve_destination(index, settings, &dirs(), prompt, &now())
    }

    #[test]
    fn desktop_saves_there_and_remembers_it() {
        let mut settings = MemorySettings::new();
        let plan = resolve(0, &mut settings, &FixedPrompt::new(None)).unwrap();
        assert_eq!(plan.file, Some(dirs().desktop.join(NAME)));
        assert!(!plan.clipboard);
        assert_eq!(settings.default_savepath(), "/home/u/Desktop");
    }

    #[test]
    fn last_used_dir_variants() {
        let prompt = FixedPrompt::new(None);

        let mut settings = MemorySettings::new();
        let plan = resolve(1, &mut settings, &prompt).unwrap();
        assert_eq!(plan.file, Some(dirs().desktop.join(NAME)));

        settings.set_default_savepath("/data/shots");
        let plan = resolve(1, &mut settings, &prompt).unwrap();
        assert_eq!(plan.file, Some(PathBuf::from("/data/shots").join(NAME)));
        assert!(!plan.clipboard);
        assert_eq!(plan.effective_index, 1);

        settings.set_default_savepath(CLIPBOARD_MARKER);
        let plan = resolve(1, &mut settings, &prompt).unwrap();
        assert_eq!(plan.file, None);
        assert!(plan.clipboard);
        assert_eq!(plan.effective_index, 3);
    }

    #[test]
    fn configured_dir_also_copies() {
        let prompt = FixedPrompt::new(None);
        let mut settings = MemorySettings::new();
        settings.set_default_savepath("/data/shots");
        let plan = resolve(4, &mut settings, &prompt).unwrap();
        assert_eq!(plan.file, Some(PathBuf::from("/data/shots").join(NAME)));
        assert!(plan.clipboard);

        settings.set_default_savepath(CLIPBOARD_MARKER);
        let plan = resolve(4, &mut settings, &prompt).unwrap();
        assert_eq!(plan, SavePlan { file: None, clipboard: true, effective_index: 3 });
    }

    #[test]
    fn clipboard_marks_default_savepath() {
        let mut settings = MemorySettings::new();
        let plan = resolve(3, &mut settings, &FixedPrompt::new(None)).unwrap();
        assert_eq!(plan, SavePlan { file: None, clipboard: true, effective_index: 3 });
        assert_eq!(settings.default_savepath(), CLIPBOARD_MARKER);
    }

    #[test]
    fn dialog_suggests_pictures_and_remembers_dir() {
        let mut settings = MemorySettings::new();
        let prompt = FixedPrompt::new(Some("/data/out/mine.jpg"));
        let plan = resolve(2, &mut settings, &prompt).unwrap();
        assert_eq!(plan.file, Some(PathBuf::from("/data/out/mine.jpg")));
        assert_eq!(*prompt.asked.borrow(), Some(dirs().pictures.join(NAME)));
        assert_eq!(settings.default_savepath(), "/data/out");
    }

    #[test]
    fn dialog_cancel_and_bad_suffix() {
        let mut settings = MemorySettings::new();
        assert!(matches!(
            resolve(2, &mut settings, &FixedPrompt::new(None)),
            Err(ExportError::UserCancel)
        ));
        assert!(matches!(
            resolve(2, &mut settings, &FixedPrompt::new(Some("/data/out/mine.gif"))),
            Err(ExportError::InvalidDestination(_))
        ));
        assert!(matches!(
            resolve(2, &mut settings, &FixedPrompt::new(Some("/data/out/mine"))),
            Err(ExportError::InvalidDestination(_))
        ));
        assert!(matches!(
            resolve(2, &mut settings, &FixedPrompt::new(Some("/data/out/mine.tar.png"))),
            Err(ExportError::InvalidDestination(_))
        ));
        assert_eq!(settings.default_savepath(), "");
    }

    #[test]
    fn unknown_index_goes_to_temp() {
        let mut settings = MemorySettings::new();
        let plan = resolve(9, &mut settings, &FixedPrompt::new(None)).unwrap();
        assert_eq!(plan.file, Some(PathBuf::from("/tmp").join(NAME)));
        assert!(!plan.clipboard);
    }

    #[test]
    fn specified_path_rules() {
        let now = now();
        assert_eq!(
            specified_path_target(Path::new("/nonexistent/shot.jpg"), &now).unwrap(),
            PathBuf::from("/nonexistent/shot.jpg")
        );
        assert_eq!(
            specified_path_target(Path::new("/nonexistent/shot"), &now).unwrap(),
            PathBuf::from("/nonexistent/shot.png")
        );
        assert!(specified_path_target(Path::new("/nonexistent/shot.gif"), &now).is_err());

        let dir = std::env::temp_dir();
        assert_eq!(specified_path_target(&dir, &now).unwrap(), dir.join(NAME));
    }
}
