//! Desktop notifications

use std::path::Path;

pub const APP_TITLE: &str = "SnapRect";
const ICON: &str = "camera-photo";
const OPEN_ACTION: &str = "_open";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub icon: String,
    pub body: String,
    /// `(id, label)` pairs.
    pub actions: Vec<(String, String)>,
    /// `(name, value)` pairs passed to the notification server.
    pub hints: Vec<(String, String)>,
}

impl Notification {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: APP_TITLE.to_owned(),
            icon: ICON.to_owned(),
            body: body.into(),
            actions: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Clipboard saves carry no action; file saves offer to open the file.
    pub fn saved(file: Option<&Path>) -> Self {
        match file {
            None => Self::new("Picture has been saved to clipboard"),
            Some(path) => {
                let mut n = Self::new(format!("Picture has been saved to {}", path.display()));
                n.actions.push((OPEN_ACTION.to_owned(), "View".to_owned()));
                n.hints.push((
                    format!("x-snaprect-action-{}", OPEN_ACTION),
                    format!("xdg-open,{}", path.display()),
                ));
                n
            }
        }
    }

    pub fn delayed_start(secs: u64) -> Self {
        Self::new(format!("SnapRect will start after {} seconds", secs))
    }
}

pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Notifications through the platform notification service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        let mut n = notify_rust::Notification::new();
        n.appname(APP_TITLE)
            .summary(&notification.title)
            .body(&notification.body)
            .icon(&notification.icon);

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            for (id, label) in &notification.actions {
                n.action(id, label);
            }
            for (name, value) in &notification.hints {
                n.hint(notify_rust::Hint::Custom(name.clone(), value.clone()));
            }
        }

        if let Err(e) = n.show() {
            log::warn!("[NOTIFY] Could not show notification: {}", e);
        }
    }
}

/// Used with `--no-notification`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, notification: &Notification) {
        log::debug!("[NOTIFY] Suppressed: {}", notification.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_notification_has_no_actions() {
        let n = Notification::saved(None);
        assert_eq!(n.body, "Picture has been saved to clipboard");
        assert!(n.actions.is_empty());
        assert!(n.hints.is_empty());
    }

    #[test]
    fn file_notification_offers_view() {
        let n = Notification::saved(Some(Path::new("/tmp/shot.png")));
        assert_eq!(n.body, "Picture has been saved to /tmp/shot.png");
        assert_eq!(n.actions, vec![("_open".to_string(), "View".to_string())]);
        assert_eq!(n.hints[0].1, "xdg-open,/tmp/shot.png");
    }
}
