//! Native dialogs and clipboard access
//!
//! The `Dialogs` trait is the seam between the message loop and the
//! platform, so the loop can run against scripted answers in tests.

use std::path::{Path, PathBuf};

use opent::close_flow::ConfirmChoice;
use opent::commands::NoticeLevel;

const SAVE_LABEL: &str = "Save";
const DISCARD_LABEL: &str = "Don't Save";
const CANCEL_LABEL: &str = "Cancel";

/// Host services the editor core asks for through `Cmd`s
pub trait Dialogs {
    /// Pick files to open. Empty when cancelled.
    fn pick_files(&mut self, start_dir: Option<&Path>) -> Vec<PathBuf>;
    /// Pick a path to save to. `None` when cancelled.
    fn pick_save_path(&mut self, suggested_path: Option<&Path>) -> Option<PathBuf>;
    /// Ask Save / Discard / Cancel
    fn confirm(&mut self, title: &str, message: &str) -> ConfirmChoice;
    /// Show a blocking notice
    fn notice(&mut self, level: NoticeLevel, message: &str);
    /// Plain text on the clipboard, if any
    fn clipboard_text(&mut self) -> Option<String>;
}

/// Dialogs backed by `rfd` and the clipboard by `arboard`
#[derive(Debug, Default)]
pub struct RfdDialogs;

impl Dialogs for RfdDialogs {
    fn pick_files(&mut self, start_dir: Option<&Path>) -> Vec<PathBuf> {
        let mut dlg = rfd::FileDialog::new()
            .add_filter("Text files", &["txt"])
            .add_filter("All files", &["*"]);
        if let Some(dir) = start_dir {
            dlg = dlg.set_directory(dir);
        }
        dlg.pick_files().unwrap_or_default()
    }

    fn pick_save_path(&mut self, suggested_path: Option<&Path>) -> Option<PathBuf> {
        let mut dlg = rfd::FileDialog::new()
            .add_filter("Text files", &["txt"])
            .add_filter("All files", &["*"]);
        if let Some(path) = suggested_path {
            if let Some(dir) = path.parent() {
                dlg = dlg.set_directory(dir);
            }
            if let Some(name) = path.file_name() {
                dlg = dlg.set_file_name(name.to_string_lossy());
            }
        }
        dlg.save_file()
    }

    fn confirm(&mut self, title: &str, message: &str) -> ConfirmChoice {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNoCancelCustom(
                SAVE_LABEL.to_string(),
                DISCARD_LABEL.to_string(),
                CANCEL_LABEL.to_string(),
            ))
            .show();
        choice_from_result(&result)
    }

    fn notice(&mut self, level: NoticeLevel, message: &str) {
        let (level, title) = match level {
            NoticeLevel::Info => (rfd::MessageLevel::Info, "opent"),
            NoticeLevel::Warning => (rfd::MessageLevel::Warning, "Warning"),
            NoticeLevel::Error => (rfd::MessageLevel::Error, "Error"),
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn clipboard_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("No clipboard text: {}", e);
                None
            }
        }
    }
}

/// Map a message dialog result onto the three-way choice.
///
/// Closing the dialog without a button counts as Cancel.
fn choice_from_result(result: &rfd::MessageDialogResult) -> ConfirmChoice {
    match result {
        rfd::MessageDialogResult::Yes => ConfirmChoice::Save,
        rfd::MessageDialogResult::No => ConfirmChoice::Discard,
        rfd::MessageDialogResult::Custom(label) if label == SAVE_LABEL => ConfirmChoice::Save,
        rfd::MessageDialogResult::Custom(label) if label == DISCARD_LABEL => {
            ConfirmChoice::Discard
        }
        _ => ConfirmChoice::Cancel,
    }
}
