//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! Dialog commands are answered by the host with a follow-up message.

use std::path::PathBuf;

use crate::error::EditorError;

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational, e.g. "not found"
    Info,
    /// Rejected input
    Warning,
    /// Failed file or search operation
    Error,
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw of the UI
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // File dialogs
    /// Show native open file dialog.
    /// Answered with `AppMsg::OpenFileDialogResult`.
    ShowOpenFileDialog {
        /// Starting directory for the dialog
        start_dir: Option<PathBuf>,
    },
    /// Show native save file dialog.
    /// Answered with `AppMsg::SaveFileAsDialogResult`.
    ShowSaveFileDialog {
        /// Suggested file path (for pre-filling name/directory)
        suggested_path: Option<PathBuf>,
    },

    /// Show a modal Save / Discard / Cancel choice (default Save).
    /// Answered with `AppMsg::ConfirmResult`.
    ShowConfirm { title: String, message: String },

    /// Show a blocking notice
    ShowNotice { level: NoticeLevel, message: String },

    // === Application Commands ===
    /// Terminate the application
    Quit,
}

impl Cmd {
    /// Create a batch of commands, flattening trivial cases
    pub fn batch(mut cmds: Vec<Cmd>) -> Self {
        cmds.retain(|c| *c != Cmd::None);
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn error(err: &EditorError) -> Self {
        let level = match err {
            EditorError::InvalidArgument(_) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        Cmd::ShowNotice {
            level,
            message: err.user_message(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Cmd::ShowNotice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Dialogs don't need immediate redraw - they'll trigger messages when done
            Cmd::ShowOpenFileDialog { .. } => false,
            Cmd::ShowSaveFileDialog { .. } => false,
            Cmd::ShowConfirm { .. } => false,
            Cmd::ShowNotice { .. } => true,
            // Quit doesn't need redraw - app is exiting
            Cmd::Quit => false,
        }
    }

    /// Iterate over this command and everything nested in batches
    pub fn flatten(&self) -> Vec<&Cmd> {
        match self {
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.flatten()).collect(),
            other => vec![other],
        }
    }

    /// Whether this command (or any nested one) terminates the app
    pub fn is_quit(&self) -> bool {
        self.flatten().iter().any(|c| matches!(c, Cmd::Quit))
    }
}
