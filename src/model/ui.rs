//! UI state - status message, find/replace bars and pending prompts

use super::tabs::TabId;

/// State of the find bar
#[derive(Debug, Clone, Default)]
pub struct FindBarState {
    pub visible: bool,
    /// Search query
    pub query: String,
    /// "Match case" checkbox
    pub case_sensitive: bool,
}

/// State of the replace bar
#[derive(Debug, Clone, Default)]
pub struct ReplaceBarState {
    pub visible: bool,
    /// "Find what" field
    pub query: String,
    /// "Replace with" field
    pub replacement: String,
    /// "Match case" checkbox
    pub case_sensitive: bool,
}

/// What to do once a Save As path has been chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
    Nothing,
    CloseTab,
    Exit,
}

/// A question the host is currently showing the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPrompt {
    /// Save / Discard / Cancel for closing this tab
    ConfirmClose(TabId),
    /// Save / Discard / Cancel for exiting the app
    ConfirmExit,
    /// Save As chooser for this tab
    SaveAs { tab: TabId, then: AfterSave },
}

/// UI state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Message displayed in the status bar
    pub status_message: String,
    pub find_bar: FindBarState,
    pub replace_bar: ReplaceBarState,
    /// Prompt awaiting an answer from the host
    pub pending: Option<PendingPrompt>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Show/hide the find bar; the replace bar is hidden when it shows
    pub fn toggle_find_bar(&mut self) {
        self.replace_bar.visible = false;
        self.find_bar.visible = !self.find_bar.visible;
    }

    /// Show/hide the replace bar; the find bar is hidden when it shows
    pub fn toggle_replace_bar(&mut self) {
        self.find_bar.visible = false;
        self.replace_bar.visible = !self.replace_bar.visible;
    }
}
