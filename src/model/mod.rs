//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod tabs;
pub mod ui;

pub use document::{Document, DocumentEvent, EditOperation};
pub use tabs::{display_title, tooltip, OpenOutcome, Tab, TabId, TabManager};
pub use ui::{AfterSave, FindBarState, PendingPrompt, ReplaceBarState, UiState};

use crate::config::EditorConfig;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Open documents in tab order
    pub tabs: TabManager,
    /// UI state (status message, find/replace bars, pending prompt)
    pub ui: UiState,
    /// Persisted editor configuration
    pub config: EditorConfig,
}

impl AppModel {
    /// Create an empty model (no tabs open) from the given configuration
    pub fn new(config: EditorConfig) -> Self {
        let tabs = TabManager::new(config.effective_title_width())
            .with_font_size(config.effective_font_size());

        let mut ui = UiState::new();
        ui.find_bar.case_sensitive = config.find_match_case;
        ui.replace_bar.case_sensitive = config.replace_match_case;

        Self { tabs, ui, config }
    }

    /// Document in the active tab
    pub fn active_document(&self) -> Option<&Document> {
        self.tabs.active_document()
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        self.tabs.active_document_mut()
    }

    /// Find and replace act on the active tab and are disabled without one
    pub fn search_enabled(&self) -> bool {
        !self.tabs.is_empty()
    }

    /// Window title: the active document's full name plus the app name
    pub fn window_title(&self) -> String {
        match self.active_document() {
            Some(doc) => {
                let marker = if doc.is_modified() { "*" } else { "" };
                format!("{}{} - opent", doc.display_name(), marker)
            }
            None => "opent".to_string(),
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
