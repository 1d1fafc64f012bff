//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::close_flow::ConfirmChoice;
use crate::model::TabId;

/// Document-specific messages (text editing, undo/redo, font size)
///
/// All act on the active tab and are ignored when no tab is open.
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    /// Insert typed text at the cursor
    InsertText(String),
    /// Insert plain text read from the clipboard
    Paste(String),
    /// Delete selection or character before cursor (Backspace)
    DeleteBackward,
    /// Move the cursor to a char offset (mouse click)
    SetCursor(usize),
    /// Undo last edit
    Undo,
    /// Redo last undone edit
    Redo,
    /// Ctrl+wheel up
    IncreaseFontSize,
    /// Ctrl+wheel down
    DecreaseFontSize,
    /// Ctrl+middle-click
    ResetFontSize,
}

/// Find bar / replace bar messages
#[derive(Debug, Clone)]
pub enum SearchMsg {
    /// Show or hide the find bar (hides the replace bar)
    ToggleFindBar,
    /// Show or hide the replace bar (hides the find bar)
    ToggleReplaceBar,
    /// Edit the find bar query
    SetFindQuery(String),
    /// Toggle the find bar's "match case" checkbox
    ToggleFindMatchCase,
    /// Edit the replace bar's "find what" field
    SetReplaceQuery(String),
    /// Edit the replace bar's "replace with" field
    SetReplacement(String),
    /// Toggle the replace bar's "match case" checkbox
    ToggleReplaceMatchCase,
    /// Find button
    FindNext,
    /// Replace button
    ReplaceNext,
    /// Replace All button
    ReplaceAll,
}

/// App messages (file I/O, tabs, dialogs, exit)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Create an untitled document in a new tab
    NewFile,
    /// User requested "Open File..." dialog
    OpenFileDialog,
    /// Open File dialog returned paths (empty if cancelled)
    OpenFileDialogResult { paths: Vec<PathBuf> },
    /// Open a specific path
    OpenPath(PathBuf),
    /// Files dropped on the window
    FilesDropped(Vec<PathBuf>),
    /// Save current file
    SaveFile,
    /// User requested "Save As..." dialog
    SaveFileAs,
    /// Save As dialog returned a path (or None if cancelled)
    SaveFileAsDialogResult { path: Option<PathBuf> },
    /// Switch to the tab at an index
    ActivateTab(usize),
    /// Close the active tab (Ctrl+W)
    CloseActiveTab,
    /// Close a specific tab (tab close button)
    CloseTab(TabId),
    /// Window close requested
    RequestExit,
    /// Answer to the last `Cmd::ShowConfirm`
    ConfirmResult(ConfirmChoice),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Document messages (text editing)
    Document(DocumentMsg),
    /// Find/replace messages
    Search(SearchMsg),
    /// App messages (files, tabs, exit)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create an insert text message
    pub fn insert(text: impl Into<String>) -> Self {
        Msg::Document(DocumentMsg::InsertText(text.into()))
    }

    /// Create an open path message
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Msg::App(AppMsg::OpenPath(path.into()))
    }

    /// Create a confirmation answer message
    pub fn confirm(choice: ConfirmChoice) -> Self {
        Msg::App(AppMsg::ConfirmResult(choice))
    }
}
