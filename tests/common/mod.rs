//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use opent::commands::{Cmd, NoticeLevel};
use opent::config::EditorConfig;
use opent::messages::{AppMsg, Msg};
use opent::model::AppModel;
use opent::update::update;

/// Create an empty test model with default configuration
pub fn test_model() -> AppModel {
    AppModel::new(EditorConfig::default())
}

/// Create a test model with one untitled tab holding `text` (clean)
pub fn test_model_with_text(text: &str) -> AppModel {
    let mut model = test_model();
    model.tabs.open_text(text);
    model
}

/// Write `contents` to `dir/name`, returning the path
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Create a temp dir holding `name` with `contents`, and a model with that
/// file open in the active tab
pub fn test_model_with_file(name: &str, contents: &str) -> (TempDir, PathBuf, AppModel) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), name, contents);
    let mut model = test_model();
    model.tabs.open_path(&path).unwrap();
    (dir, path, model)
}

/// Text of the active document
pub fn active_text(model: &AppModel) -> String {
    model.active_document().unwrap().text()
}

/// Titles of all tabs in order
pub fn titles(model: &AppModel) -> Vec<String> {
    model.tabs.tabs().iter().map(|t| t.title.clone()).collect()
}

/// Shorthand for `update(model, Msg::App(msg))`
pub fn app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    update(model, Msg::App(msg))
}

/// Whether the command asks the host for a Save / Discard / Cancel answer
pub fn asks_confirm(cmd: &Option<Cmd>) -> bool {
    cmd.as_ref()
        .is_some_and(|c| c.flatten().iter().any(|c| matches!(c, Cmd::ShowConfirm { .. })))
}

/// Whether the command opens the save chooser
pub fn asks_save_path(cmd: &Option<Cmd>) -> bool {
    cmd.as_ref().is_some_and(|c| {
        c.flatten()
            .iter()
            .any(|c| matches!(c, Cmd::ShowSaveFileDialog { .. }))
    })
}

/// Whether the command quits the app
pub fn quits(cmd: &Option<Cmd>) -> bool {
    cmd.as_ref().is_some_and(Cmd::is_quit)
}

/// Level of the first notice in the command, if any
pub fn notice_level(cmd: &Option<Cmd>) -> Option<NoticeLevel> {
    cmd.as_ref()?.flatten().into_iter().find_map(|c| match c {
        Cmd::ShowNotice { level, .. } => Some(*level),
        _ => None,
    })
}
