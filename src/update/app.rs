//! App message handlers (file operations, tabs, exit)

use std::path::{Path, PathBuf};

use crate::close_flow::{
    close_prompt, decide_exit, decide_tab_close, exit_prompt, resolve_exit, resolve_tab_close,
    CloseDecision, ClosePlan, ConfirmChoice, ExitDecision, ExitPlan,
};
use crate::commands::Cmd;
use crate::config_paths::default_save_dir;
use crate::error::EditorError;
use crate::messages::AppMsg;
use crate::model::{AfterSave, AppModel, OpenOutcome, PendingPrompt, TabId};

/// Handle app messages (file operations, tabs, exit)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::NewFile => {
            model.tabs.open_new();
            model.ui.set_status("New file");
            Some(Cmd::Redraw)
        }

        AppMsg::OpenFileDialog => {
            let start_dir = model
                .active_document()
                .and_then(|doc| doc.file_path())
                .and_then(Path::parent)
                .map(Path::to_path_buf);
            Some(Cmd::ShowOpenFileDialog { start_dir })
        }

        AppMsg::OpenFileDialogResult { paths } => {
            if paths.is_empty() {
                // User cancelled
                return None;
            }
            let cmds = paths.iter().map(|path| open_path(model, path)).collect();
            Some(Cmd::batch(cmds))
        }

        AppMsg::OpenPath(path) => Some(open_path(model, &path)),

        AppMsg::FilesDropped(paths) => {
            let cmds = paths
                .iter()
                .filter(|path| {
                    let exists = path.exists();
                    if !exists {
                        tracing::debug!("Skipping dropped path {}: missing", path.display());
                    }
                    exists
                })
                .map(|path| open_path(model, path))
                .collect();
            Some(Cmd::batch(cmds))
        }

        AppMsg::SaveFile => {
            let tab = model.tabs.active_tab()?;
            let id = tab.id;
            if tab.document.is_untitled() || tab.document.is_new_file() {
                return Some(begin_save_as(model, id, AfterSave::Nothing));
            }
            match save(model, id, None) {
                Ok(()) => Some(Cmd::Redraw),
                Err(e) => Some(Cmd::error(&e)),
            }
        }

        AppMsg::SaveFileAs => {
            let id = model.tabs.active_tab_id()?;
            Some(begin_save_as(model, id, AfterSave::Nothing))
        }

        AppMsg::SaveFileAsDialogResult { path } => finish_save_as(model, path),

        AppMsg::ActivateTab(index) => {
            if model.tabs.activate_index(index) {
                Some(Cmd::Redraw)
            } else {
                tracing::warn!("No tab at index {}", index);
                None
            }
        }

        AppMsg::CloseActiveTab => {
            let id = model.tabs.active_tab_id()?;
            request_close(model, id)
        }

        AppMsg::CloseTab(id) => request_close(model, id),

        AppMsg::RequestExit => match decide_exit(&model.tabs) {
            ExitDecision::ExitNow => Some(Cmd::Quit),
            ExitDecision::Confirm { dirty } => {
                tracing::debug!("Exit requested with {} unsaved tabs", dirty.len());
                let (title, message) = exit_prompt(dirty.len());
                model.ui.pending = Some(PendingPrompt::ConfirmExit);
                Some(Cmd::ShowConfirm { title, message })
            }
        },

        AppMsg::ConfirmResult(choice) => answer_confirm(model, choice),
    }
}

// ============================================================================
// Opening
// ============================================================================

/// Open one path, turning failures into a blocking notice
fn open_path(model: &mut AppModel, path: &Path) -> Cmd {
    match model.tabs.open_path(path) {
        Ok(OpenOutcome::Opened(id)) => {
            let status = match model.tabs.document(id) {
                Some(doc) => format!("Opened: {} ({})", path.display(), doc.encoding.name()),
                None => format!("Opened: {}", path.display()),
            };
            model.ui.set_status(status);
            Cmd::Redraw
        }
        Ok(OpenOutcome::Activated(_)) => {
            model.ui.set_status(format!("Already open: {}", path.display()));
            Cmd::Redraw
        }
        Err(e) => {
            tracing::warn!("Failed to open {}: {}", path.display(), e);
            Cmd::error(&e)
        }
    }
}

// ============================================================================
// Saving
// ============================================================================

/// Save a tab to `target` (or its own path), updating the status bar
fn save(model: &mut AppModel, id: TabId, target: Option<&Path>) -> Result<(), EditorError> {
    let path = model.tabs.save_tab(id, target)?;
    model.ui.set_status(format!("Saved: {}", path.display()));
    Ok(())
}

/// Ask the host for a Save As path for tab `id`
fn begin_save_as(model: &mut AppModel, id: TabId, then: AfterSave) -> Cmd {
    let suggested_path = match model.tabs.document(id) {
        Some(doc) => match doc.file_path() {
            Some(path) => Some(path.to_path_buf()),
            None => default_save_dir().map(|dir| dir.join(format!("{}.txt", doc.display_name()))),
        },
        None => None,
    };
    model.ui.pending = Some(PendingPrompt::SaveAs { tab: id, then });
    Cmd::ShowSaveFileDialog { suggested_path }
}

fn finish_save_as(model: &mut AppModel, path: Option<PathBuf>) -> Option<Cmd> {
    let Some(PendingPrompt::SaveAs { tab, then }) = model.ui.pending.take() else {
        tracing::warn!("Save As result without a pending Save As");
        return None;
    };

    let Some(path) = path else {
        // An abandoned chooser abandons whatever was waiting on it
        model.ui.set_status("Save cancelled");
        return Some(Cmd::Redraw);
    };

    if let Err(e) = save(model, tab, Some(&path)) {
        return Some(Cmd::error(&e));
    }

    match then {
        AfterSave::Nothing => Some(Cmd::Redraw),
        AfterSave::CloseTab => {
            model.tabs.remove_tab(tab);
            Some(Cmd::Redraw)
        }
        AfterSave::Exit => Some(Cmd::Quit),
    }
}

// ============================================================================
// Closing & exit
// ============================================================================

fn request_close(model: &mut AppModel, id: TabId) -> Option<Cmd> {
    let doc = model.tabs.document(id)?;
    match decide_tab_close(doc) {
        CloseDecision::CloseNow => {
            model.tabs.remove_tab(id);
            Some(Cmd::Redraw)
        }
        CloseDecision::Confirm => {
            let (title, message) = close_prompt(doc);
            // Show the tab the question is about
            model.tabs.activate(id);
            model.ui.pending = Some(PendingPrompt::ConfirmClose(id));
            Some(Cmd::ShowConfirm { title, message })
        }
    }
}

fn answer_confirm(model: &mut AppModel, choice: ConfirmChoice) -> Option<Cmd> {
    match model.ui.pending.take() {
        Some(PendingPrompt::ConfirmClose(id)) => {
            let doc = model.tabs.document(id)?;
            match resolve_tab_close(choice, doc) {
                ClosePlan::SaveThenClose => match save(model, id, None) {
                    Ok(()) => {
                        model.tabs.remove_tab(id);
                        Some(Cmd::Redraw)
                    }
                    // The tab stays open and dirty
                    Err(e) => Some(Cmd::error(&e)),
                },
                ClosePlan::SaveAsThenClose => Some(begin_save_as(model, id, AfterSave::CloseTab)),
                ClosePlan::Close => {
                    model.tabs.remove_tab(id);
                    Some(Cmd::Redraw)
                }
                ClosePlan::Keep => Some(Cmd::Redraw),
            }
        }

        Some(PendingPrompt::ConfirmExit) => match resolve_exit(choice, &model.tabs) {
            ExitPlan::SaveActiveThenExit(id) => match save(model, id, None) {
                Ok(()) => Some(Cmd::Quit),
                Err(e) => Some(Cmd::error(&e)),
            },
            ExitPlan::SaveAsActiveThenExit(id) => Some(begin_save_as(model, id, AfterSave::Exit)),
            ExitPlan::Exit => Some(Cmd::Quit),
            ExitPlan::Abort => Some(Cmd::Redraw),
        },

        Some(other @ PendingPrompt::SaveAs { .. }) => {
            tracing::warn!("Confirmation answer while waiting on {:?}", other);
            model.ui.pending = Some(other);
            None
        }

        None => {
            tracing::warn!("Confirmation answer without a pending prompt");
            None
        }
    }
}
