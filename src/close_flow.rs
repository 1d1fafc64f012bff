//! Unsaved-changes confirmation for closing a tab and exiting the app
//!
//! Pure decision logic: what to ask, and what to do with the answer. The
//! update layer presents the question through `Cmd::ShowConfirm` and carries
//! out the resulting plan.

use crate::model::{Document, TabId, TabManager};

/// Choice returned by the Save / Discard / Cancel dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmChoice {
    #[default]
    Save,
    Discard,
    Cancel,
}

/// Whether closing a tab needs the user's confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// No unsaved edits: close right away
    CloseNow,
    /// Unsaved edits: ask Save / Discard / Cancel
    Confirm,
}

/// Plan for a tab close once the user has answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePlan {
    /// Save to the document's own path, close on success
    SaveThenClose,
    /// Ask for a path first (untitled document), then save and close
    SaveAsThenClose,
    /// Close and drop the edits
    Close,
    /// Keep the tab open
    Keep,
}

/// Whether exiting needs the user's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitDecision {
    ExitNow,
    /// Ask once, covering every listed dirty tab
    Confirm { dirty: Vec<TabId> },
}

/// Plan for an exit once the user has answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPlan {
    /// Save the active tab, exit on success
    SaveActiveThenExit(TabId),
    /// Ask for a path for the untitled active tab, save, then exit
    SaveAsActiveThenExit(TabId),
    /// Exit without saving anything
    Exit,
    /// Stay open
    Abort,
}

/// Closing a dirty document always asks, untitled or not
pub fn decide_tab_close(document: &Document) -> CloseDecision {
    if document.is_modified() {
        CloseDecision::Confirm
    } else {
        CloseDecision::CloseNow
    }
}

pub fn resolve_tab_close(choice: ConfirmChoice, document: &Document) -> ClosePlan {
    match choice {
        ConfirmChoice::Save if document.is_untitled() => ClosePlan::SaveAsThenClose,
        ConfirmChoice::Save => ClosePlan::SaveThenClose,
        ConfirmChoice::Discard => ClosePlan::Close,
        ConfirmChoice::Cancel => ClosePlan::Keep,
    }
}

pub fn decide_exit(tabs: &TabManager) -> ExitDecision {
    let dirty = tabs.dirty_tabs();
    if dirty.is_empty() {
        ExitDecision::ExitNow
    } else {
        ExitDecision::Confirm { dirty }
    }
}

/// Only the active tab is saved on exit; other dirty tabs are not.
pub fn resolve_exit(choice: ConfirmChoice, tabs: &TabManager) -> ExitPlan {
    match choice {
        ConfirmChoice::Save => match tabs.active_tab() {
            Some(tab) if tab.document.is_untitled() => ExitPlan::SaveAsActiveThenExit(tab.id),
            Some(tab) => ExitPlan::SaveActiveThenExit(tab.id),
            None => ExitPlan::Exit,
        },
        ConfirmChoice::Discard => ExitPlan::Exit,
        ConfirmChoice::Cancel => ExitPlan::Abort,
    }
}

/// Text for the single-tab close prompt
pub fn close_prompt(document: &Document) -> (String, String) {
    (
        "Unsaved changes".to_string(),
        format!(
            "\"{}\" has unsaved changes. Save before closing?",
            document.display_name()
        ),
    )
}

/// Text for the exit prompt
pub fn exit_prompt(dirty_count: usize) -> (String, String) {
    let message = if dirty_count == 1 {
        "There is an unsaved file. Save before exiting?".to_string()
    } else {
        format!(
            "There are {} unsaved files. Save before exiting?",
            dirty_count
        )
    };
    ("Unsaved changes".to_string(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_choice_is_save() {
        assert_eq!(ConfirmChoice::default(), ConfirmChoice::Save);
    }

    #[test]
    fn test_clean_document_closes_now() {
        assert_eq!(decide_tab_close(&Document::new()), CloseDecision::CloseNow);
    }

    #[test]
    fn test_dirty_untitled_document_asks() {
        let mut doc = Document::new();
        doc.insert_text("draft");
        assert_eq!(decide_tab_close(&doc), CloseDecision::Confirm);
        assert_eq!(
            resolve_tab_close(ConfirmChoice::Save, &doc),
            ClosePlan::SaveAsThenClose
        );
    }

    #[test]
    fn test_resolve_tab_close_for_associated_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new();
        doc.save_to(&dir.path().join("a.txt")).unwrap();
        doc.insert_text("edit");

        assert_eq!(resolve_tab_close(ConfirmChoice::Save, &doc), ClosePlan::SaveThenClose);
        assert_eq!(resolve_tab_close(ConfirmChoice::Discard, &doc), ClosePlan::Close);
        assert_eq!(resolve_tab_close(ConfirmChoice::Cancel, &doc), ClosePlan::Keep);
    }

    #[test]
    fn test_decide_exit_collects_all_dirty_tabs() {
        let mut tabs = TabManager::default();
        let a = tabs.open_new();
        tabs.active_document_mut().unwrap().insert_text("a");
        tabs.open_new();
        let c = tabs.open_new();
        tabs.active_document_mut().unwrap().insert_text("c");

        assert_eq!(decide_exit(&tabs), ExitDecision::Confirm { dirty: vec![a, c] });
    }

    #[test]
    fn test_decide_exit_clean() {
        let mut tabs = TabManager::default();
        tabs.open_new();
        assert_eq!(decide_exit(&tabs), ExitDecision::ExitNow);
        assert_eq!(decide_exit(&TabManager::default()), ExitDecision::ExitNow);
    }

    #[test]
    fn test_resolve_exit_saves_active_only() {
        let mut tabs = TabManager::default();
        tabs.open_new();
        let active = tabs.open_new();
        assert_eq!(
            resolve_exit(ConfirmChoice::Save, &tabs),
            ExitPlan::SaveAsActiveThenExit(active)
        );
        assert_eq!(resolve_exit(ConfirmChoice::Discard, &tabs), ExitPlan::Exit);
        assert_eq!(resolve_exit(ConfirmChoice::Cancel, &tabs), ExitPlan::Abort);
    }

    #[test]
    fn test_prompts_name_the_document() {
        let (_, message) = close_prompt(&Document::new());
        assert!(message.contains("untitled"));
        assert!(exit_prompt(3).1.contains('3'));
    }
}
