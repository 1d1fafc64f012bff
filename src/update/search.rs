//! Find bar and replace bar handlers

use crate::commands::Cmd;
use crate::error::EditorError;
use crate::messages::SearchMsg;
use crate::model::AppModel;
use crate::search::{count_occurrences, locate, replace_all, replace_one};

fn matches_label(total: usize) -> String {
    if total == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", total)
    }
}

fn not_found(query: &str) -> Cmd {
    Cmd::info(format!("Cannot find \"{}\"", query))
}

/// Handle find/replace messages
pub fn update_search(model: &mut AppModel, msg: SearchMsg) -> Option<Cmd> {
    match msg {
        // Query fields stay editable with no document open
        SearchMsg::SetFindQuery(query) => {
            model.ui.find_bar.query = query;
            return Some(Cmd::Redraw);
        }
        SearchMsg::SetReplaceQuery(query) => {
            model.ui.replace_bar.query = query;
            return Some(Cmd::Redraw);
        }
        SearchMsg::SetReplacement(text) => {
            model.ui.replace_bar.replacement = text;
            return Some(Cmd::Redraw);
        }
        SearchMsg::ToggleFindMatchCase => {
            model.ui.find_bar.case_sensitive = !model.ui.find_bar.case_sensitive;
            return Some(Cmd::Redraw);
        }
        SearchMsg::ToggleReplaceMatchCase => {
            model.ui.replace_bar.case_sensitive = !model.ui.replace_bar.case_sensitive;
            return Some(Cmd::Redraw);
        }
        _ => {}
    }

    if !model.search_enabled() {
        model.ui.set_status("Find and replace need an open document");
        return Some(Cmd::Redraw);
    }

    match msg {
        SearchMsg::ToggleFindBar => {
            model.ui.toggle_find_bar();
            Some(Cmd::Redraw)
        }

        SearchMsg::ToggleReplaceBar => {
            model.ui.toggle_replace_bar();
            Some(Cmd::Redraw)
        }

        SearchMsg::FindNext => find_next(model),
        SearchMsg::ReplaceNext => replace_next(model),
        SearchMsg::ReplaceAll => replace_everything(model),

        SearchMsg::SetFindQuery(_)
        | SearchMsg::SetReplaceQuery(_)
        | SearchMsg::SetReplacement(_)
        | SearchMsg::ToggleFindMatchCase
        | SearchMsg::ToggleReplaceMatchCase => None,
    }
}

/// Select the next occurrence of the find bar query after the cursor
fn find_next(model: &mut AppModel) -> Option<Cmd> {
    let query = model.ui.find_bar.query.clone();
    let case_sensitive = model.ui.find_bar.case_sensitive;
    if query.is_empty() {
        return Some(Cmd::error(&EditorError::InvalidArgument("empty find query")));
    }

    let doc = model.tabs.active_document_mut()?;
    match locate(&query, doc.buffer(), doc.cursor, case_sensitive) {
        Some(found) => {
            tracing::debug!("Found {:?} at {:?}", query, found);
            doc.select(found);
            let total = count_occurrences(&query, doc.buffer(), case_sensitive);
            model.ui.set_status(format!("Found \"{}\" ({})", query, matches_label(total)));
            Some(Cmd::Redraw)
        }
        None => Some(not_found(&query)),
    }
}

/// Replace the next occurrence of the replace bar query.
///
/// A selection (e.g. from a previous find) is the first candidate.
fn replace_next(model: &mut AppModel) -> Option<Cmd> {
    let bar = model.ui.replace_bar.clone();
    let doc = model.tabs.active_document_mut()?;
    let from = doc.selection.as_ref().map_or(doc.cursor, |r| r.start);

    match replace_one(&bar.query, &bar.replacement, doc, from, bar.case_sensitive) {
        Ok(Some(_)) => {
            model.ui.set_status("Replaced 1 occurrence");
            Some(Cmd::Redraw)
        }
        Ok(None) => Some(not_found(&bar.query)),
        Err(e) => {
            tracing::warn!("Replace failed: {}", e);
            Some(Cmd::error(&e))
        }
    }
}

/// Replace every match of the replace bar pattern as one undoable edit
fn replace_everything(model: &mut AppModel) -> Option<Cmd> {
    let bar = model.ui.replace_bar.clone();
    let doc = model.tabs.active_document_mut()?;

    match replace_all(&bar.query, &bar.replacement, doc, bar.case_sensitive) {
        Ok(0) => Some(not_found(&bar.query)),
        Ok(count) => {
            let noun = if count == 1 { "occurrence" } else { "occurrences" };
            model.ui.set_status(format!("Replaced {} {}", count, noun));
            Some(Cmd::Redraw)
        }
        Err(e) => {
            tracing::warn!("Replace all failed: {}", e);
            Some(Cmd::error(&e))
        }
    }
}
