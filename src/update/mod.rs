//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod document;
mod search;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::TabSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use document::update_document;
pub use search::update_search;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Document(m) => document::update_document(model, m),
        Msg::Search(m) => search::update_search(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    // Titles follow the documents' change notifications
    let titles_changed = model.tabs.sync_titles();
    if titles_changed && result.is_none() {
        return Some(Cmd::Redraw);
    }
    result
}

/// Traced update wrapper (debug builds only)
///
/// Logs each message and the tab state it changed, then checks the tab
/// manager's invariants.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = TabSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = TabSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "tabs", %diff, "state changed");
    }

    model.tabs.assert_invariants();
    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Document::InsertText("x")`
/// - `App::CloseTab(TabId(2))`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Search(m) => format!("Search::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
