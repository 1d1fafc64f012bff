//! Document message handlers (text editing, undo/redo, font size)

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::AppModel;

/// Handle document messages. All of them act on the active tab.
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    let default_font_size = model.config.effective_font_size();
    let Some(doc) = model.tabs.active_document_mut() else {
        tracing::debug!("Ignoring {:?}: no document open", msg);
        return None;
    };

    match msg {
        DocumentMsg::InsertText(text) => {
            doc.insert_text(&text);
        }

        DocumentMsg::Paste(text) => {
            doc.insert_pasted_text(&text);
        }

        DocumentMsg::DeleteBackward => {
            doc.delete_backward();
        }

        DocumentMsg::SetCursor(offset) => {
            doc.set_cursor(offset);
        }

        DocumentMsg::Undo => {
            if !doc.undo() {
                model.ui.set_status("Nothing to undo");
            }
        }

        DocumentMsg::Redo => {
            if !doc.redo() {
                model.ui.set_status("Nothing to redo");
            }
        }

        DocumentMsg::IncreaseFontSize => {
            let size = doc.increase_font_size();
            model.ui.set_status(format!("Font size: {}", size));
        }

        DocumentMsg::DecreaseFontSize => {
            let size = doc.decrease_font_size();
            model.ui.set_status(format!("Font size: {}", size));
        }

        DocumentMsg::ResetFontSize => {
            let size = doc.set_font_size(default_font_size as i32);
            model.ui.set_status(format!("Font size: {}", size));
        }
    }

    Some(Cmd::Redraw)
}
