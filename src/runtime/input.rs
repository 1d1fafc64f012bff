//! Command-line input handling
//!
//! Maps one line of host input to a message. This stands in for the key and
//! mouse bindings of a windowed host:
//!
//! | Line | Message |
//! | --- | --- |
//! | `new` | New file (Ctrl+N) |
//! | `open [path]` | Open path, or the open dialog |
//! | `drop <path>...` | Files dropped on the window |
//! | `save` / `save-as` | Save (Ctrl+S) / Save As |
//! | `tab <n>` | Activate tab n (0-based) |
//! | `close` | Close the active tab (Ctrl+W) |
//! | `exit` | Window close button |
//! | `type <text>` | Typed text (`\n` and `\t` escapes) |
//! | `backspace`, `cursor <n>`, `undo`, `redo`, `paste` | Editing |
//! | `font+`, `font-`, `font0` | Ctrl+wheel, Ctrl+middle-click |
//! | `find-bar`, `replace-bar` | Toggle the bars |
//! | `find <query>`, `find-case`, `find-next` | Find bar |
//! | `replace-what <q>`, `replace-with <t>`, `replace-case` | Replace bar fields |
//! | `replace`, `replace-all` | Replace bar buttons |
//! | `show` | Print the active document |

use std::path::PathBuf;

use opent::messages::{AppMsg, DocumentMsg, Msg, SearchMsg};

/// What a line of input asks the host to do
#[derive(Debug, Clone)]
pub enum Input {
    /// Feed a message to the editor
    Msg(Msg),
    /// Read the clipboard, then feed `DocumentMsg::Paste`
    Paste,
    /// Print the active document's text
    Show,
    /// Blank line
    Nothing,
}

/// Expand `\n`, `\t` and `\\` escapes in typed text
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (command, arg) = match line.trim_start().split_once(' ') {
        Some((command, arg)) => (command, arg),
        None => (line.trim(), ""),
    };

    let msg = match command {
        "" => return Ok(Input::Nothing),
        "paste" => return Ok(Input::Paste),
        "show" => return Ok(Input::Show),

        "new" => Msg::App(AppMsg::NewFile),
        "open" if arg.trim().is_empty() => Msg::App(AppMsg::OpenFileDialog),
        "open" => Msg::open(arg.trim()),
        "drop" => Msg::App(AppMsg::FilesDropped(
            arg.split_whitespace().map(PathBuf::from).collect(),
        )),
        "save" => Msg::App(AppMsg::SaveFile),
        "save-as" => Msg::App(AppMsg::SaveFileAs),
        "tab" => Msg::App(AppMsg::ActivateTab(parse_number(arg)?)),
        "close" => Msg::App(AppMsg::CloseActiveTab),
        "exit" | "quit" => Msg::App(AppMsg::RequestExit),

        "type" => Msg::insert(unescape(arg)),
        "backspace" => Msg::Document(DocumentMsg::DeleteBackward),
        "cursor" => Msg::Document(DocumentMsg::SetCursor(parse_number(arg)?)),
        "undo" => Msg::Document(DocumentMsg::Undo),
        "redo" => Msg::Document(DocumentMsg::Redo),
        "font+" => Msg::Document(DocumentMsg::IncreaseFontSize),
        "font-" => Msg::Document(DocumentMsg::DecreaseFontSize),
        "font0" => Msg::Document(DocumentMsg::ResetFontSize),

        "find-bar" => Msg::Search(SearchMsg::ToggleFindBar),
        "replace-bar" => Msg::Search(SearchMsg::ToggleReplaceBar),
        "find" => Msg::Search(SearchMsg::SetFindQuery(unescape(arg))),
        "find-case" => Msg::Search(SearchMsg::ToggleFindMatchCase),
        "find-next" => Msg::Search(SearchMsg::FindNext),
        "replace-what" => Msg::Search(SearchMsg::SetReplaceQuery(unescape(arg))),
        "replace-with" => Msg::Search(SearchMsg::SetReplacement(unescape(arg))),
        "replace-case" => Msg::Search(SearchMsg::ToggleReplaceMatchCase),
        "replace" => Msg::Search(SearchMsg::ReplaceNext),
        "replace-all" => Msg::Search(SearchMsg::ReplaceAll),

        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(Input::Msg(msg))
}

fn parse_number(arg: &str) -> Result<usize, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!("Expected a number, got {:?}", arg.trim()))
}
