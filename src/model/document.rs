//! Document model - represents the text buffer and file state

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use encoding_rs::{Encoding, UTF_8};
use ropey::Rope;

use super::tabs::TabId;
use crate::error::EditorError;
use crate::util::{char_len, normalize_line_endings, validate_file_for_opening};

/// Smallest font size a document can be set to
pub const MIN_FONT_SIZE: u16 = 8;
/// Largest font size a document can be set to
pub const MAX_FONT_SIZE: u16 = 24;
/// Font size of a freshly created document
pub const DEFAULT_FONT_SIZE: u16 = 11;

/// Placeholder name for documents without a file path
pub const UNTITLED_NAME: &str = "untitled";

/// Represents an edit operation for undo/redo functionality
///
/// Positions and cursors are char offsets into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    Insert {
        position: usize,
        text: String,
        cursor_before: usize,
        cursor_after: usize,
    },
    Delete {
        position: usize,
        text: String,
        cursor_before: usize,
        cursor_after: usize,
    },
    /// Replace operation - used for typing over a selection and for
    /// whole-document replace-all, so that undo is a single step
    Replace {
        position: usize,
        deleted_text: String,
        inserted_text: String,
        cursor_before: usize,
        cursor_after: usize,
    },
}

/// Notification sent to the owning tab manager when a document's title
/// inputs (dirty flag or file association) change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Changed(TabId),
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique identifier (set when added to the tab manager)
    pub id: Option<TabId>,
    /// The text buffer; always `\n`-normalized
    buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    file_path: Option<PathBuf>,
    /// True until the first successful save
    is_new_file: bool,
    /// Whether the buffer has unsaved changes
    is_modified: bool,
    font_size: u16,
    /// Encoding detected when the file was loaded (saves are always UTF-8)
    pub encoding: &'static Encoding,
    /// Caret position as a char offset
    pub cursor: usize,
    /// Current selection (set by find)
    pub selection: Option<Range<usize>>,
    /// Undo stack
    pub undo_stack: Vec<EditOperation>,
    /// Redo stack
    pub redo_stack: Vec<EditOperation>,
    listener: Option<Sender<DocumentEvent>>,
}

impl Document {
    /// Create a new empty, untitled document
    pub fn new() -> Self {
        Self {
            id: None,
            buffer: Rope::new(),
            file_path: None,
            is_new_file: true,
            is_modified: false,
            font_size: DEFAULT_FONT_SIZE,
            encoding: UTF_8,
            cursor: 0,
            selection: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            listener: None,
        }
    }

    /// Create an untitled document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from_str(&normalize_line_endings(text)),
            ..Self::new()
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let mut doc = Self::new();
        doc.load_from(path)?;
        Ok(doc)
    }

    /// Replace this document's content with the file at `path`.
    ///
    /// On failure the document is left exactly as it was.
    pub fn load_from(&mut self, path: &Path) -> Result<(), EditorError> {
        let load_err = |source| EditorError::Load {
            path: path.to_path_buf(),
            source,
        };
        validate_file_for_opening(path).map_err(load_err)?;
        let bytes = fs::read(path).map_err(|e| load_err(e.into()))?;
        let (text, encoding) = crate::encoding::decode(&bytes);

        self.buffer = Rope::from_str(&normalize_line_endings(&text));
        self.encoding = encoding;
        self.cursor = 0;
        self.selection = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.is_new_file = false;
        self.file_path = Some(path.to_path_buf());
        self.is_modified = false;
        self.notify();

        tracing::info!(
            "Loaded {} ({} chars, {})",
            path.display(),
            self.buffer.len_chars(),
            encoding.name()
        );
        Ok(())
    }

    /// Write the whole buffer to `path` as UTF-8, overwriting it.
    ///
    /// Only a successful write associates the path and clears the dirty flag.
    pub fn save_to(&mut self, path: &Path) -> Result<(), EditorError> {
        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            self.buffer.write_to(&mut writer)?;
            writer.flush()
        };
        if let Err(e) = write() {
            tracing::warn!("Failed to save {}: {}", path.display(), e);
            return Err(EditorError::Save {
                path: path.to_path_buf(),
                source: e.into(),
            });
        }

        self.file_path = Some(path.to_path_buf());
        self.is_new_file = false;
        self.is_modified = false;
        self.notify();

        tracing::info!("Saved {}", path.display());
        Ok(())
    }

    /// Register the channel that receives change notifications
    pub fn subscribe(&mut self, id: TabId, listener: Sender<DocumentEvent>) {
        self.id = Some(id);
        self.listener = Some(listener);
    }

    fn notify(&self) {
        if let (Some(id), Some(listener)) = (self.id, &self.listener) {
            // A dropped receiver only means nobody renders titles anymore
            let _ = listener.send(DocumentEvent::Changed(id));
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn buffer(&self) -> &Rope {
        &self.buffer
    }

    /// Full text as a `String`
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_untitled(&self) -> bool {
        self.file_path.is_none()
    }

    pub fn is_new_file(&self) -> bool {
        self.is_new_file
    }

    /// Whether the buffer has edits since the last load or save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Base file name, or the untitled placeholder
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| UNTITLED_NAME.to_string())
    }

    // =========================================================================
    // Font size
    // =========================================================================

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Set the font size, clamped to `[MIN_FONT_SIZE, MAX_FONT_SIZE]`
    pub fn set_font_size(&mut self, size: i32) -> u16 {
        self.font_size = size.clamp(MIN_FONT_SIZE as i32, MAX_FONT_SIZE as i32) as u16;
        self.font_size
    }

    pub fn increase_font_size(&mut self) -> u16 {
        self.set_font_size(self.font_size as i32 + 1)
    }

    pub fn decrease_font_size(&mut self) -> u16 {
        self.set_font_size(self.font_size as i32 - 1)
    }

    pub fn can_increase_font(&self) -> bool {
        self.font_size < MAX_FONT_SIZE
    }

    pub fn can_decrease_font(&self) -> bool {
        self.font_size > MIN_FONT_SIZE
    }

    // =========================================================================
    // Cursor & selection
    // =========================================================================

    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.buffer.len_chars());
        self.selection = None;
    }

    /// Select `range` and place the cursor at its end
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.buffer.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        self.cursor = range.end;
        self.selection = Some(range);
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert typed text at the cursor, replacing any selection
    pub fn insert_text(&mut self, text: &str) {
        let text = normalize_line_endings(text);
        match self.selection.take().filter(|r| !r.is_empty()) {
            Some(range) => {
                self.replace_range(range, &text);
            }
            None if text.is_empty() => {}
            None => {
                let position = self.cursor.min(self.buffer.len_chars());
                let cursor_after = position + char_len(&text);
                self.buffer.insert(position, &text);
                self.cursor = cursor_after;
                self.push_edit(EditOperation::Insert {
                    position,
                    text: text.into_owned(),
                    cursor_before: position,
                    cursor_after,
                });
            }
        }
    }

    /// Insert clipboard text as plain text with normalized line endings
    pub fn insert_pasted_text(&mut self, raw: &str) {
        self.insert_text(raw);
    }

    /// Delete the selection, or the character before the cursor
    pub fn delete_backward(&mut self) {
        if let Some(range) = self.selection.take().filter(|r| !r.is_empty()) {
            self.delete_range(range);
            return;
        }
        let cursor = self.cursor.min(self.buffer.len_chars());
        if cursor > 0 {
            self.delete_range(cursor - 1..cursor);
        }
    }

    fn delete_range(&mut self, range: Range<usize>) {
        let text = self.buffer.slice(range.clone()).to_string();
        let cursor_before = self.cursor;
        self.buffer.remove(range.clone());
        self.cursor = range.start;
        self.push_edit(EditOperation::Delete {
            position: range.start,
            text,
            cursor_before,
            cursor_after: range.start,
        });
    }

    /// Replace the chars in `range` with `text` as one edit.
    ///
    /// Returns the cursor position right after the inserted text.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) -> usize {
        let len = self.buffer.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        let deleted_text = self.buffer.slice(range.clone()).to_string();
        let cursor_before = self.cursor;
        let cursor_after = range.start + char_len(text);

        self.buffer.remove(range.clone());
        self.buffer.insert(range.start, text);
        self.cursor = cursor_after;
        self.selection = None;
        self.push_edit(EditOperation::Replace {
            position: range.start,
            deleted_text,
            inserted_text: text.to_string(),
            cursor_before,
            cursor_after,
        });
        cursor_after
    }

    /// Swap the whole buffer for `text` as a single undoable edit
    pub fn replace_all_text(&mut self, text: &str) {
        let cursor = self.cursor;
        self.replace_range(0..self.buffer.len_chars(), text);
        self.cursor = cursor.min(self.buffer.len_chars());
    }

    /// Push an edit operation onto the undo stack and clear redo stack
    pub fn push_edit(&mut self, op: EditOperation) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
        self.mark_modified();
    }

    fn mark_modified(&mut self) {
        if !self.is_modified {
            self.is_modified = true;
            tracing::debug!("Document {:?} became dirty", self.id);
            self.notify();
        }
    }

    /// Undo the last edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo_stack.pop() else {
            return false;
        };
        match &op {
            EditOperation::Insert {
                position,
                text,
                cursor_before,
                ..
            } => {
                self.buffer.remove(*position..*position + char_len(text));
                self.cursor = *cursor_before;
            }
            EditOperation::Delete {
                position,
                text,
                cursor_before,
                ..
            } => {
                self.buffer.insert(*position, text);
                self.cursor = *cursor_before;
            }
            EditOperation::Replace {
                position,
                deleted_text,
                inserted_text,
                cursor_before,
                ..
            } => {
                self.buffer
                    .remove(*position..*position + char_len(inserted_text));
                self.buffer.insert(*position, deleted_text);
                self.cursor = *cursor_before;
            }
        }
        self.finish_history_step(op, true);
        true
    }

    /// Redo the last undone edit. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.redo_stack.pop() else {
            return false;
        };
        match &op {
            EditOperation::Insert {
                position,
                text,
                cursor_after,
                ..
            } => {
                self.buffer.insert(*position, text);
                self.cursor = *cursor_after;
            }
            EditOperation::Delete {
                position,
                text,
                cursor_after,
                ..
            } => {
                self.buffer.remove(*position..*position + char_len(text));
                self.cursor = *cursor_after;
            }
            EditOperation::Replace {
                position,
                deleted_text,
                inserted_text,
                cursor_after,
                ..
            } => {
                self.buffer
                    .remove(*position..*position + char_len(deleted_text));
                self.buffer.insert(*position, inserted_text);
                self.cursor = *cursor_after;
            }
        }
        self.finish_history_step(op, false);
        true
    }

    fn finish_history_step(&mut self, op: EditOperation, was_undo: bool) {
        if was_undo {
            self.redo_stack.push(op);
        } else {
            self.undo_stack.push(op);
        }
        self.cursor = self.cursor.min(self.buffer.len_chars());
        self.selection = None;
        self.mark_modified();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
