//! Tab manager - owns the open documents in tab order
//!
//! Enforces "one tab per file path", tracks the active tab and keeps each
//! tab's display title in sync with its document.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use super::document::{Document, DocumentEvent, DEFAULT_FONT_SIZE};
use crate::error::EditorError;
use crate::util::{char_len, char_prefix, check_text_media_type, FileIoError};

// ============================================================================
// Identifiers & constants
// ============================================================================

/// Unique identifier for a tab (and the document it holds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

/// Default maximum display width of a tab title, in characters
pub const DEFAULT_TITLE_WIDTH: usize = 7;
/// Marker appended to the title of a dirty document
pub const DIRTY_MARKER: &str = "*";
/// Appended to a truncated title
pub const ELLIPSIS: &str = "...";
/// Narrowest title width that still fits the ellipsis and the marker
pub const MIN_TITLE_WIDTH: usize = 4;

// ============================================================================
// Titles
// ============================================================================

/// Compute the title shown on a tab.
///
/// Base name (or `untitled`), plus `*` when dirty. When the combined text is
/// wider than `max_width` the name is cut and `...` appended, always keeping
/// room for the marker. Widths below [`MIN_TITLE_WIDTH`] are raised to it.
pub fn display_title(document: &Document, max_width: usize) -> String {
    let max_width = max_width.max(MIN_TITLE_WIDTH);
    let name = document.display_name();
    let marker = if document.is_modified() {
        DIRTY_MARKER
    } else {
        ""
    };

    if char_len(&name) + char_len(marker) <= max_width {
        return format!("{}{}", name, marker);
    }

    let keep = max_width.saturating_sub(char_len(ELLIPSIS) + char_len(marker));
    format!("{}{}{}", char_prefix(&name, keep), ELLIPSIS, marker)
}

/// Tooltip for a tab: the full path, or empty for untitled documents
pub fn tooltip(document: &Document) -> String {
    document
        .file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

// ============================================================================
// Tabs
// ============================================================================

/// One open document plus its rendered title and tooltip
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub document: Document,
    pub title: String,
    pub tooltip: String,
}

/// Result of asking the tab manager to open a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new tab was created
    Opened(TabId),
    /// The path was already open; its tab was activated
    Activated(TabId),
}

impl OpenOutcome {
    pub fn tab_id(self) -> TabId {
        match self {
            Self::Opened(id) | Self::Activated(id) => id,
        }
    }
}

// ============================================================================
// Tab Manager
// ============================================================================

/// Ordered collection of open documents
#[derive(Debug)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active_index: Option<usize>,
    /// Paths currently open in some tab (canonicalized when possible)
    open_paths: HashSet<PathBuf>,
    next_tab_id: u64,
    title_width: usize,
    /// Font size given to newly opened documents
    font_size: u16,
    events_tx: Sender<DocumentEvent>,
    events_rx: Receiver<DocumentEvent>,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_WIDTH)
    }
}

impl TabManager {
    pub fn new(title_width: usize) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            tabs: Vec::new(),
            active_index: None,
            open_paths: HashSet::new(),
            next_tab_id: 1,
            title_width: title_width.max(MIN_TITLE_WIDTH),
            font_size: DEFAULT_FONT_SIZE,
            events_tx,
            events_rx,
        }
    }

    /// Use `size` as the font size of documents opened from now on
    pub fn with_font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    /// Generate a new tab ID
    fn next_tab_id(&mut self) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        id
    }

    /// Resolve a path to the key used in the open-path registry
    /// Registry key for a path. A file that does not exist (yet, or any
    /// more) is keyed by its canonical parent directory plus its name.
    fn path_key(path: &Path) -> PathBuf {
        if let Ok(canonical) = path.canonicalize() {
            return canonical;
        }
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => {
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                parent
                    .canonicalize()
                    .map(|dir| dir.join(name))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
            _ => path.to_path_buf(),
        }
    }

    // =========================================================================
    // Opening
    // =========================================================================

    /// Open an untitled document in a new, active tab
    pub fn open_new(&mut self) -> TabId {
        let id = self.push_tab(Document::new());
        tracing::debug!("Opened untitled tab {:?}", id);
        id
    }

    /// Open an untitled, clean document holding `text` in a new, active tab
    pub fn open_text(&mut self, text: &str) -> TabId {
        self.push_tab(Document::with_text(text))
    }

    /// Open `path`, or activate its tab if it is already open.
    ///
    /// Non-text media types are rejected before anything is read.
    pub fn open_path(&mut self, path: &Path) -> Result<OpenOutcome, EditorError> {
        check_text_media_type(path).map_err(|mime| EditorError::UnsupportedFileType {
            path: path.to_path_buf(),
            mime,
        })?;

        let key = Self::path_key(path);
        if let Some(id) = self.find_open_file(&key) {
            self.activate(id);
            tracing::debug!("{} already open, activated {:?}", key.display(), id);
            return Ok(OpenOutcome::Activated(id));
        }

        let document = Document::from_file(&key)?;
        let id = self.push_tab(document);
        self.open_paths.insert(key);
        Ok(OpenOutcome::Opened(id))
    }

    fn push_tab(&mut self, mut document: Document) -> TabId {
        let id = self.next_tab_id();
        document.set_font_size(self.font_size as i32);
        document.subscribe(id, self.events_tx.clone());
        self.tabs.push(Tab {
            id,
            title: display_title(&document, self.title_width),
            tooltip: tooltip(&document),
            document,
        });
        self.active_index = Some(self.tabs.len() - 1);
        id
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn title_width(&self) -> usize {
        self.title_width
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn document(&self, id: TabId) -> Option<&Document> {
        self.tab(id).map(|t| &t.document)
    }

    pub fn document_mut(&mut self, id: TabId) -> Option<&mut Document> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == id)
            .map(|t| &mut t.document)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_index.and_then(|i| self.tabs.get(i))
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab().map(|t| t.id)
    }

    /// Document of the active tab, if any tab is open
    pub fn active_document(&self) -> Option<&Document> {
        self.active_tab().map(|t| &t.document)
    }

    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        let index = self.active_index?;
        self.tabs.get_mut(index).map(|t| &mut t.document)
    }

    /// Find the tab holding `path`, if it is open
    pub fn find_open_file(&self, path: &Path) -> Option<TabId> {
        let key = Self::path_key(path);
        if !self.open_paths.contains(&key) {
            return None;
        }
        self.tabs
            .iter()
            .find(|t| t.document.file_path().map(Self::path_key).as_ref() == Some(&key))
            .map(|t| t.id)
    }

    pub fn is_file_open(&self, path: &Path) -> bool {
        self.open_paths.contains(&Self::path_key(path))
    }

    pub fn open_paths(&self) -> &HashSet<PathBuf> {
        &self.open_paths
    }

    /// Tabs whose documents have unsaved edits
    pub fn dirty_tabs(&self) -> Vec<TabId> {
        self.tabs
            .iter()
            .filter(|t| t.document.is_modified())
            .map(|t| t.id)
            .collect()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Make `id` the active tab. Returns false for an unknown id.
    pub fn activate(&mut self, id: TabId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active_index = Some(index);
                true
            }
            None => false,
        }
    }

    /// Activate the tab at `index` (tab bar click)
    pub fn activate_index(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.active_index = Some(index);
            true
        } else {
            false
        }
    }

    /// Remove a tab without any confirmation.
    ///
    /// Unregisters its path and keeps the active index pointing at a
    /// neighbouring tab.
    pub fn remove_tab(&mut self, id: TabId) -> Option<Document> {
        let index = self.index_of(id)?;
        let tab = self.tabs.remove(index);
        if let Some(path) = tab.document.file_path() {
            self.open_paths.remove(&Self::path_key(path));
        }

        self.active_index = match self.active_index {
            _ if self.tabs.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active.min(self.tabs.len() - 1)),
            None => None,
        };

        tracing::debug!("Closed tab {:?} ({})", id, tab.document.display_name());
        Some(tab.document)
    }

    /// Save a tab's document, to `target` or to its own path.
    ///
    /// Keeps the open-path registry in step with Save As and refuses to save
    /// onto a path that another tab holds.
    pub fn save_tab(&mut self, id: TabId, target: Option<&Path>) -> Result<PathBuf, EditorError> {
        let index = self
            .index_of(id)
            .ok_or(EditorError::InvalidArgument("no such tab"))?;
        let old_path = self.tabs[index].document.file_path().map(Path::to_path_buf);
        let path = match (target, &old_path) {
            (Some(target), _) => target.to_path_buf(),
            (None, Some(own)) => own.clone(),
            (None, None) => return Err(EditorError::InvalidArgument("document has no file path")),
        };

        let new_key = Self::path_key(&path);
        let old_key = old_path.as_deref().map(Self::path_key);
        if old_key.as_ref() != Some(&new_key) && self.open_paths.contains(&new_key) {
            return Err(EditorError::Save {
                path,
                source: FileIoError::AlreadyOpen,
            });
        }

        self.tabs[index].document.save_to(&path)?;

        if let Some(old_key) = old_key {
            self.open_paths.remove(&old_key);
        }
        // The file exists now, so this resolves to the canonical form
        self.open_paths.insert(Self::path_key(&path));
        Ok(path)
    }

    /// Re-render titles for documents that reported changes.
    ///
    /// Returns true if any title changed.
    pub fn sync_titles(&mut self) -> bool {
        let mut changed = false;
        let pending: Vec<DocumentEvent> = self.events_rx.try_iter().collect();
        for DocumentEvent::Changed(id) in pending {
            let width = self.title_width;
            if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) {
                let title = display_title(&tab.document, width);
                let tip = tooltip(&tab.document);
                if tab.title != title || tab.tooltip != tip {
                    tab.title = title;
                    tab.tooltip = tip;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Debug-only consistency check of the path registry
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let mut seen = HashSet::new();
        for tab in &self.tabs {
            if let Some(path) = tab.document.file_path() {
                let key = Self::path_key(path);
                assert!(seen.insert(key.clone()), "path open twice: {}", key.display());
                assert!(
                    self.open_paths.contains(&key),
                    "open path not registered: {}",
                    key.display()
                );
            }
        }
        assert_eq!(seen.len(), self.open_paths.len(), "stale open-path entries");
        if let Some(active) = self.active_index {
            assert!(active < self.tabs.len(), "active index out of range");
        } else {
            assert!(self.tabs.is_empty(), "tabs open but none active");
        }
    }

    #[cfg(not(debug_assertions))]
    pub fn assert_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    // ========================================================================
    // Titles
    // ========================================================================

    fn doc_at(path: &str, dirty: bool) -> Document {
        let dir = tempfile::tempdir().unwrap();
        let full = dir.path().join(path);
        let mut doc = Document::new();
        doc.save_to(&full).unwrap();
        if dirty {
            doc.insert_text("x");
        }
        doc
    }

    #[test]
    fn test_title_short_clean_name() {
        assert_eq!(display_title(&doc_at("a.txt", false), 7), "a.txt");
    }

    #[test]
    fn test_title_short_dirty_name() {
        assert_eq!(display_title(&doc_at("a.txt", true), 7), "a.txt*");
    }

    #[test]
    fn test_title_exact_fit_not_truncated() {
        assert_eq!(display_title(&doc_at("ab.txt", true), 7), "ab.txt*");
    }

    #[test]
    fn test_title_truncated_dirty_keeps_marker() {
        let title = display_title(&doc_at("verylongname.txt", true), 7);
        assert_eq!(title, "ver...*");
        assert_eq!(title.chars().count(), 7);
        assert!(title.ends_with("...*"));
    }

    #[test]
    fn test_title_truncated_clean() {
        assert_eq!(display_title(&doc_at("verylongname.txt", false), 7), "very...");
    }

    #[test]
    fn test_title_untitled() {
        let mut doc = Document::new();
        assert_eq!(display_title(&doc, 7), "unti...");
        assert_eq!(display_title(&doc, 20), "untitled");
        doc.insert_text("x");
        assert_eq!(display_title(&doc, 20), "untitled*");
        assert_eq!(display_title(&doc, 7), "unt...*");
    }

    #[test]
    fn test_title_tiny_width_never_drops_marker() {
        let title = display_title(&doc_at("verylongname.txt", true), 2);
        assert_eq!(title, "...*");
    }

    #[test]
    fn test_title_width_clamped_to_minimum() {
        assert_eq!(TabManager::new(2).title_width(), MIN_TITLE_WIDTH);
        assert_eq!(TabManager::new(0).title_width(), MIN_TITLE_WIDTH);
        assert_eq!(TabManager::new(12).title_width(), 12);
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(tooltip(&Document::new()), "");
        let doc = doc_at("t.txt", false);
        assert!(tooltip(&doc).ends_with("t.txt"));
    }

    // ========================================================================
    // Opening
    // ========================================================================

    #[test]
    fn test_open_new_activates() {
        let mut tabs = TabManager::default();
        let a = tabs.open_new();
        let b = tabs.open_new();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.active_tab_id(), Some(b));
        assert_ne!(a, b);
        assert!(tabs.open_paths().is_empty());
        tabs.assert_invariants();
    }

    #[test]
    fn test_new_tabs_use_configured_font_size() {
        let mut tabs = TabManager::new(7).with_font_size(16);
        tabs.open_new();
        assert_eq!(tabs.active_document().unwrap().font_size(), 16);
    }

    #[test]
    fn test_open_path_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "notes.txt", "hello");
        let mut tabs = TabManager::default();

        let first = tabs.open_path(&path).unwrap();
        tabs.open_new();
        let second = tabs.open_path(&path).unwrap();

        assert!(matches!(first, OpenOutcome::Opened(_)));
        assert_eq!(second, OpenOutcome::Activated(first.tab_id()));
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.active_tab_id(), Some(first.tab_id()));
        tabs.assert_invariants();
    }

    #[test]
    fn test_open_path_rejects_non_text_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "image.png", "not really a png");
        let mut tabs = TabManager::default();
        let result = tabs.open_path(&path);
        assert!(matches!(result, Err(EditorError::UnsupportedFileType { .. })));
        assert!(tabs.is_empty());
    }

    #[test]
    fn test_open_missing_path_creates_no_tab() {
        let mut tabs = TabManager::default();
        let result = tabs.open_path(Path::new("/nonexistent/file.txt"));
        assert!(matches!(result, Err(EditorError::Load { .. })));
        assert!(tabs.is_empty());
        assert!(tabs.open_paths().is_empty());
    }

    // ========================================================================
    // Closing
    // ========================================================================

    #[test]
    fn test_remove_tab_unregisters_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "a.txt", "a");
        let mut tabs = TabManager::default();
        let id = tabs.open_path(&path).unwrap().tab_id();
        assert!(tabs.is_file_open(&path));

        tabs.remove_tab(id).unwrap();
        assert!(!tabs.is_file_open(&path));
        assert!(tabs.is_empty());
        assert_eq!(tabs.active_tab_id(), None);

        // Reopening creates a fresh tab
        let again = tabs.open_path(&path).unwrap();
        assert!(matches!(again, OpenOutcome::Opened(_)));
    }

    #[test]
    fn test_remove_tab_keeps_active_neighbour() {
        let mut tabs = TabManager::default();
        let a = tabs.open_new();
        let b = tabs.open_new();
        let c = tabs.open_new();

        tabs.activate(b);
        tabs.remove_tab(a);
        assert_eq!(tabs.active_tab_id(), Some(b));

        tabs.remove_tab(b);
        assert_eq!(tabs.active_tab_id(), Some(c));
        tabs.assert_invariants();
    }

    #[test]
    fn test_remove_last_active_tab_moves_left() {
        let mut tabs = TabManager::default();
        let a = tabs.open_new();
        let b = tabs.open_new();
        tabs.remove_tab(b);
        assert_eq!(tabs.active_tab_id(), Some(a));
    }

    // ========================================================================
    // Save As & registry
    // ========================================================================

    #[test]
    fn test_save_as_registers_new_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("new.txt");
        let mut tabs = TabManager::default();
        let id = tabs.open_new();
        tabs.active_document_mut().unwrap().insert_text("body");

        tabs.save_tab(id, Some(&target)).unwrap();
        assert!(tabs.is_file_open(&target));
        assert!(!tabs.document(id).unwrap().is_modified());
        tabs.assert_invariants();
    }

    #[test]
    fn test_save_as_onto_path_open_elsewhere_fails() {
        let dir = tempfile::tempdir().unwrap();
        let taken = temp_file(&dir, "taken.txt", "original");
        let mut tabs = TabManager::default();
        tabs.open_path(&taken).unwrap();
        let id = tabs.open_new();
        tabs.active_document_mut().unwrap().insert_text("other");

        let result = tabs.save_tab(id, Some(&taken));
        assert!(matches!(
            result,
            Err(EditorError::Save {
                source: FileIoError::AlreadyOpen,
                ..
            })
        ));
        assert_eq!(fs::read_to_string(&taken).unwrap(), "original");
        assert!(tabs.document(id).unwrap().is_modified());
    }

    #[test]
    fn test_save_as_onto_deleted_file_still_open_elsewhere_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let a = temp_file(&dir, "a.txt", "original");
        let mut tabs = TabManager::default();
        tabs.open_path(&a).unwrap();
        fs::remove_file(&a).unwrap();

        let id = tabs.open_new();
        tabs.active_document_mut().unwrap().insert_text("other");
        let alias = dir.path().join("sub").join("..").join("a.txt");

        let result = tabs.save_tab(id, Some(&alias));
        assert!(matches!(
            result,
            Err(EditorError::Save {
                source: FileIoError::AlreadyOpen,
                ..
            })
        ));
        assert!(!a.exists());
        assert!(tabs.document(id).unwrap().file_path().is_none());
        tabs.assert_invariants();
    }

    #[test]
    fn test_save_as_moves_registration() {
        let dir = tempfile::tempdir().unwrap();
        let old = temp_file(&dir, "old.txt", "x");
        let new = dir.path().join("renamed.txt");
        let mut tabs = TabManager::default();
        let id = tabs.open_path(&old).unwrap().tab_id();

        tabs.save_tab(id, Some(&new)).unwrap();
        assert!(!tabs.is_file_open(&old));
        assert!(tabs.is_file_open(&new));
        tabs.assert_invariants();
    }

    // ========================================================================
    // Title sync
    // ========================================================================

    #[test]
    fn test_sync_titles_follows_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "a.txt", "a");
        let mut tabs = TabManager::default();
        let id = tabs.open_path(&path).unwrap().tab_id();
        assert_eq!(tabs.tab(id).unwrap().title, "a.txt");

        tabs.active_document_mut().unwrap().insert_text("b");
        assert!(tabs.sync_titles());
        assert_eq!(tabs.tab(id).unwrap().title, "a.txt*");

        tabs.save_tab(id, None).unwrap();
        assert!(tabs.sync_titles());
        assert_eq!(tabs.tab(id).unwrap().title, "a.txt");
        assert!(!tabs.sync_titles());
    }
}
