//! Error taxonomy for file and search operations
//!
//! "Not found" is deliberately absent: a search without matches is an
//! informational outcome (`None` or a zero count), never an error.

use std::path::PathBuf;

use crate::util::{filename_for_display, FileIoError};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Reading a file failed; no tab is created and no state changes
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: FileIoError,
    },

    /// Writing a file failed; the document keeps its pre-save state
    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: FileIoError,
    },

    /// The path declares a non-text media type
    #[error("{} is not a text file ({mime})", path.display())]
    UnsupportedFileType { path: PathBuf, mime: String },

    /// Empty find/replace query
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Malformed replace-all pattern
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl EditorError {
    /// Message shown in the blocking notice presented to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Load { path, source } => source.user_message(&filename_for_display(path)),
            Self::Save { path, source } => format!(
                "Save failed: {}",
                source.user_message(&filename_for_display(path))
            ),
            Self::UnsupportedFileType { path, .. } => format!(
                "Please choose a valid text file ({} is not text)",
                filename_for_display(path)
            ),
            Self::InvalidArgument(what) => format!("Invalid input: {}", what),
            Self::InvalidPattern(e) => format!("Invalid pattern: {}", e),
        }
    }
}
