//! File validation utilities for opening and saving files
//!
//! Validates files before attempting to open them, checking for:
//! - File existence and permissions
//! - File size limits
//! - Declared media type (only `text/*` or unknown types may be opened)

use std::fs;
use std::io;
use std::path::Path;

use mime_guess::mime;

/// Maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Underlying cause of a failed file read or write
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileIoError {
    /// File (or its parent directory) does not exist
    #[error("file not found")]
    NotFound,
    /// Permission denied to read or write the file
    #[error("permission denied")]
    PermissionDenied,
    /// Path is a directory, not a file
    #[error("is a directory")]
    IsDirectory,
    /// File exceeds size limit
    #[error("file too large ({size_mb:.1} MB)")]
    TooLarge { size_mb: f64 },
    /// Target path is already open in another tab
    #[error("already open in another tab")]
    AlreadyOpen,
    /// Other I/O error
    #[error("{0}")]
    Io(String),
}

impl FileIoError {
    /// Get a user-friendly error message
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("Cannot open directory: {}", filename),
            Self::TooLarge { size_mb } => {
                format!(
                    "{} is too large ({:.1} MB, max {} MB)",
                    filename,
                    size_mb,
                    MAX_FILE_SIZE / (1024 * 1024)
                )
            }
            Self::AlreadyOpen => format!("{} is already open in another tab", filename),
            Self::Io(msg) => format!("Error accessing {}: {}", filename, msg),
        }
    }
}

impl From<io::Error> for FileIoError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io(e.to_string()),
        }
    }
}

/// Validate a file before attempting to open it
///
/// Checks:
/// - File exists
/// - Is not a directory
/// - Does not exceed size limit
pub fn validate_file_for_opening(path: &Path) -> Result<(), FileIoError> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        return Err(FileIoError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileIoError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Check the media type declared by the file name.
///
/// Returns `Err` with the guessed type when it is known and not `text/*`.
/// Paths with no recognizable extension are accepted.
pub fn check_text_media_type(path: &Path) -> Result<(), String> {
    match mime_guess::from_path(path).first() {
        Some(guess) if guess.type_() != mime::TEXT => Err(guess.essence_str().to_string()),
        _ => Ok(()),
    }
}

/// Get the filename from a path for display in error messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
