//! Utility modules

pub mod file_validation;
pub mod text;

pub use text::{char_len, char_prefix, chars_eq_ignore_case, normalize_line_endings};

pub use file_validation::{
    check_text_media_type, filename_for_display, validate_file_for_opening, FileIoError,
    MAX_FILE_SIZE,
};
