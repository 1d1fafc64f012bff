//! opent - Elm-style tabbed plain-text editor core
//!
//! This crate provides the document model, tab manager, find/replace and
//! unsaved-changes flow of a minimal editor implementing the Elm
//! Architecture pattern. A host drives it with `Msg`s and executes the
//! returned `Cmd`s.

pub mod close_flow;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod encoding;
pub mod error;
pub mod messages;
pub mod model;
pub mod search;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use error::EditorError;
pub use messages::Msg;
pub use model::AppModel;
