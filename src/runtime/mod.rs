//! Runtime module - host integration
//!
//! This module contains the code that drives the editor core:
//! - `app` - message loop and command execution
//! - `dialogs` - native dialogs and clipboard (rfd, arboard)
//! - `input` - command-line text to message mapping

pub mod app;
pub mod dialogs;
pub mod input;

pub use app::App;
pub use dialogs::RfdDialogs;
