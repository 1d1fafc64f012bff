//! Centralized configuration paths for opent
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/opent/`
//! - Windows: `%APPDATA%\opent\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "opent";

/// Base name of the rolling log file
pub const LOG_FILE_PREFIX: &str = "opent.log";

/// Base config directory for opent
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/opent`
///   - Else: `~/.config/opent`
///
/// Windows:
///   - `%APPDATA%\opent`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/opent/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/opent/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Where the save chooser starts for documents that have never been saved.
///
/// The user's desktop, falling back to the home directory.
pub fn default_save_dir() -> Option<PathBuf> {
    dirs::desktop_dir()
        .filter(|dir| dir.is_dir())
        .or_else(dirs::home_dir)
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
