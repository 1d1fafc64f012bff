//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/opent/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::document::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::model::tabs::{DEFAULT_TITLE_WIDTH, MIN_TITLE_WIDTH};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Font size for new documents and "reset font size"
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    /// Maximum tab title width in characters
    #[serde(default = "default_title_width")]
    pub tab_title_max_width: usize,
    /// Initial state of the find bar's "match case" checkbox
    #[serde(default)]
    pub find_match_case: bool,
    /// Initial state of the replace bar's "match case" checkbox
    #[serde(default)]
    pub replace_match_case: bool,
}

fn default_font_size() -> u16 {
    DEFAULT_FONT_SIZE
}

fn default_title_width() -> usize {
    DEFAULT_TITLE_WIDTH
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            tab_title_max_width: default_title_width(),
            find_match_case: false,
            replace_match_case: false,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating its directory if it doesn't exist
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Configured font size, clamped to the supported range
    pub fn effective_font_size(&self) -> u16 {
        self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    /// Configured title width, never narrower than the ellipsis plus marker
    pub fn effective_title_width(&self) -> usize {
        self.tab_title_max_width.max(MIN_TITLE_WIDTH)
    }
}
