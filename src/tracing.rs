//! Logging infrastructure
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=opent::update=debug` - module-level filtering
//! - `RUST_LOG=message=debug` - every processed message
//!
//! Logs are also written to `~/.config/opent/logs/opent.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::model::AppModel;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of tab state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSnapshot {
    pub tab_count: usize,
    pub active_index: Option<usize>,
    pub titles: Vec<String>,
}

impl TabSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        Self {
            tab_count: model.tabs.len(),
            active_index: model.tabs.active_index(),
            titles: model.tabs.tabs().iter().map(|t| t.title.clone()).collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &TabSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.tab_count != other.tab_count {
            changes.push(format!("tabs: {} -> {}", self.tab_count, other.tab_count));
        }
        if self.active_index != other.active_index {
            changes.push(format!(
                "active: {:?} -> {:?}",
                self.active_index, other.active_index
            ));
        }
        if self.tab_count == other.tab_count {
            for (i, (before, after)) in self.titles.iter().zip(&other.titles).enumerate() {
                if before != after {
                    changes.push(format!("#{}: {:?} -> {:?}", i, before, after));
                }
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn test_snapshot_diff() {
        let mut model = AppModel::new(EditorConfig::default());
        let before = TabSnapshot::from_model(&model);
        assert_eq!(before.diff(&before), None);

        model.tabs.open_new();
        let after = TabSnapshot::from_model(&model);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("tabs: 0 -> 1"));
        assert!(diff.contains("active: None -> Some(0)"));
    }

    #[test]
    fn test_snapshot_diff_reports_title_change() {
        let mut model = AppModel::new(EditorConfig::default());
        model.tabs.open_new();
        let before = TabSnapshot::from_model(&model);
        model.tabs.active_document_mut().unwrap().insert_text("x");
        model.tabs.sync_titles();
        let after = TabSnapshot::from_model(&model);
        assert!(before.diff(&after).unwrap().contains("\"unt...*\""));
    }
}
