//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Swipe batch read when `--events` is not given.
    pub events_path: PathBuf,

    /// Group count at which reconciliation runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            events_path: data_dir.join("events.jsonl"),
            parallel_threshold: att_core::ReconcileOptions::default().parallel_threshold,
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally overlaid with
    /// a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // ATT_EVENTS_PATH, ATT_PARALLEL_THRESHOLD
        figment = figment.merge(Env::prefixed("ATT_"));

        figment.extract()
    }

    pub fn reconcile_options(&self) -> att_core::ReconcileOptions {
        att_core::ReconcileOptions {
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Returns the platform-specific config directory for att.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("att"))
}

/// Returns the platform-specific data directory for att.
///
/// On Linux: `~/.local/share/att`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("att"))
}
