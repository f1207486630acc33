use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StoreError};

/// Which vault backend the CLI talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The operating system's credential store.
    Keyring,
    /// A throwaway in-process map (nothing survives the process).
    Memory,
}

/// Project-level configuration, loaded from `.keysafe.toml`.
///
/// Every field has a sensible default so KeySafe works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Service namespace for stored entries. When unset, the host
    /// application's identity is used.
    #[serde(default)]
    pub service: Option<String>,

    /// Vault backend (default: keyring).
    #[serde(default = "default_backend")]
    pub backend: Backend,

    /// Default log filter when `RUST_LOG` is not set (default: warn).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_backend() -> Backend {
    Backend::Keyring
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            service: None,
            backend: default_backend(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".keysafe.toml";

    /// Load settings from `<project_dir>/.keysafe.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            StoreError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
