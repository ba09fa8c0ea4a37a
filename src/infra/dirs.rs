//! Platform-specific directory management
//!
//! Locates the directory holding the global `config.toml`. Follows the XDG
//! Base Directory Specification on Linux and standard locations on macOS
//! and Windows.
//!
//! `SOLBUILD_CONFIG_DIR` overrides the platform default.

use std::env;
use std::path::PathBuf;

use crate::config::defaults::{APP_NAME, ENV_CONFIG_DIR, GLOBAL_CONFIG_FILE};

/// Platform-specific directory provider for solbuild
#[derive(Debug, Clone)]
pub struct SolbuildDirs {
    config_dir: PathBuf,
}

impl SolbuildDirs {
    /// Create a new `SolbuildDirs` instance
    ///
    /// Checks the environment first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/solbuild` or `~/.config/solbuild`
    /// - macOS: `~/Library/Application Support/solbuild`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(GLOBAL_CONFIG_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for SolbuildDirs {
    fn default() -> Self {
        Self::new()
    }
}
