//! Global configuration management
//!
//! Reads settings from `config.toml` in the config directory. Settings cover
//! where the external tools live and the default build flags. Command-line
//! flags override these, and these override built-in defaults.

use crate::core::options::BuildOptions;
use crate::infra::dirs::SolbuildDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Global configuration error types
#[derive(Error, Debug)]
pub enum GlobalConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Global configuration for solbuild
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Tool locations
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Default build options
    #[serde(default)]
    pub build: BuildConfig,
}

/// Tool locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Directory containing csolution, cpackget and cbuildgen
    pub bin_path: Option<PathBuf>,

    /// Directory containing toolchain settings
    pub etc_path: Option<PathBuf>,
}

/// Default build options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Install missing packs before converting
    pub packs: Option<bool>,

    /// Check the solution schema
    pub check_schema: Option<bool>,

    /// Let the compiler tool update RTE files
    pub update_rte: Option<bool>,

    /// Pack loading mode
    pub load: Option<String>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// A missing file yields the default configuration; an invalid one is
    /// an error.
    pub fn load(dirs: &SolbuildDirs) -> Result<Self, GlobalConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, GlobalConfigError> {
        if !path.exists() {
            tracing::debug!("no global config at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GlobalConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GlobalConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Fill build options that the command line left at their defaults
    ///
    /// Flags only ever switch a default off (`--no-schema-check`) or on
    /// (`--packs`), so a flag that moved away from the default wins.
    #[must_use]
    pub fn apply_to(&self, mut options: BuildOptions) -> BuildOptions {
        if !options.packs {
            options.packs = self.build.packs.unwrap_or(false);
        }
        if options.schema {
            options.schema = self.build.check_schema.unwrap_or(true);
        }
        if options.update_rte {
            options.update_rte = self.build.update_rte.unwrap_or(true);
        }
        if options.load.is_none() {
            options.load.clone_from(&self.build.load);
        }
        options
    }
}
