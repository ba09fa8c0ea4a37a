//! External tool discovery
//!
//! Finds the directory holding `csolution`, `cpackget` and `cbuildgen`, and
//! prepares the environment the tools run with.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::defaults::{BIN_EXTENSION, CSOLUTION_TOOL, ENV_COMPILER_ROOT};
use crate::core::global_config::GlobalConfig;
use crate::error::{Result, SolutionError};

/// Location of the external tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Directory containing the tool binaries
    pub bin_path: PathBuf,
    /// Directory containing toolchain settings
    pub etc_path: PathBuf,
}

impl ToolPaths {
    /// Tools in `bin_path`, settings in the sibling `etc` directory
    pub fn new(bin_path: impl Into<PathBuf>) -> Self {
        let bin_path = bin_path.into();
        let etc_path = bin_path
            .parent()
            .map_or_else(|| PathBuf::from("etc"), |p| p.join("etc"));
        Self { bin_path, etc_path }
    }

    /// Override the settings directory
    #[must_use]
    pub fn with_etc_path(mut self, etc_path: impl Into<PathBuf>) -> Self {
        self.etc_path = etc_path.into();
        self
    }

    /// Resolve tool locations
    ///
    /// Priority: explicit path (the `--bin-path` flag or `SOLBUILD_BIN_PATH`,
    /// both read by the command line) > config file >
    /// `csolution` on `PATH` > directory of the running executable.
    pub fn resolve(explicit: Option<&Path>, config: &GlobalConfig) -> Self {
        let bin_path = explicit
            .map(Path::to_path_buf)
            .or_else(|| config.tools.bin_path.clone())
            .or_else(|| {
                which::which(CSOLUTION_TOOL)
                    .ok()
                    .and_then(|p| p.parent().map(Path::to_path_buf))
            })
            .or_else(|| {
                env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(Path::to_path_buf))
            })
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!("tool directory: {}", bin_path.display());

        let paths = Self::new(bin_path);
        match &config.tools.etc_path {
            Some(etc) => paths.with_etc_path(etc),
            None => paths,
        }
    }

    /// Path of the tool binary `name`
    pub fn tool(&self, name: &str) -> PathBuf {
        self.bin_path.join(format!("{name}{BIN_EXTENSION}"))
    }

    /// Path of the tool binary `name`, which must exist
    pub fn require(&self, name: &str) -> Result<PathBuf> {
        let path = self.tool(name);
        if !path.is_file() {
            tracing::error!("{name} was not found: '{}'", path.display());
            return Err(SolutionError::ToolNotFound {
                tool: name.to_string(),
                path,
            });
        }
        Ok(path)
    }

    /// Environment for child tools
    ///
    /// Puts the tool directory first on `PATH` and points the compiler at
    /// its settings. Best effort: an unrepresentable `PATH` is left alone.
    pub fn child_environment(&self) -> Vec<(OsString, OsString)> {
        let mut vars = Vec::new();

        let current = env::var_os("PATH").unwrap_or_default();
        let paths = std::iter::once(self.bin_path.clone()).chain(env::split_paths(&current));
        match env::join_paths(paths) {
            Ok(joined) => vars.push((OsString::from("PATH"), joined)),
            Err(e) => tracing::debug!("leaving PATH unchanged: {e}"),
        }

        vars.push((
            OsString::from(ENV_COMPILER_ROOT),
            self.etc_path.clone().into_os_string(),
        ));
        vars
    }
}
