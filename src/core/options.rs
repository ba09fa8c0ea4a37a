//! Build options
//!
//! [`BuildOptions`] is the immutable request a build or list command runs
//! with. It is translated into the compiler tool's flag vector by
//! [`formulate_args`].

use std::path::{Path, PathBuf};

use crate::error::{Result, SolutionError};

/// Request describing what to build and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Global output directory; overrides per-context out/int dirs
    pub output: Option<PathBuf>,
    /// Pack loading mode passed to the compiler tool
    pub load: Option<String>,
    /// Check the solution against its schema
    pub schema: bool,
    /// Let the compiler tool update RTE files
    pub update_rte: bool,
    /// Build all contexts sharing this configuration
    pub configuration: Option<String>,
    /// Build exactly this context
    pub context: Option<String>,
    /// Substring filter passed to list operations
    pub filter: Option<String>,
    /// Verbose tool output
    pub verbose: bool,
    /// Keep tool output and progress banners off the terminal
    pub quiet: bool,
    /// Install missing packs before converting
    pub packs: bool,
    /// Per-context output directory override
    pub out_dir: Option<PathBuf>,
    /// Per-context intermediate directory override
    pub int_dir: Option<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output: None,
            load: None,
            schema: true,
            update_rte: true,
            configuration: None,
            context: None,
            filter: None,
            verbose: false,
            quiet: false,
            packs: false,
            out_dir: None,
            int_dir: None,
        }
    }
}

impl BuildOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single context
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Select a configuration
    #[must_use]
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Set the list filter
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the global output directory
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Enable pack installation
    #[must_use]
    pub fn with_packs(mut self) -> Self {
        self.packs = true;
        self
    }

    /// Copy of these options with the filter removed
    #[must_use]
    pub fn without_filter(&self) -> Self {
        Self {
            filter: None,
            ..self.clone()
        }
    }

    /// Fail when both `context` and `configuration` are set
    pub fn check_exclusive(&self) -> Result<()> {
        if self.context.is_some() && self.configuration.is_some() {
            tracing::error!("both --context and --configuration were given");
            return Err(SolutionError::configuration(
                "options '--context' and '--configuration' cannot be used together",
            ));
        }
        Ok(())
    }

    /// True when a global output directory hides per-context overrides
    pub fn output_overrides_dirs(&self) -> bool {
        self.output.is_some() && (self.out_dir.is_some() || self.int_dir.is_some())
    }
}

/// Build the compiler tool's argument vector for `command`
///
/// Re-checks that `context` and `configuration` are not both set.
pub fn formulate_args(
    command: &[&str],
    solution: &Path,
    options: &BuildOptions,
) -> Result<Vec<String>> {
    options.check_exclusive()?;

    let mut args: Vec<String> = command.iter().map(|c| (*c).to_string()).collect();

    if !solution.as_os_str().is_empty() {
        args.push(format!("--solution={}", solution.display()));
    }
    if let Some(output) = &options.output {
        args.push(format!("--output={}", output.display()));
    }
    if let Some(load) = &options.load {
        args.push(format!("--load={load}"));
    }
    if !options.schema {
        args.push("--no-check-schema".to_string());
    }
    if !options.update_rte {
        args.push("--no-update-rte".to_string());
    }
    if let Some(configuration) = &options.configuration {
        args.push(format!("--context=*{configuration}"));
    }
    if let Some(context) = &options.context {
        args.push(format!("--context={context}"));
    }
    if let Some(filter) = &options.filter {
        args.push(format!("--filter={filter}"));
    }
    if options.verbose {
        args.push("--verbose".to_string());
    }

    Ok(args)
}
