//! Per-project build delegation
//!
//! Each selected context ends in a call to a [`ProjectBuilder`] with a
//! [`ProjectBuildRequest`] built fresh for that context.

use std::path::{Path, PathBuf};

use crate::config::defaults::PROJECT_BUILDER_TOOL;
use crate::core::layout::ContextDirs;
use crate::core::options::BuildOptions;
use crate::error::Result;
use crate::infra::process::CommandRunner;
use crate::infra::tools::ToolPaths;

/// Everything the per-project builder needs for one context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBuildRequest {
    /// Canonical context name
    pub context: String,
    /// Generated descriptor to build
    pub descriptor: PathBuf,
    /// Output directory
    pub out_dir: PathBuf,
    /// Intermediate directory
    pub int_dir: PathBuf,
    /// Execution options inherited from the solution build
    pub options: BuildOptions,
}

impl ProjectBuildRequest {
    /// Derive the request for one context from the solution's options
    ///
    /// The computed directories replace any `out_dir`/`int_dir` in `base`;
    /// `base` itself is left untouched.
    pub fn derive(
        base: &BuildOptions,
        context: &str,
        descriptor: PathBuf,
        dirs: ContextDirs,
    ) -> Self {
        let options = BuildOptions {
            context: Some(context.to_string()),
            configuration: None,
            out_dir: Some(dirs.out_dir.clone()),
            int_dir: Some(dirs.int_dir.clone()),
            ..base.clone()
        };
        Self {
            context: context.to_string(),
            descriptor,
            out_dir: dirs.out_dir,
            int_dir: dirs.int_dir,
            options,
        }
    }
}

/// Builds one generated project descriptor
pub trait ProjectBuilder {
    /// Build the descriptor named in `request`
    fn build(&self, request: &ProjectBuildRequest) -> Result<()>;
}

/// Builder that delegates to the external project builder binary
pub struct ExternalProjectBuilder<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolPaths,
}

impl<'a> ExternalProjectBuilder<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tools: &'a ToolPaths) -> Self {
        Self { runner, tools }
    }
}

/// Project builder arguments for a request
pub fn builder_args(request: &ProjectBuildRequest) -> Vec<String> {
    let mut args = vec![
        display(&request.descriptor),
        format!("--outdir={}", display(&request.out_dir)),
        format!("--intdir={}", display(&request.int_dir)),
    ];
    if request.options.verbose {
        args.push("--verbose".to_string());
    }
    args
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl ProjectBuilder for ExternalProjectBuilder<'_> {
    fn build(&self, request: &ProjectBuildRequest) -> Result<()> {
        let program = self.tools.require(PROJECT_BUILDER_TOOL)?;
        self.runner
            .execute(&program, &builder_args(request), request.options.quiet)
            .map(|_| ())
    }
}
