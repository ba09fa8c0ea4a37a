//! Compiler tool queries
//!
//! Wraps the `csolution` list operations this crate needs (contexts,
//! toolchains, missing packs) and gives the orchestrator raw access for
//! `convert`.

use std::path::Path;

use crate::config::defaults::CSOLUTION_TOOL;
use crate::core::options::{formulate_args, BuildOptions};
use crate::error::Result;
use crate::infra::process::CommandRunner;
use crate::infra::tools::ToolPaths;

/// Order in which the compiler tool lists contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOrder {
    /// The tool's own ordering
    Natural,
    /// The order the contexts are written in the solution
    Declaration,
}

/// Split list output into entries
///
/// Normalises line endings, removes all whitespace inside entries and drops
/// blank lines.
pub fn parse_list_output(output: &str) -> Vec<String> {
    output
        .replace("\r\n", "\n")
        .split('\n')
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Handle on the compiler tool for one solution
pub struct CompilerTool<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolPaths,
    solution: &'a Path,
    options: &'a BuildOptions,
}

impl<'a> CompilerTool<'a> {
    /// Create a handle for `solution` using `options` for common flags
    pub fn new(
        runner: &'a dyn CommandRunner,
        tools: &'a ToolPaths,
        solution: &'a Path,
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            runner,
            tools,
            solution,
            options,
        }
    }

    /// Argument vector for `command` with the solution's common flags
    pub fn args_for(&self, command: &[&str]) -> Result<Vec<String>> {
        formulate_args(command, self.solution, self.options)
    }

    /// Whether tool output stays off the terminal for this build
    pub fn quiet(&self) -> bool {
        self.options.quiet
    }

    /// Run the compiler tool with a prepared argument vector
    pub fn execute(&self, args: &[String], quiet: bool) -> Result<String> {
        let program = self.tools.require(CSOLUTION_TOOL)?;
        self.runner.execute(&program, args, quiet)
    }

    fn run(&self, command: &[&str], extra: &[&str], quiet: bool) -> Result<String> {
        let mut args = self.args_for(command)?;
        args.extend(extra.iter().map(|a| (*a).to_string()));
        self.execute(&args, quiet)
    }

    /// List the solution's contexts
    pub fn list_contexts(&self, quiet: bool, order: ContextOrder) -> Result<Vec<String>> {
        let extra: &[&str] = match order {
            ContextOrder::Natural => &[],
            ContextOrder::Declaration => &["--yml-order"],
        };
        let output = self.run(&["list", "contexts"], extra, quiet).map_err(|e| {
            tracing::error!("error listing contexts: {e}");
            e
        })?;
        Ok(parse_list_output(&output))
    }

    /// List the toolchains the solution can use
    pub fn list_toolchains(&self, quiet: bool) -> Result<Vec<String>> {
        let output = self.run(&["list", "toolchains"], &[], quiet).map_err(|e| {
            tracing::error!("error listing toolchains: {e}");
            e
        })?;
        Ok(parse_list_output(&output))
    }

    /// List packs the solution needs that are not installed
    pub fn list_missing_packs(&self) -> Result<Vec<String>> {
        let output = self.run(&["list", "packs"], &["-m"], self.quiet()).map_err(|e| {
            tracing::error!("error getting list of missing packs: {e}");
            e
        })?;
        Ok(parse_list_output(&output))
    }
}
