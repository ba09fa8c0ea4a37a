//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod list;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::cli::output::OutputConfig;
use crate::config::defaults::ENV_BIN_PATH;
use crate::core::global_config::GlobalConfig;
use crate::core::options::BuildOptions;
use crate::infra::dirs::SolbuildDirs;
use crate::infra::process::ProcessRunner;
use crate::infra::tools::ToolPaths;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the solution and build the selected contexts
    Build(build::BuildArgs),

    /// List information about the solution
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
}

/// List subcommands
#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// List the solution's contexts
    Contexts {
        #[command(flatten)]
        solution: SolutionArgs,

        /// Order contexts as written in the solution
        #[arg(long)]
        yml_order: bool,
    },

    /// List the build/target configurations shared by contexts
    Configurations {
        #[command(flatten)]
        solution: SolutionArgs,
    },

    /// List the toolchains the solution can use
    Toolchains {
        #[command(flatten)]
        solution: SolutionArgs,
    },
}

/// Arguments every solution command takes
#[derive(Args, Debug, Clone)]
pub struct SolutionArgs {
    /// Solution file (`<name>.csolution.yml`)
    pub solution: PathBuf,

    /// Directory containing csolution, cpackget and cbuildgen
    #[arg(long, value_name = "DIR", env = ENV_BIN_PATH)]
    pub bin_path: Option<PathBuf>,

    /// Output directory for generated files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Pack loading mode (latest, all, required)
    #[arg(long, value_name = "MODE")]
    pub load: Option<String>,

    /// Substring filter for list results
    #[arg(long)]
    pub filter: Option<String>,

    /// Skip schema check of the solution
    #[arg(long)]
    pub no_schema_check: bool,
}

impl SolutionArgs {
    /// Options carrying these arguments and the global output flags
    pub fn to_options(&self, output: &OutputConfig) -> BuildOptions {
        BuildOptions {
            output: self.output.clone(),
            load: self.load.clone(),
            schema: !self.no_schema_check,
            filter: self.filter.clone(),
            verbose: output.verbose > 0,
            quiet: output.quiet,
            ..BuildOptions::default()
        }
    }
}

/// Global configuration, tool locations and a runner for the tools
pub struct ToolSetup {
    pub config: GlobalConfig,
    pub tools: ToolPaths,
    pub runner: ProcessRunner,
}

impl ToolSetup {
    /// Load the global configuration and locate the tools
    pub fn load(bin_path: Option<&Path>) -> Result<Self> {
        let config = GlobalConfig::load(&SolbuildDirs::new())
            .context("Failed to load global configuration")?;
        let tools = ToolPaths::resolve(bin_path, &config);
        let runner = ProcessRunner::new().with_env(tools.child_environment());
        Ok(Self {
            config,
            tools,
            runner,
        })
    }
}

impl Commands {
    /// Execute the command
    pub fn run(self, output: &OutputConfig) -> Result<()> {
        match self {
            Self::Build(args) => build::execute(&args, output),
            Self::List { command } => match command {
                ListCommands::Contexts {
                    solution,
                    yml_order,
                } => list::execute_contexts(&solution, yml_order, output),
                ListCommands::Configurations { solution } => {
                    list::execute_configurations(&solution, output)
                }
                ListCommands::Toolchains { solution } => {
                    list::execute_toolchains(&solution, output)
                }
            },
        }
    }
}
