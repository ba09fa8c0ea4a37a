//! Build command implementation
//!
//! Implements `solbuild build` to convert a solution and build its contexts.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::{SolutionArgs, ToolSetup};
use crate::cli::output::{status, OutputConfig};
use crate::core::builder::SolutionBuilder;
use crate::core::options::BuildOptions;
use crate::core::project::ExternalProjectBuilder;

/// Arguments of `solbuild build`
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub common: SolutionArgs,

    /// Build a single context (`project[.build]+target`)
    #[arg(short, long, conflicts_with = "configuration")]
    pub context: Option<String>,

    /// Build every context with this configuration (`[.build]+target`)
    #[arg(long)]
    pub configuration: Option<String>,

    /// Output directory for build artifacts
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Directory for intermediate files
    #[arg(long, value_name = "DIR")]
    pub intdir: Option<PathBuf>,

    /// Download and install missing packs before converting
    #[arg(long)]
    pub packs: bool,

    /// Do not update the RTE directory
    #[arg(long)]
    pub no_update_rte: bool,
}

impl BuildArgs {
    /// Options for this build, before global configuration is applied
    pub fn to_options(&self, output: &OutputConfig) -> BuildOptions {
        BuildOptions {
            context: self.context.clone(),
            configuration: self.configuration.clone(),
            out_dir: self.outdir.clone(),
            int_dir: self.intdir.clone(),
            packs: self.packs,
            update_rte: !self.no_update_rte,
            ..self.common.to_options(output)
        }
    }
}

/// Execute the build command
pub fn execute(args: &BuildArgs, output: &OutputConfig) -> Result<()> {
    let solution = &args.common.solution;
    if !solution.is_file() {
        bail!("Solution file not found: {}", solution.display());
    }

    let setup = ToolSetup::load(args.common.bin_path.as_deref())?;
    let options = setup.config.apply_to(args.to_options(output));

    let builder = SolutionBuilder::new(&setup.runner, &setup.tools, solution, options);
    let projects = ExternalProjectBuilder::new(&setup.runner, &setup.tools);
    let report = builder
        .build(&projects)
        .with_context(|| format!("Failed to build {}", solution.display()))?;

    if !output.quiet {
        for pack in &report.installed_packs {
            println!("{} Installed pack {pack}", status::SUCCESS);
        }
        println!(
            "{} Built {} of {} context(s)",
            status::SUCCESS,
            report.processed.len(),
            report.selected.len()
        );
    }
    Ok(())
}
