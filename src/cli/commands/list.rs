//! List command implementation
//!
//! Implements `solbuild list contexts|configurations|toolchains`.

use anyhow::{bail, Context, Result};

use super::{SolutionArgs, ToolSetup};
use crate::cli::output::{create_spinner, print_list, OutputConfig};
use crate::core::builder::SolutionBuilder;
use crate::core::catalog::ContextOrder;

fn check_solution(args: &SolutionArgs) -> Result<()> {
    if !args.solution.is_file() {
        bail!("Solution file not found: {}", args.solution.display());
    }
    Ok(())
}

/// Whether the tool's own output should reach the terminal
///
/// JSON output is printed by us, so the tool stays quiet.
fn echo_tool(output: &OutputConfig) -> bool {
    !output.quiet && !output.json
}

/// Execute `list contexts`
pub fn execute_contexts(args: &SolutionArgs, yml_order: bool, output: &OutputConfig) -> Result<()> {
    check_solution(args)?;
    let setup = ToolSetup::load(args.bin_path.as_deref())?;
    let options = setup.config.apply_to(args.to_options(output));
    let order = if yml_order {
        ContextOrder::Declaration
    } else {
        ContextOrder::Natural
    };

    let builder = SolutionBuilder::new(&setup.runner, &setup.tools, &args.solution, options);
    let contexts = builder
        .list_contexts(!echo_tool(output), order)
        .context("Failed to list contexts")?;

    if output.json {
        print_list(&contexts, true)?;
    }
    Ok(())
}

/// Execute `list configurations`
pub fn execute_configurations(args: &SolutionArgs, output: &OutputConfig) -> Result<()> {
    check_solution(args)?;
    let setup = ToolSetup::load(args.bin_path.as_deref())?;
    let options = setup.config.apply_to(args.to_options(output));
    let builder = SolutionBuilder::new(&setup.runner, &setup.tools, &args.solution, options);

    let spinner = output
        .spinners_enabled()
        .then(|| create_spinner("Reading solution contexts..."));
    let result = builder.list_configurations();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let configurations = result.context("Failed to list configurations")?;

    if !output.quiet || output.json {
        print_list(&configurations, output.json)?;
    }
    Ok(())
}

/// Execute `list toolchains`
pub fn execute_toolchains(args: &SolutionArgs, output: &OutputConfig) -> Result<()> {
    check_solution(args)?;
    let setup = ToolSetup::load(args.bin_path.as_deref())?;
    let options = setup.config.apply_to(args.to_options(output));

    let builder = SolutionBuilder::new(&setup.runner, &setup.tools, &args.solution, options);
    let toolchains = builder
        .list_toolchains(!echo_tool(output))
        .context("Failed to list toolchains")?;

    if output.json {
        print_list(&toolchains, true)?;
    }
    Ok(())
}
