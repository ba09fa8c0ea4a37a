//! Missing pack installation
//!
//! Asks the compiler tool which packs the solution needs but are not
//! installed, then installs them one at a time with the pack installer.

use crate::config::defaults::CPACKGET_TOOL;
use crate::core::catalog::CompilerTool;
use crate::error::Result;
use crate::infra::process::CommandRunner;
use crate::infra::tools::ToolPaths;

/// Installer arguments for one pack
pub fn install_args(pack: &str) -> Vec<String> {
    vec![
        "pack".to_string(),
        "add".to_string(),
        pack.to_string(),
        "--force-reinstall".to_string(),
        "--agree-embedded-license".to_string(),
    ]
}

/// Install every missing pack, in listing order
///
/// Stops at the first failing install; packs installed before it stay
/// installed. Returns the packs that were installed.
pub fn install_missing_packs(
    compiler: &CompilerTool<'_>,
    runner: &dyn CommandRunner,
    tools: &ToolPaths,
) -> Result<Vec<String>> {
    let missing = compiler.list_missing_packs()?;
    if missing.is_empty() {
        tracing::info!("no missing packs");
        return Ok(missing);
    }

    let installer = tools.require(CPACKGET_TOOL)?;
    let mut installed = Vec::with_capacity(missing.len());

    for pack in missing {
        tracing::info!("installing pack: {pack}");
        runner
            .execute(&installer, &install_args(&pack), compiler.quiet())
            .map_err(|e| {
                tracing::error!("error installing pack: {pack}");
                e
            })?;
        installed.push(pack);
    }

    Ok(installed)
}
