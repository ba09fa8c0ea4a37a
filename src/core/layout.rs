//! Output directory layout
//!
//! Derives the solution base name, the index document location and the
//! per-context output and intermediate directories.

use std::path::{Path, PathBuf};

use crate::core::context::ContextItem;
use crate::core::index;
use crate::core::options::BuildOptions;
use crate::error::{Result, SolutionError};

/// Output directory name next to the descriptor
pub const OUT_DIR_NAME: &str = "out";

/// Intermediate directory name next to the descriptor
pub const TMP_DIR_NAME: &str = "tmp";

/// Base name of a solution file named `<name>.<kind>.<ext>`
pub fn solution_base_name(solution: &Path) -> Result<String> {
    let file_name = solution
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let tokens: Vec<&str> = file_name.split('.').collect();
    if tokens.len() != 3 {
        tracing::error!("invalid solution file name '{file_name}'");
        return Err(SolutionError::format(format!(
            "invalid solution file name '{file_name}': expected '<name>.csolution.yml'"
        )));
    }
    Ok(tokens[0].to_string())
}

/// Location of the index document for `solution`
///
/// Lives in the global output directory when one is set, else next to the
/// solution file.
pub fn index_file(solution: &Path, options: &BuildOptions) -> Result<PathBuf> {
    let base_name = solution_base_name(solution)?;
    let base_dir = match &options.output {
        Some(output) => output.clone(),
        None => solution.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    Ok(index::index_path(&base_dir, &base_name))
}

/// Build directory for one context under `root` (`out` or `tmp`)
pub fn context_dir(descriptor: &Path, root: &str, item: &ContextItem) -> PathBuf {
    let mut path = descriptor
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(root)
        .join(&item.project_name);
    if let Some(build_type) = item.build_type() {
        path.push(build_type);
    }
    path.push(&item.target_type);
    path
}

/// Output and intermediate directories of one context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDirs {
    pub out_dir: PathBuf,
    pub int_dir: PathBuf,
}

impl ContextDirs {
    /// Default layout next to the descriptor
    pub fn for_descriptor(descriptor: &Path, item: &ContextItem) -> Self {
        Self {
            out_dir: context_dir(descriptor, OUT_DIR_NAME, item),
            int_dir: context_dir(descriptor, TMP_DIR_NAME, item),
        }
    }
}
