//! Build index document
//!
//! The conversion step writes `<base>.cbuild-idx.yml`, which lists one build
//! entry per generated context. The locator uses it to find the descriptor
//! of a context.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::DESCRIPTOR_EXTENSION;
use crate::error::{Result, SolutionError};

/// Root of the index document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(rename = "build-idx")]
    pub build_idx: BuildIndex,
}

/// Body of the index document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildIndex {
    /// Tool and version that produced the index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,

    /// Solution file the index was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csolution: Option<String>,

    /// Project files of the solution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cprojects: Vec<ProjectEntry>,

    /// One entry per generated context
    #[serde(default)]
    pub cbuilds: Vec<BuildEntry>,
}

/// Project file reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub cproject: String,
}

/// Generated build file reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildEntry {
    /// Path of the generated build file, relative to the index
    pub cbuild: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

impl IndexDocument {
    /// Parse an index document from YAML text
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Read and parse the index document at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SolutionError::IndexParse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| SolutionError::IndexParse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// First build entry whose path contains `context`
    ///
    /// This is a substring match, so with contexts like `App+Board` and
    /// `MyApp+Board` the earlier entry wins.
    pub fn find_build(&self, context: &str) -> Option<&BuildEntry> {
        self.build_idx
            .cbuilds
            .iter()
            .find(|entry| entry.cbuild.contains(context))
    }
}

/// Path of the index document for a solution base name
pub fn index_path(base_dir: &Path, base_name: &str) -> PathBuf {
    base_dir.join(format!("{base_name}.cbuild-idx.yml"))
}

/// Absolute path of the descriptor generated for `context`
///
/// Resolves to `<index dir>/<entry dir>/<context>.cprj`.
pub fn locate_descriptor(index_file: &Path, context: &str) -> Result<PathBuf> {
    let index = IndexDocument::load(index_file).map_err(|e| {
        tracing::error!("error getting descriptor file: {e}");
        e
    })?;
    descriptor_path(&index, index_file, context)
}

/// Descriptor path for `context` from an already parsed index
pub fn descriptor_path(index: &IndexDocument, index_file: &Path, context: &str) -> Result<PathBuf> {
    let Some(entry) = index.find_build(context) else {
        tracing::error!(
            "no build entry for context '{context}' in '{}'",
            index_file.display()
        );
        return Err(SolutionError::not_found(format!(
            "descriptor file path for context '{context}' not found in '{}'",
            index_file.display()
        )));
    };

    let index_dir = index_file.parent().unwrap_or_else(|| Path::new(""));
    let entry_dir = Path::new(&entry.cbuild)
        .parent()
        .unwrap_or_else(|| Path::new(""));

    Ok(index_dir
        .join(entry_dir)
        .join(format!("{context}.{DESCRIPTOR_EXTENSION}")))
}
