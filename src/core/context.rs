//! Context identifier codec
//!
//! A context names one build variant of one project:
//!
//! ```text
//! context    = project [ "." build-type ] "+" target-type
//! token      = 1*( any character except "." and "+" )
//! ```
//!
//! Parsing produces a [`ContextItem`]; formatting it reproduces the
//! canonical string, so `parse(s).to_string() == s` for every well-formed `s`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SolutionError};

/// Delimiter in front of the build type
pub const BUILD_TYPE_DELIMITER: char = '.';

/// Delimiter in front of the target type
pub const TARGET_TYPE_DELIMITER: char = '+';

/// Structured form of a context identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextItem {
    /// Project name, never empty
    pub project_name: String,
    /// Optional build type
    pub build_type: Option<String>,
    /// Target type, never empty
    pub target_type: String,
}

impl ContextItem {
    /// Create a context item without a build type
    pub fn new(project_name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            build_type: None,
            target_type: target_type.into(),
        }
    }

    /// Set the build type
    #[must_use]
    pub fn with_build_type(mut self, build_type: impl Into<String>) -> Self {
        let build_type = build_type.into();
        self.build_type = if build_type.is_empty() {
            None
        } else {
            Some(build_type)
        };
        self
    }

    /// Build type, if any
    pub fn build_type(&self) -> Option<&str> {
        self.build_type.as_deref()
    }

    /// The configuration this context belongs to (`[.build]+target`)
    pub fn configuration(&self) -> String {
        match &self.build_type {
            Some(build) => format!(
                "{BUILD_TYPE_DELIMITER}{build}{TARGET_TYPE_DELIMITER}{}",
                self.target_type
            ),
            None => format!("{TARGET_TYPE_DELIMITER}{}", self.target_type),
        }
    }
}

impl fmt::Display for ContextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.project_name, self.configuration())
    }
}

impl FromStr for ContextItem {
    type Err = SolutionError;

    fn from_str(s: &str) -> Result<Self> {
        parse_context(s)
    }
}

/// Parse a context identifier into its structured form
///
/// Fails with a format error when the `+` delimiter is missing, when any
/// token is empty, or when a token contains a delimiter.
pub fn parse_context(input: &str) -> Result<ContextItem> {
    let invalid = |reason: &str| {
        SolutionError::format(format!("invalid context '{input}': {reason}"))
    };

    let (head, target_type) = input
        .split_once(TARGET_TYPE_DELIMITER)
        .ok_or_else(|| invalid("missing target type"))?;

    if target_type.is_empty() {
        return Err(invalid("empty target type"));
    }
    if target_type.contains([BUILD_TYPE_DELIMITER, TARGET_TYPE_DELIMITER]) {
        return Err(invalid("target type contains a delimiter"));
    }

    let (project_name, build_type) = match head.split_once(BUILD_TYPE_DELIMITER) {
        Some((project, build)) => {
            if build.is_empty() {
                return Err(invalid("empty build type"));
            }
            if build.contains(BUILD_TYPE_DELIMITER) {
                return Err(invalid("build type contains a delimiter"));
            }
            (project, Some(build.to_string()))
        }
        None => (head, None),
    };

    if project_name.is_empty() {
        return Err(invalid("empty project name"));
    }

    Ok(ContextItem {
        project_name: project_name.to_string(),
        build_type,
        target_type: target_type.to_string(),
    })
}

/// Format a context item into its canonical string
pub fn format_context(item: &ContextItem) -> String {
    item.to_string()
}

/// Canonicalise `input` and check it against the catalog
///
/// Membership is exact and case sensitive. On a miss the error lists the
/// whole catalog in lexicographic order.
pub fn validate_context(catalog: &[String], input: &str) -> Result<String> {
    let context = format_context(&parse_context(input)?);

    if catalog.iter().any(|c| *c == context) {
        return Ok(context);
    }

    let mut known: Vec<&str> = catalog.iter().map(String::as_str).collect();
    known.sort_unstable();
    let message = format!(
        "specified context '{input}' not found. \
         One of the following contexts must be specified:\n{}",
        known.join("\n")
    );
    tracing::error!("{message}");
    Err(SolutionError::not_found(message))
}
