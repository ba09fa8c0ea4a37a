//! Error types for solbuild
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse error class, used by callers that only care which kind of
/// failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Conflicting options were supplied
    Configuration,
    /// A file name or context string is malformed
    Format,
    /// A required tool binary is missing on disk
    ToolNotFound,
    /// A tool could not be spawned or exited with a nonzero status
    ToolExecution,
    /// A context, configuration or descriptor does not exist
    NotFound,
}

/// Top-level solbuild error type
#[derive(Error, Debug)]
pub enum SolutionError {
    /// Mutually exclusive options were both set
    #[error("{message}")]
    Configuration { message: String },

    /// Malformed context string or solution file name
    #[error("{message}")]
    Format { message: String },

    /// Tool binary is missing
    #[error("{tool} was not found at '{}'", path.display())]
    ToolNotFound { tool: String, path: PathBuf },

    /// Tool failed to spawn or exited with an error
    #[error("{tool} failed: {message}")]
    ToolExecution { tool: String, message: String },

    /// Context, configuration or descriptor is absent
    #[error("{message}")]
    NotFound { message: String },

    /// Index document could not be read or parsed
    #[error("Failed to parse index file '{}': {error}", path.display())]
    IndexParse { path: PathBuf, error: String },

    /// Per-project build failed
    #[error("error processing '{}'", descriptor.display())]
    ProjectBuild {
        descriptor: PathBuf,
        #[source]
        source: Box<SolutionError>,
    },
}

impl SolutionError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Classify this error
    ///
    /// A failed project build reports the class of its underlying cause;
    /// an unreadable index document counts as a missing descriptor.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Format { .. } => ErrorKind::Format,
            Self::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            Self::ToolExecution { .. } => ErrorKind::ToolExecution,
            Self::NotFound { .. } | Self::IndexParse { .. } => ErrorKind::NotFound,
            Self::ProjectBuild { source, .. } => source.kind(),
        }
    }
}

/// Result alias for the core layers
pub type Result<T, E = SolutionError> = std::result::Result<T, E>;
