//! Solbuild - multi-project solution builder
//!
//! Resolves the build contexts of a csolution project and drives the
//! external tools that install packs, convert the solution and build each
//! generated project.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Context resolution and build orchestration
//! - [`infra`] - Tool discovery, process execution and directories
//! - [`config`] - Constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
