//! Core business logic module
//!
//! Context resolution and build orchestration. External tools are reached
//! only through [`crate::infra::process::CommandRunner`].
//!
//! # Submodules
//!
//! - [`context`] - Context identifier parsing and validation
//! - [`configuration`] - Build/target configurations shared by contexts
//! - [`options`] - Build options and tool argument formulation
//! - [`selector`] - Selection of contexts to build
//! - [`catalog`] - Compiler tool listings
//! - [`index`] - Build index document and descriptor lookup
//! - [`layout`] - Output and intermediate directory layout
//! - [`packs`] - Missing pack installation
//! - [`project`] - Per-project builder seam
//! - [`phase`] - Build phase tracking
//! - [`builder`] - Build orchestration
//! - [`global_config`] - Global configuration management

pub mod builder;
pub mod catalog;
pub mod configuration;
pub mod context;
pub mod global_config;
pub mod index;
pub mod layout;
pub mod options;
pub mod packs;
pub mod phase;
pub mod project;
pub mod selector;
