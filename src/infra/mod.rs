//! Infrastructure layer
//!
//! Handles filesystem locations, tool discovery and external processes.

pub mod dirs;
pub mod process;
pub mod tools;
