//! Runtime detection, process execution and tool management
//!
//! This module provides:
//! - The process runner every step uses for external commands
//! - Runtime detection (Node.js, npx, Yarn)
//! - Tool installation for a missing Yarn
//! - Git helpers for the setup commits

pub mod check;
pub mod git;
pub mod process;
pub mod tool;

pub use check::{check_node, check_npx, check_runtimes, check_yarn, RuntimeInfo};
pub use process::{Invocation, OutputMode, ProcessOutput, ProcessRunner};
pub use tool::{yarn_installer, ToolInstaller};
