//! next-start core - shared library behind the `next-start` CLI
//!
//! This library scaffolds a Next.js project: it runs the external generators
//! (`create-next-app`, `shadcn`, `yarn`, `git`) and lays bundled templates over
//! the generated tree.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - validation, template copying, text patching,
//!   process execution and runtime detection
//! - **Layer 2: Workflow Orchestration** - step modules and the step driver that
//!   applies the fatal/auxiliary failure policy
//! - **Layer 3: CLI/TUI Interface** - cliclack prompts and the interactive run
//!
//! # Example Usage (without prompts)
//!
//! ```ignore
//! use next_start_core::templates::{copy_template_files, TemplateSource};
//!
//! let source = TemplateSource::bundled();
//! let report = copy_template_files(&source, "infra", project_dir).await?;
//! ```

pub mod config;
pub mod error;
pub mod patch;
pub mod runtime;
pub mod steps;
pub mod templates;
pub mod tui;
pub mod validation;

// Re-export main types for convenience
pub use config::{Flags, ProjectConfig};
pub use error::ScaffoldError;
pub use steps::{Policy, Step, StepContext};
pub use templates::{copy_template_files, TemplateManifest, TemplateSource};
pub use tui::{run, RunArgs};

/// CLI version - used for template compatibility checking
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
