//! Template manifests, template root resolution and copying
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest)
//! - Template root resolution (flag, env override, bundled)
//! - Manifest-driven copying into the generated project
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod source;
pub mod version;

pub use copier::{copy_template_files, CopyReport};
pub use manifest::{RootManifest, TemplateEntry, TemplateManifest};
pub use source::{TemplateFile, TemplateSource};
pub use version::{check_compatibility, VersionMismatch};
