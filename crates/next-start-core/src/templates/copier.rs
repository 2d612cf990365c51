//! Template file copying
//!
//! Entries are applied in manifest order. A directory entry is copied
//! recursively; a file entry overwrites whatever is at its destination.
//! Destinations must stay inside the destination root.
//! Copying is not merging: running the same template twice leaves the
//! destination byte-identical to running it once.

use crate::templates::source::{TemplateFile, TemplateSource};
use crate::templates::version;
use crate::CLI_VERSION;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// What a template copy wrote
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    /// Template directory name
    pub template: String,

    /// Files written, relative to the destination root
    pub files: Vec<PathBuf>,

    /// Set when the template's manifest expects a newer CLI
    pub compatibility_warning: Option<String>,
}

/// Copy every entry of `template_name`'s manifest into `destination_root`
pub async fn copy_template_files(
    source: &TemplateSource,
    template_name: &str,
    destination_root: &Path,
) -> Result<CopyReport> {
    let manifest = source.template_manifest(template_name).await?;

    let mut report = CopyReport {
        template: template_name.to_string(),
        files: Vec::new(),
        compatibility_warning: version::check_compatibility(CLI_VERSION, &manifest.version)
            .map(|mismatch| mismatch.to_string()),
    };

    for entry in &manifest.files {
        let destination = entry
            .destination_path()
            .with_context(|| format!("Invalid entry in the {template_name} template"))?;

        let files = source
            .entry_files(template_name, &entry.source)
            .await
            .with_context(|| format!("Failed to copy {}", entry.destination))?;

        for file in files {
            let relative = if file.relative.as_os_str().is_empty() {
                destination.to_path_buf()
            } else {
                destination.join(&file.relative)
            };
            write_file(&destination_root.join(&relative), &file)
                .await
                .with_context(|| format!("Failed to copy {}", entry.destination))?;
            report.files.push(relative);
        }
    }

    Ok(report)
}

async fn write_file(target_path: &Path, file: &TemplateFile) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(target_path, &file.contents)
        .await
        .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
    debug!(to = %target_path.display(), bytes = file.contents.len(), "wrote template file");

    Ok(())
}
