//! Template root resolution and manifest loading
//!
//! The bundled templates are compiled into the binary. A local directory
//! (`--template-dir` or `NEXT_START_TEMPLATE_DIR`) replaces them at run time.

use super::manifest::{RootManifest, TemplateManifest};
use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Environment variable overriding the template root
pub const TEMPLATE_DIR_ENV: &str = "NEXT_START_TEMPLATE_DIR";

/// Manifest file name, both at the root and inside each template
pub const MANIFEST_FILE: &str = "template.yaml";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct BundledTemplates;

/// One file of a manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path below the entry; empty when the entry is a single file
    pub relative: PathBuf,
    pub contents: Vec<u8>,
}

/// Where template manifests and files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into this crate
    Bundled,
    /// Templates read from a directory
    Local(PathBuf),
}

impl TemplateSource {
    pub fn bundled() -> Self {
        TemplateSource::Bundled
    }

    pub fn local(root: PathBuf) -> Self {
        TemplateSource::Local(root)
    }

    /// Pick the template root: explicit flag, then env override, then bundled
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        explicit
            .or_else(|| {
                std::env::var_os(TEMPLATE_DIR_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .map(Self::local)
            .unwrap_or_else(Self::bundled)
    }

    /// Directory the templates are read from, `None` for the bundled set
    pub fn root(&self) -> Option<&Path> {
        match self {
            TemplateSource::Bundled => None,
            TemplateSource::Local(root) => Some(root),
        }
    }

    /// Load templates/template.yaml
    pub async fn root_manifest(&self) -> Result<RootManifest> {
        let content = self.read_text(MANIFEST_FILE).await?;
        serde_yaml::from_str(&content).context("Failed to parse root template.yaml")
    }

    /// Load templates/<name>/template.yaml, rejecting names the root manifest doesn't list
    pub async fn template_manifest(&self, template_name: &str) -> Result<TemplateManifest> {
        let root_manifest = self.root_manifest().await?;
        if !root_manifest.contains(template_name) {
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                template_name,
                root_manifest.templates.join(", ")
            );
        }

        let content = self
            .read_text(&format!("{template_name}/{MANIFEST_FILE}"))
            .await?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse template.yaml for '{}'", template_name))
    }

    /// Files of one manifest entry, ordered by path. A directory entry yields
    /// every file below it.
    pub async fn entry_files(&self, template_name: &str, source: &str) -> Result<Vec<TemplateFile>> {
        let key = format!("{template_name}/{}", source.trim_end_matches('/'));
        let mut files = match self {
            TemplateSource::Bundled => bundled_files(&key)?,
            TemplateSource::Local(root) => local_files(&root.join(&key)).await?,
        };
        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(files)
    }

    async fn read_text(&self, relative: &str) -> Result<String> {
        match self {
            TemplateSource::Bundled => {
                let file = BundledTemplates::get(relative)
                    .with_context(|| format!("Bundled template file missing: {relative}"))?;
                String::from_utf8(file.data.into_owned())
                    .with_context(|| format!("Invalid UTF-8 in bundled {relative}"))
            }
            TemplateSource::Local(root) => {
                let path = root.join(relative);
                fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }
}

fn bundled_files(key: &str) -> Result<Vec<TemplateFile>> {
    if let Some(file) = BundledTemplates::get(key) {
        return Ok(vec![TemplateFile {
            relative: PathBuf::new(),
            contents: file.data.into_owned(),
        }]);
    }

    let prefix = format!("{key}/");
    let files: Vec<TemplateFile> = BundledTemplates::iter()
        .filter_map(|name| {
            let relative = name.strip_prefix(prefix.as_str())?.to_string();
            let file = BundledTemplates::get(&name)?;
            Some(TemplateFile {
                relative: PathBuf::from(relative),
                contents: file.data.into_owned(),
            })
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("Template source not found: {key} (bundled)");
    }
    Ok(files)
}

async fn local_files(source_path: &Path) -> Result<Vec<TemplateFile>> {
    let metadata = fs::metadata(source_path)
        .await
        .with_context(|| format!("Template source not found: {}", source_path.display()))?;

    if !metadata.is_dir() {
        let contents = fs::read(source_path)
            .await
            .with_context(|| format!("Failed to read {}", source_path.display()))?;
        return Ok(vec![TemplateFile {
            relative: PathBuf::new(),
            contents,
        }]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source_path).min_depth(1) {
        let entry = entry.with_context(|| {
            format!("Failed to read template directory: {}", source_path.display())
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let contents = fs::read(entry.path())
            .await
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        files.push(TemplateFile {
            relative: entry.path().strip_prefix(source_path)?.to_path_buf(),
            contents,
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_root_wins() {
        let source = TemplateSource::resolve(Some(PathBuf::from("/tmp/my-templates")));
        assert_eq!(source.root(), Some(Path::new("/tmp/my-templates")));
    }

    #[test]
    fn test_bundled_has_no_filesystem_root() {
        assert_eq!(TemplateSource::bundled().root(), None);
    }

    #[tokio::test]
    async fn test_bundled_manifests_are_embedded() {
        let source = TemplateSource::bundled();
        let root = source.root_manifest().await.unwrap();
        assert!(root.contains("infra"));

        let infra = source.template_manifest("infra").await.unwrap();
        assert_eq!(infra.name, "Infra");
    }

    #[tokio::test]
    async fn test_bundled_entry_files() {
        let source = TemplateSource::bundled();

        let script = source
            .entry_files("infra", "scripts/start-docker.sh")
            .await
            .unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].relative, PathBuf::new());
        assert!(script[0].contents.starts_with(b"#!"));

        let scripts = source.entry_files("infra", "scripts/").await.unwrap();
        assert_eq!(scripts[0].relative, PathBuf::from("start-docker.sh"));

        assert!(source.entry_files("infra", "missing").await.is_err());
    }

    #[tokio::test]
    async fn test_local_entry_files_are_sorted() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("site/pages");
        std::fs::create_dir_all(dir.join("b")).unwrap();
        std::fs::write(dir.join("c.tsx"), "c").unwrap();
        std::fs::write(dir.join("b/page.tsx"), "b").unwrap();
        std::fs::write(dir.join("a.tsx"), "a").unwrap();

        let source = TemplateSource::local(temp.path().to_path_buf());
        let files = source.entry_files("site", "pages").await.unwrap();
        let names: Vec<PathBuf> = files.into_iter().map(|f| f.relative).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.tsx"),
                PathBuf::from("b/page.tsx"),
                PathBuf::from("c.tsx"),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_template_lists_available() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILE), "templates: [client, infra]").unwrap();

        let source = TemplateSource::local(temp.path().to_path_buf());
        let err = source.template_manifest("billing").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'billing' not found"));
        assert!(message.contains("client, infra"));
    }

    #[tokio::test]
    async fn test_missing_root_manifest() {
        let temp = TempDir::new().unwrap();
        let source = TemplateSource::local(temp.path().to_path_buf());
        assert!(source.root_manifest().await.is_err());
    }
}
