//! Template manifest types and parsing

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// One file or directory to lay down from a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Path relative to the template's own directory
    pub source: String,

    /// Path relative to the generated project root
    pub destination: String,
}

impl TemplateEntry {
    /// Destination as a path that stays inside the project root
    pub fn destination_path(&self) -> Result<&Path> {
        let path = Path::new(&self.destination);
        let inside = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        let named = path.components().any(|c| matches!(c, Component::Normal(_)));
        if self.destination.trim().is_empty() || !inside || !named {
            anyhow::bail!(
                "Destination '{}' (from '{}') must be a relative path inside the project",
                self.destination,
                self.source
            );
        }
        Ok(path)
    }
}

/// Root template manifest (templates/template.yaml)
/// Lists the bundled template directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,
}

impl RootManifest {
    pub fn contains(&self, template_name: &str) -> bool {
        self.templates.iter().any(|t| t == template_name)
    }
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Minimum CLI version (semver) the template was written for
    pub version: String,

    /// Entries copied in order
    pub files: Vec<TemplateEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_manifest() {
        let yaml = r#"
name: Infra
description: Docker setup
version: 0.1.0
files:
  - source: dockerignore
    destination: .dockerignore
  - source: pages/(client)
    destination: src/app/(client)
"#;
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.name, "Infra");
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[0].destination, ".dockerignore");
        assert_eq!(manifest.files[1].source, "pages/(client)");
    }

    #[test]
    fn test_description_is_optional() {
        let yaml = "name: Login\nversion: 0.1.0\nfiles: []\n";
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(manifest.description.is_empty());
        assert!(manifest.files.is_empty());
    }

    fn entry(destination: &str) -> TemplateEntry {
        TemplateEntry {
            source: "dockerignore".to_string(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn test_relative_destinations_are_accepted() {
        assert_eq!(
            entry("src/app/(client)").destination_path().unwrap(),
            Path::new("src/app/(client)")
        );
        assert!(entry("./.dockerignore").destination_path().is_ok());
    }

    #[test]
    fn test_escaping_destinations_are_rejected() {
        for destination in ["/etc/passwd", "../outside", "src/../../outside", "", "  ", "."] {
            let err = entry(destination).destination_path().unwrap_err();
            assert!(err.to_string().contains("inside the project"), "{destination}");
        }
    }

    #[test]
    fn test_root_manifest_lookup() {
        let root: RootManifest = serde_yaml::from_str("templates: [admin, client]").unwrap();
        assert!(root.contains("client"));
        assert!(!root.contains("infra"));
    }
}
