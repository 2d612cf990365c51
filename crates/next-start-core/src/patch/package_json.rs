//! `package.json` script merging

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Set (or overwrite) entries of the `scripts` object, keeping every other key
/// and the existing key order. Output uses two-space indentation and ends
/// with a newline, as generated `package.json` files do.
pub async fn merge_package_scripts(path: &Path, scripts: &[(&str, &str)]) -> Result<()> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let merged = merge_scripts(&content, scripts)
        .with_context(|| format!("Failed to update scripts in {}", path.display()))?;

    fs::write(path, merged)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn merge_scripts(content: &str, scripts: &[(&str, &str)]) -> Result<String> {
    let mut package: Value = serde_json::from_str(content).context("Invalid package.json")?;

    let root = package
        .as_object_mut()
        .context("package.json is not a JSON object")?;
    let entry = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    let existing = entry
        .as_object_mut()
        .context("\"scripts\" in package.json is not an object")?;

    for (name, command) in scripts {
        existing.insert((*name).to_string(), Value::String((*command).to_string()));
    }

    let mut merged = serde_json::to_string_pretty(&package)?;
    merged.push('\n');
    Ok(merged)
}
