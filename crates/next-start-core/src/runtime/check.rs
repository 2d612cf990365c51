//! Runtime detection for Node.js, npx and Yarn

use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Version with a leading `v` removed (`v20.11.0` -> `20.11.0`)
    pub fn bare_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(|v| v.strip_prefix('v').unwrap_or(v))
    }
}

/// Run `<program> --version` and report what came back
fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if npx is available
pub fn check_npx() -> RuntimeInfo {
    probe("npx", "npx")
}

/// Check if Yarn is available
pub fn check_yarn() -> RuntimeInfo {
    probe("Yarn", "yarn")
}

/// Check the runtimes every run needs. Node.js and npx are required; Yarn is
/// reported but its absence is handled by the caller (it can be installed).
pub fn check_runtimes() -> Result<Vec<RuntimeInfo>> {
    summarize(vec![check_node(), check_npx(), check_yarn()])
}

fn summarize(runtimes: Vec<RuntimeInfo>) -> Result<Vec<RuntimeInfo>> {
    let missing: Vec<&str> = runtimes
        .iter()
        .filter(|r| !r.available && r.name != "Yarn")
        .map(|r| r.name)
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {} (install from https://nodejs.org)", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(runtimes)
}
