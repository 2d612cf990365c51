//! Installing a missing Yarn
//!
//! Generated projects are set up with Yarn, which is not always installed
//! alongside Node.js. The installer runs through [`ProcessRunner`] with the
//! terminal attached and probes again afterwards, since a global npm install
//! can succeed without the binary landing on `PATH`.

use super::check::{check_yarn, RuntimeInfo};
use super::process::{Invocation, ProcessRunner};
use anyhow::{Context, Result};
use colored::Colorize;

/// A tool the CLI can install for the user
#[derive(Debug, Clone)]
pub struct ToolInstaller {
    pub display_name: &'static str,
    pub docs_url: &'static str,
    install: Invocation,
    probe: fn() -> RuntimeInfo,
}

impl ToolInstaller {
    /// Command line shown before installing
    pub fn install_command(&self) -> String {
        self.install.to_string()
    }

    pub fn is_installed(&self) -> bool {
        (self.probe)().available
    }

    /// Run the installer, then check the tool answers `--version`
    pub async fn install(&self, runner: &ProcessRunner) -> Result<RuntimeInfo> {
        let command = self.install_command();
        println!();
        println!("{} {}", "Running:".dimmed(), command.yellow());
        println!();

        runner
            .run(&self.install.clone().inherit())
            .await
            .with_context(|| format!("Please try installing manually: {command}"))?;
        println!();

        let info = (self.probe)();
        if !info.available {
            anyhow::bail!(
                "{} was installed but is not on your PATH. Open a new terminal and run this command again.",
                self.display_name
            );
        }
        Ok(info)
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!("Opening {} documentation in your browser...", self.display_name).cyan()
        );
        open::that(self.docs_url)
            .with_context(|| format!("Could not open {}", self.docs_url))?;
        Ok(())
    }
}

/// Yarn classic, installed globally through npm
pub fn yarn_installer() -> ToolInstaller {
    ToolInstaller {
        display_name: "Yarn",
        docs_url: "https://classic.yarnpkg.com/en/docs/install",
        install: Invocation::new("npm", ["install", "-g", "yarn"]),
        probe: check_yarn,
    }
}
