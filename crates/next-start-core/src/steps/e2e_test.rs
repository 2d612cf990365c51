//! End-to-end test framework setup (Playwright or Cypress)

use super::{commit_changes, run_interactive, write_project_file, StepContext};
use crate::patch::merge_package_scripts;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E2eFramework {
    Playwright,
    Cypress,
}

impl E2eFramework {
    pub fn label(self) -> &'static str {
        match self {
            E2eFramework::Playwright => "Playwright",
            E2eFramework::Cypress => "Cypress",
        }
    }

    /// How to run the suite once installed
    pub fn usage(self) -> &'static str {
        match self {
            E2eFramework::Playwright => {
                "Run tests with: yarn playwright test\nShow UI: yarn playwright test --ui"
            }
            E2eFramework::Cypress => "Open Cypress UI: yarn cypress:open\nRun tests: yarn cypress:run",
        }
    }
}

pub const CYPRESS_SCRIPTS: &[(&str, &str)] = &[
    ("cypress:open", "cypress open"),
    ("cypress:run", "cypress run"),
    ("e2e", "cypress run"),
];

const CYPRESS_CONFIG: &str = r#"import { defineConfig } from 'cypress'

export default defineConfig({
  e2e: {
    baseUrl: 'http://localhost:3000',
    setupNodeEvents(on, config) {},
  },
})
"#;

const CYPRESS_SAMPLE: &str = r#"describe('Home', () => {
  it('renders the home page', () => {
    cy.visit('/')

    cy.get('h1').contains('Home')
  })
})
"#;

/// Cypress scripts and config; runs before `cypress install`
pub async fn configure_cypress(project_dir: &Path) -> Result<()> {
    merge_package_scripts(&project_dir.join("package.json"), CYPRESS_SCRIPTS).await?;
    write_project_file(&project_dir.join("cypress.config.js"), CYPRESS_CONFIG).await
}

/// Sample test; written after `cypress install` so it is not overwritten
pub async fn write_cypress_sample(project_dir: &Path) -> Result<()> {
    write_project_file(&project_dir.join("cypress/e2e/app.cy.js"), CYPRESS_SAMPLE).await
}

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    let choice: Option<E2eFramework> = cliclack::select("Select an E2E testing framework")
        .item(Some(E2eFramework::Playwright), "Playwright", "")
        .item(Some(E2eFramework::Cypress), "Cypress", "")
        .item(None, "Skip E2E testing", "")
        .initial_value(Some(E2eFramework::Playwright))
        .interact()?;

    let Some(framework) = choice else {
        cliclack::log::remark("Skipping E2E test setup")?;
        return Ok(());
    };

    match framework {
        E2eFramework::Playwright => {
            run_interactive(ctx, "Installing Playwright", ctx.yarn(["create", "playwright"])).await?;
        }
        E2eFramework::Cypress => {
            run_interactive(ctx, "Installing Cypress", ctx.yarn(["add", "-D", "cypress"])).await?;
            configure_cypress(&ctx.project_dir()).await?;
            run_interactive(
                ctx,
                "Initializing Cypress (this may take a moment)",
                ctx.yarn(["cypress", "install"]),
            )
            .await?;
            write_cypress_sample(&ctx.project_dir()).await?;
        }
    }

    cliclack::log::success(format!("{} installed\n{}", framework.label(), framework.usage()))?;
    commit_changes(
        ctx,
        &[],
        &format!("test: add {} end-to-end testing setup", framework.label()),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cypress_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name":"shop","scripts":{"dev":"next dev"}}"#,
        )
        .unwrap();

        configure_cypress(temp.path()).await.unwrap();
        write_cypress_sample(temp.path()).await.unwrap();

        let config = std::fs::read_to_string(temp.path().join("cypress.config.js")).unwrap();
        assert!(config.contains("baseUrl: 'http://localhost:3000'"));
        assert!(temp.path().join("cypress/e2e/app.cy.js").exists());

        let package: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp.path().join("package.json")).unwrap())
                .unwrap();
        assert_eq!(package["scripts"]["e2e"], "cypress run");
        assert_eq!(package["scripts"]["cypress:open"], "cypress open");
        assert_eq!(package["scripts"]["dev"], "next dev");
    }

    #[test]
    fn test_usage_mentions_runner() {
        assert!(E2eFramework::Playwright.usage().contains("yarn playwright test"));
        assert!(E2eFramework::Cypress.usage().contains("yarn cypress:run"));
    }
}
