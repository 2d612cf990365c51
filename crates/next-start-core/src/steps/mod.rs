//! Scaffolding steps
//!
//! Each step is one phase of the setup: it runs external tools in the
//! project, lays templates over the generated tree and patches generated
//! files. Steps only see the immutable [`ProjectConfig`] through a
//! [`StepContext`]; later steps rely on the filesystem state earlier ones
//! left behind.
//!
//! A step returns an error for any failure that should count against the
//! step as a whole. Whether that aborts the run is decided by the step's
//! [`Policy`] in [`pipeline::drive`]. Sub-operations that are never worth
//! aborting for (git commits, cosmetic patches) are softened to warnings
//! inside the step.

pub mod admin;
pub mod client;
pub mod components;
pub mod create_app;
pub mod e2e_test;
pub mod form_table;
pub mod infra;
pub mod login;
pub mod pipeline;
pub mod ui_init;

pub use pipeline::{drive, plan, RunSummary, StepInfo, StepOutcome};

use crate::config::ProjectConfig;
use crate::error::is_cancelled;
use crate::patch::{self, PatchReport, PatchRule};
use crate::runtime::git;
use crate::runtime::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::templates::{copy_template_files, TemplateSource};
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Package manager used by the generated project
pub const PACKAGE_MANAGER: &str = "yarn";

/// UI component installer package
pub const SHADCN: &str = "shadcn@latest";

/// What a step failure means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Later steps depend on this one; failure exits with status 1
    Fatal,
    /// Failure is reported and the run continues
    Auxiliary,
}

/// The phases of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateApp,
    UiInit,
    ComponentInstall,
    ClientSetup,
    AdminSetup,
    InfraSetup,
    UnitTestSetup,
    E2eTestSetup,
}

impl Step {
    pub async fn run(self, ctx: &StepContext<'_>) -> Result<()> {
        match self {
            Step::CreateApp => create_app::run(ctx).await,
            Step::UiInit => ui_init::run(ctx).await,
            Step::ComponentInstall => components::run(ctx).await,
            Step::ClientSetup => client::run(ctx).await,
            Step::AdminSetup => admin::run(ctx).await,
            Step::InfraSetup => infra::run(ctx).await,
            Step::UnitTestSetup => unit_test::run(ctx).await,
            Step::E2eTestSetup => e2e_test::run(ctx).await,
        }
    }
}

impl StepInfo for Step {
    fn name(&self) -> &'static str {
        match self {
            Step::CreateApp => "Create Next.js app",
            Step::UiInit => "Initialize shadcn/ui",
            Step::ComponentInstall => "Install components",
            Step::ClientSetup => "Client setup",
            Step::AdminSetup => "Admin dashboard setup",
            Step::InfraSetup => "Docker infrastructure setup",
            Step::UnitTestSetup => "Unit test setup",
            Step::E2eTestSetup => "End-to-end test setup",
        }
    }

    fn policy(&self) -> Policy {
        match self {
            Step::UnitTestSetup | Step::E2eTestSetup => Policy::Auxiliary,
            _ => Policy::Fatal,
        }
    }
}

/// Everything a step may touch
#[derive(Debug, Clone)]
pub struct StepContext<'a> {
    pub config: &'a ProjectConfig,
    /// Directory the project is generated in (the project is `workspace/<name>`)
    pub workspace: PathBuf,
    pub templates: TemplateSource,
    pub runner: ProcessRunner,
}

impl<'a> StepContext<'a> {
    pub fn new(config: &'a ProjectConfig, workspace: PathBuf, templates: TemplateSource) -> Self {
        Self {
            config,
            workspace,
            templates,
            runner: ProcessRunner::new(),
        }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.config.project_dir(&self.workspace)
    }

    /// Path of a file inside the generated project
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_dir().join(relative)
    }

    /// `npx <args>` in the project directory
    fn npx<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new("npx", args).current_dir(self.project_dir())
    }

    /// `yarn <args>` in the project directory
    fn yarn<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(PACKAGE_MANAGER, args).current_dir(self.project_dir())
    }
}

/// `shadcn init` arguments
pub fn shadcn_init_args() -> Vec<String> {
    vec![SHADCN.to_string(), "init".to_string()]
}

/// `shadcn add` arguments for the given components (and flags)
pub fn shadcn_add_args(components: &[&str]) -> Vec<String> {
    let mut args = vec![SHADCN.to_string(), "add".to_string()];
    args.extend(components.iter().map(|c| c.to_string()));
    args
}

/// Hand the terminal to an interactive tool
async fn run_interactive(ctx: &StepContext<'_>, label: &str, invocation: Invocation) -> Result<()> {
    cliclack::log::step(format!("{label}\n{}", console::style(&invocation).dim()))?;
    ctx.runner
        .run(&invocation.inherit())
        .await
        .with_context(|| format!("{label} failed"))?;
    Ok(())
}

/// Run a non-interactive command behind a spinner
async fn run_quiet(
    ctx: &StepContext<'_>,
    label: &str,
    done: &str,
    invocation: Invocation,
) -> Result<ProcessOutput> {
    let spinner = cliclack::spinner();
    spinner.start(label);

    match ctx.runner.run(&invocation).await {
        Ok(output) => {
            spinner.stop(done);
            Ok(output)
        }
        Err(e) => {
            spinner.stop(format!("{label} failed"));
            Err(e).with_context(|| format!("{label} failed"))
        }
    }
}

/// Apply a template behind a spinner
async fn apply_template(ctx: &StepContext<'_>, template_name: &str, done: &str) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start(format!("Copying {template_name} template files..."));

    match copy_template_files(&ctx.templates, template_name, &ctx.project_dir()).await {
        Ok(report) => {
            spinner.stop(format!("{done} ({} files)", report.files.len()));
            if let Some(warning) = report.compatibility_warning {
                cliclack::log::warning(warning)?;
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop(format!("Failed to copy {template_name} template"));
            Err(e)
        }
    }
}

/// Patch a project file and surface rules that no longer match upstream output
async fn patch_project_file(
    ctx: &StepContext<'_>,
    relative: &str,
    rules: &[PatchRule],
) -> Result<PatchReport> {
    let report = patch::patch_file(&ctx.project_path(relative), rules).await?;
    for description in report.unmatched() {
        cliclack::log::warning(format!(
            "{relative}: could not {description} (the generated file may have changed upstream)"
        ))?;
    }
    Ok(report)
}

/// Turn a failed auxiliary sub-operation into a warning. Cancellation still propagates.
fn soften(result: Result<()>, what: &str) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if is_cancelled(&e) => Err(e),
        Err(e) => {
            cliclack::log::warning(format!("{what}: {e:#}"))?;
            Ok(())
        }
    }
}

/// Commit setup changes unless `--no-git` was given. Never fails the step.
async fn commit_changes(ctx: &StepContext<'_>, paths: &[&str], message: &str) -> Result<()> {
    if ctx.config.flags.no_git {
        cliclack::log::remark("Skipping git commit as --no-git flag was provided")?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Committing changes...");
    match git::commit(&ctx.runner, &ctx.project_dir(), paths, message).await {
        Ok(()) => spinner.stop(format!("Committed: {message}")),
        Err(e) => {
            spinner.stop(format!("Could not create git commit: {e:#}"));
            cliclack::log::remark("Git may not be initialized or installed. Continuing with setup...")?;
        }
    }
    Ok(())
}

/// Remove files or directories under `root`. Missing paths are ignored.
pub async fn remove_paths(root: &Path, paths: &[&str]) -> Result<()> {
    for relative in paths {
        let path = root.join(relative);
        let result = match fs::symlink_metadata(&path).await {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path).await,
            Ok(_) => fs::remove_file(&path).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()))
            }
        }
    }
    Ok(())
}

/// Write a generated file, creating parent directories
async fn write_project_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
