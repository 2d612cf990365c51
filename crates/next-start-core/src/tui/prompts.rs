//! Charm-style CLI prompts using cliclack

use super::instructions::print_next_steps;
use crate::config::{Flags, ProjectConfig, DEFAULT_NEXTJS_VERSION, DEFAULT_PROJECT_NAME};
use crate::error::ScaffoldError;
use crate::runtime::{check, tool, ProcessRunner};
use crate::steps::{self, StepContext};
use crate::templates::TemplateSource;
use crate::validation::{
    check_directory_exists, validate_nextjs_version, validate_project_name, ValidationError,
};
use crate::CLI_VERSION;
use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

/// Arguments for an interactive run
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub flags: Flags,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,
}

/// Whether the run should go on after the preflight checks
enum Preflight {
    Continue,
    Stop,
}

/// Run the CLI with interactive prompts
pub async fn run(args: RunArgs) -> Result<(), ScaffoldError> {
    let workspace = std::env::current_dir()
        .map_err(|e| ScaffoldError::during("Setup", e.into()))?;

    show_welcome(&args.flags).map_err(|e| ScaffoldError::during("Setup", e))?;

    // Step 1: Check Node.js, npx and Yarn
    match preflight().await.map_err(|e| ScaffoldError::during("Preflight", e))? {
        Preflight::Continue => {}
        Preflight::Stop => return Ok(()),
    }

    // Step 2: Project name and Next.js version
    let config = collect_config(&workspace, args.flags)
        .map_err(|e| ScaffoldError::during("Project details", e))?;

    // Step 3: Generate and set up the project
    let ctx = StepContext::new(&config, workspace, TemplateSource::resolve(args.template_dir));
    let ctx = &ctx;
    let plan = steps::plan(&config.flags);
    let summary = steps::drive(&plan, move |step| step.run(ctx)).await?;

    // Step 4: Show next steps
    print_next_steps(&config, &summary).map_err(|e| ScaffoldError::during("Setup", e))?;

    Ok(())
}

fn show_welcome(flags: &Flags) -> Result<()> {
    cliclack::intro(style(" Next.js Project Setup ").on_cyan().black())?;
    cliclack::log::info(format!(
        "next-start v{CLI_VERSION}\n\
         Next.js app router, Tailwind CSS, shadcn/ui and Docker in one go"
    ))?;

    let mut extras = Vec::new();
    if flags.admin {
        extras.push("admin dashboard");
    }
    if flags.tests {
        extras.push("test frameworks");
    }
    if !extras.is_empty() {
        cliclack::log::remark(format!("Including: {}", extras.join(", ")))?;
    }
    if flags.no_git {
        cliclack::log::remark("Git commits disabled (--no-git)")?;
    }
    Ok(())
}

async fn preflight() -> Result<Preflight> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let runtimes = match check::check_runtimes() {
        Ok(runtimes) => runtimes,
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes and try again.");
        }
    };

    let runtime_info: Vec<String> = runtimes
        .iter()
        .map(|r| {
            if r.available {
                format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", r.name)
            }
        })
        .collect();
    spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));

    if runtimes.iter().any(|r| r.name == "Yarn" && !r.available) {
        return handle_missing_yarn().await;
    }
    Ok(Preflight::Continue)
}

async fn handle_missing_yarn() -> Result<Preflight> {
    let tool = tool::yarn_installer();
    let name = tool.display_name;

    cliclack::log::warning(format!(
        "{name} is not installed. Generated projects are set up with {name}."
    ))?;

    let action: &str = cliclack::select("What would you like to do?")
        .item("install", format!("Install {name} automatically"), "")
        .item("docs", format!("Open documentation ({})", tool.docs_url), "")
        .item("skip", format!("Skip and continue without {name}"), "")
        .interact()?;

    match action {
        "install" => {
            cliclack::log::info(format!("This will execute: {}", tool.install_command()))?;

            let confirm: bool = cliclack::confirm("Proceed with installation?")
                .initial_value(true)
                .interact()?;

            if !confirm {
                cliclack::log::info(format!(
                    "Continuing without {name}. Refer to the docs for installation instructions: ({})",
                    tool.docs_url
                ))?;
                return Ok(Preflight::Continue);
            }

            match tool.install(&ProcessRunner::new()).await {
                Ok(info) => cliclack::log::success(format!(
                    "{name} {} installed successfully",
                    info.bare_version().unwrap_or_default()
                ))?,
                Err(e) => {
                    cliclack::log::error(format!("{}", e))?;

                    let continue_anyway: bool =
                        cliclack::confirm(format!("Continue without {name}?"))
                            .initial_value(false)
                            .interact()?;

                    if !continue_anyway {
                        return Err(ScaffoldError::Cancelled.into());
                    }
                }
            }
            Ok(Preflight::Continue)
        }
        "docs" => {
            tool.open_docs()?;
            cliclack::outro(format!("After installing {name}, run this command again."))?;
            Ok(Preflight::Stop)
        }
        _ => {
            cliclack::log::info(format!(
                "Continuing without {name}. Refer to the docs for installation instructions: ({})",
                tool.docs_url
            ))?;
            Ok(Preflight::Continue)
        }
    }
}

fn collect_config(workspace: &Path, flags: Flags) -> Result<ProjectConfig> {
    let base = workspace.to_path_buf();
    let name: String = cliclack::input("Enter the project name:")
        .placeholder(DEFAULT_PROJECT_NAME)
        .default_input(DEFAULT_PROJECT_NAME)
        .validate(move |input: &String| -> Result<(), ValidationError> {
            validate_project_name(input)?;
            check_directory_exists(&base.join(input.trim()))
        })
        .interact()?;

    let version: String = cliclack::input("Enter the Next.js version:")
        .placeholder(DEFAULT_NEXTJS_VERSION)
        .default_input(DEFAULT_NEXTJS_VERSION)
        .validate(|input: &String| validate_nextjs_version(input))
        .interact()?;

    let config = ProjectConfig::new(name.trim(), version.trim(), flags);
    cliclack::log::info(format!(
        "Creating {} with Next.js {} in {}",
        style(&config.name).bold(),
        config.framework_version,
        config.project_dir(workspace).display()
    ))?;

    Ok(config)
}
