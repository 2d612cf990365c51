//! Base project generation with create-next-app

use super::{run_interactive, StepContext, PACKAGE_MANAGER};
use crate::config::ProjectConfig;
use crate::runtime::process::Invocation;
use anyhow::Result;

/// `npx` arguments for generating the base app
pub fn generator_args(config: &ProjectConfig) -> Vec<String> {
    let mut args = vec![
        config.generator_package(),
        config.name.clone(),
        format!("--use-{PACKAGE_MANAGER}"),
    ];
    args.extend(
        ["--tailwind", "--eslint", "--app", "--src-dir", "--import-alias", "@/*"]
            .iter()
            .map(|arg| arg.to_string()),
    );
    args
}

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    let invocation =
        Invocation::new("npx", generator_args(ctx.config)).current_dir(&ctx.workspace);
    run_interactive(ctx, "Creating Next.js app", invocation).await?;
    cliclack::log::success(format!("Next.js app created in ./{}", ctx.config.name))?;
    Ok(())
}
