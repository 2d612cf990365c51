//! Admin dashboard: sidebar shell, login page, user table and mock API

use super::{
    apply_template, commit_changes, form_table, login, remove_paths, run_interactive,
    shadcn_add_args, StepContext,
};
use anyhow::{Context, Result};

pub const SIDEBAR_BLOCK: &str = "sidebar-07";

/// Demo route the sidebar block generates; the admin template replaces it
pub const GENERATED_DASHBOARD: &str = "src/app/dashboard";

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    run_interactive(
        ctx,
        "Installing admin sidebar",
        ctx.npx(shadcn_add_args(&[SIDEBAR_BLOCK, "--overwrite"])),
    )
    .await?;

    remove_paths(&ctx.project_dir(), &[GENERATED_DASHBOARD])
        .await
        .context("Failed to remove the generated dashboard route")?;
    apply_template(ctx, "admin", "Admin template files copied").await?;

    login::setup(ctx).await.context("Login setup failed")?;
    form_table::setup(ctx).await.context("Form and table setup failed")?;

    cliclack::log::success("Admin dashboard ready at /admin")?;
    commit_changes(ctx, &[], "feat: add admin dashboard").await
}
