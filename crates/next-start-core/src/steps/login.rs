//! Login page, part of the admin setup

use super::{apply_template, run_interactive, shadcn_add_args, StepContext};
use anyhow::Result;

pub const LOGIN_BLOCK: &str = "login-02";

pub async fn setup(ctx: &StepContext<'_>) -> Result<()> {
    run_interactive(
        ctx,
        "Installing login block",
        ctx.npx(shadcn_add_args(&[LOGIN_BLOCK, "--overwrite"])),
    )
    .await?;
    apply_template(ctx, "login", "Login template files copied").await?;
    cliclack::log::info("See AUTH_SETUP.md for wiring the login form to a real backend")?;
    Ok(())
}
