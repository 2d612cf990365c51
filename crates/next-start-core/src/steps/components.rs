//! Initial UI component installation

use super::{run_interactive, run_quiet, shadcn_add_args, StepContext};
use anyhow::Result;

/// Component added when the user declines the picker
pub const DEFAULT_COMPONENT: &str = "button";

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    let pick: bool = cliclack::confirm("Would you like to add components now?")
        .initial_value(false)
        .interact()?;

    if pick {
        run_interactive(ctx, "Opening the component picker", ctx.npx(shadcn_add_args(&[]))).await?;
        cliclack::log::success("Components installed")?;
    } else {
        cliclack::log::remark("Skipping the picker. You can add components later with: npx shadcn@latest add")?;
        run_quiet(
            ctx,
            "Adding the Button component...",
            "Button component added",
            ctx.npx(shadcn_add_args(&[DEFAULT_COMPONENT])),
        )
        .await?;
    }
    Ok(())
}
