//! shadcn/ui initialization

use super::{run_interactive, shadcn_init_args, StepContext};
use anyhow::Result;

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    cliclack::log::info(
        "shadcn/ui will ask for a base color and CSS variables.\n\
         Browse themes at https://ui.shadcn.com/themes",
    )?;
    run_interactive(ctx, "Initializing shadcn/ui", ctx.npx(shadcn_init_args())).await?;
    cliclack::log::success("shadcn/ui initialized")?;
    Ok(())
}
