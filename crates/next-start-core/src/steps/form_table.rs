//! User management table, forms and the mock API, part of the admin setup

use super::{
    apply_template, patch_project_file, run_interactive, shadcn_add_args, write_project_file,
    StepContext,
};
use crate::patch::PatchRule;
use anyhow::Result;

/// Runtime packages the table and mock API import
pub const DEPENDENCIES: &[&str] = &["use-debounce", "@tanstack/react-table", "nedb", "bcrypt"];

/// Type packages for the runtime dependencies
pub const DEV_DEPENDENCIES: &[&str] = &["@types/nedb", "@types/bcrypt"];

/// shadcn components used by the forms, dialogs and table
pub const COMPONENTS: &[&str] = &[
    "form",
    "popover",
    "badge",
    "dialog",
    "scroll-area",
    "select",
    "table",
    "checkbox",
    "command",
    "calendar",
    "sonner",
];

/// API base URL for `next dev` outside Docker
pub const LOCAL_ENV: &str = "BASE_URL=http://localhost:3000/api\n";

/// Mount the sonner `Toaster` in the root layout
pub fn toaster_rules() -> Vec<PatchRule> {
    vec![
        PatchRule::literal(
            "import Toaster",
            "import \"./globals.css\";",
            "import \"./globals.css\";\nimport { Toaster } from \"@/components/ui/sonner\";",
        )
        .unless_contains("@/components/ui/sonner"),
        PatchRule::literal(
            "render Toaster",
            "{children}",
            "{children}\n        <Toaster richColors />",
        )
        .unless_contains("<Toaster"),
    ]
}

pub fn add_args(packages: &[&str], dev: bool) -> Vec<String> {
    let mut args = vec!["add".to_string()];
    if dev {
        args.push("--dev".to_string());
    }
    args.extend(packages.iter().map(|p| p.to_string()));
    args
}

pub async fn setup(ctx: &StepContext<'_>) -> Result<()> {
    run_interactive(ctx, "Installing table and API dependencies", ctx.yarn(add_args(DEPENDENCIES, false)))
        .await?;
    run_interactive(ctx, "Installing type definitions", ctx.yarn(add_args(DEV_DEPENDENCIES, true)))
        .await?;

    let mut components = COMPONENTS.to_vec();
    components.push("--overwrite");
    run_interactive(ctx, "Installing form and table components", ctx.npx(shadcn_add_args(&components)))
        .await?;

    write_project_file(&ctx.project_path(".env.local"), LOCAL_ENV).await?;
    patch_project_file(ctx, "src/app/layout.tsx", &toaster_rules()).await?;

    apply_template(ctx, "form-table", "Form and table template files copied").await?;
    apply_template(ctx, "mock-api", "Mock API template files copied").await?;
    Ok(())
}
