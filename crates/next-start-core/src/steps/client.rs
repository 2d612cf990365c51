//! Public-facing client layout
//!
//! Adds the navigation components, adjusts two generated shadcn components
//! to what the layout templates expect, lays the `client` template over the
//! project and replaces the generator's landing page.

use super::{
    apply_template, commit_changes, patch_project_file, remove_paths, run_interactive,
    shadcn_add_args, soften, StepContext,
};
use crate::patch::PatchRule;
use anyhow::{Context, Result};

/// shadcn components the client layout is built from
pub const CLIENT_COMPONENTS: &[&str] = &["accordion", "navigation-menu", "sheet"];

/// Starter SVGs shipped by create-next-app
pub const DEFAULT_SVGS: &[&str] = &[
    "public/file.svg",
    "public/globe.svg",
    "public/next.svg",
    "public/vercel.svg",
    "public/window.svg",
];

pub const ACCORDION_FILE: &str = "src/components/ui/accordion.tsx";
pub const NAVIGATION_MENU_FILE: &str = "src/components/ui/navigation-menu.tsx";
pub const LAYOUT_FILE: &str = "src/app/layout.tsx";

/// Optional `hideBorder` prop on `AccordionItem`
pub fn accordion_rules() -> Result<Vec<PatchRule>> {
    Ok(vec![
        PatchRule::regex(
            "add hideBorder prop to AccordionItem",
            r"function AccordionItem\(\{\s*className,\s*\.\.\.props\s*\}: React\.ComponentProps<typeof AccordionPrimitive\.Item>\) \{",
            "function AccordionItem({\n  className,\n  hideBorder = false,\n  ...props\n}: React.ComponentProps<typeof AccordionPrimitive.Item> & { hideBorder?: boolean }) {",
        )?
        .unless_contains("hideBorder = false"),
        PatchRule::regex(
            "make the AccordionItem border conditional",
            r#"className=\{cn\("border-b last:border-b-0", className\)\}"#,
            r#"className={cn(hideBorder ? "" : "border-b last:border-b-0", className)}"#,
        )?
        .unless_contains("hideBorder ? \"\""),
    ])
}

/// Right-align the navigation menu viewport
pub fn navigation_menu_rules() -> Vec<PatchRule> {
    vec![PatchRule::literal(
        "right-align the navigation viewport",
        "absolute top-full left-0",
        "absolute top-full right-0",
    )
    .unless_contains("absolute top-full right-0")]
}

/// Drive the root layout metadata from the brand data
pub fn layout_metadata_rules() -> Result<Vec<PatchRule>> {
    Ok(vec![
        PatchRule::literal(
            "import BRAND",
            "import \"./globals.css\";",
            "import \"./globals.css\";\nimport { BRAND } from \"@/data/brand\";",
        )
        .unless_contains("@/data/brand"),
        PatchRule::regex(
            "use BRAND in metadata",
            r"(?s)export const metadata: Metadata = \{.*?\};",
            "export const metadata: Metadata = {\n  title: BRAND.productName,\n  description: BRAND.productDescription,\n};",
        )?
        .unless_contains("BRAND.productName"),
    ])
}

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    run_interactive(
        ctx,
        "Installing client components",
        ctx.npx(shadcn_add_args(CLIENT_COMPONENTS)),
    )
    .await?;

    let accordion = async {
        patch_project_file(ctx, ACCORDION_FILE, &accordion_rules()?).await?;
        anyhow::Ok(())
    };
    soften(accordion.await, "Failed to update Accordion component")?;

    let navigation = async {
        patch_project_file(ctx, NAVIGATION_MENU_FILE, &navigation_menu_rules()).await?;
        anyhow::Ok(())
    };
    soften(navigation.await, "Failed to update Navigation Menu component")?;

    apply_template(ctx, "client", "Client template files copied").await?;

    let metadata = async {
        patch_project_file(ctx, LAYOUT_FILE, &layout_metadata_rules()?).await?;
        anyhow::Ok(())
    };
    soften(metadata.await, "Failed to update layout metadata")?;

    remove_paths(&ctx.project_dir(), &["src/app/page.tsx"])
        .await
        .context("Failed to remove the default landing page")?;
    soften(
        remove_paths(&ctx.project_dir(), DEFAULT_SVGS).await,
        "Failed to remove default SVG files",
    )?;

    cliclack::log::success("Client layout ready")?;
    commit_changes(ctx, &[], "feat: add client layout").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{apply_rules, RuleOutcome};

    const ACCORDION: &str = r#"function AccordionItem({
  className,
  ...props
}: React.ComponentProps<typeof AccordionPrimitive.Item>) {
  return (
    <AccordionPrimitive.Item
      data-slot="accordion-item"
      className={cn("border-b last:border-b-0", className)}
      {...props}
    />
  )
}
"#;

    const LAYOUT: &str = r#"import type { Metadata } from "next";
import "./globals.css";

export const metadata: Metadata = {
  title: "Create Next App",
  description: "Generated by create next app",
};
"#;

    #[test]
    fn test_accordion_gets_hide_border() {
        let rules = accordion_rules().unwrap();
        let (patched, report) = apply_rules(ACCORDION, &rules);

        assert!(patched.contains("hideBorder = false,"));
        assert!(patched.contains("& { hideBorder?: boolean }"));
        assert!(patched.contains(r#"cn(hideBorder ? "" : "border-b last:border-b-0", className)"#));
        assert_eq!(report.unmatched().count(), 0);

        let (again, report) = apply_rules(&patched, &rules);
        assert_eq!(again, patched);
        assert!(!report.changed());
    }

    #[test]
    fn test_navigation_viewport_alignment() {
        let source = r#"<div className={cn("absolute top-full left-0 isolate z-50 flex justify-center")}>"#;
        let (patched, _) = apply_rules(source, &navigation_menu_rules());
        assert!(patched.contains("absolute top-full right-0 isolate"));
        assert!(!patched.contains("left-0"));
    }

    #[test]
    fn test_layout_metadata_uses_brand() {
        let rules = layout_metadata_rules().unwrap();
        let (patched, report) = apply_rules(LAYOUT, &rules);

        assert!(patched.contains("import { BRAND } from \"@/data/brand\";"));
        assert!(patched.contains("title: BRAND.productName,"));
        assert!(patched.contains("description: BRAND.productDescription,"));
        assert!(!patched.contains("Create Next App"));
        assert_eq!(report.outcome("use BRAND in metadata"), Some(RuleOutcome::Applied));
    }

    #[test]
    fn test_changed_upstream_layout_is_unmatched() {
        let rules = layout_metadata_rules().unwrap();
        let (patched, report) = apply_rules("export default function Layout() {}\n", &rules);
        assert_eq!(patched, "export default function Layout() {}\n");
        assert_eq!(report.unmatched().count(), 2);
    }
}
