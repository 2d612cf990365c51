//! Docker infrastructure
//!
//! Copies the `infra` template, then pins the Docker images to the Node.js
//! and Yarn versions found on this machine (asking when detection fails) and
//! names the compose services after the project.

use super::{
    apply_template, commit_changes, patch_project_file, soften, write_project_file, StepContext,
};
use crate::patch::PatchRule;
use crate::runtime::check::{check_node, check_yarn, RuntimeInfo};
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_NODE_VERSION: &str = "20.11.0";
pub const DEFAULT_YARN_VERSION: &str = "1.22.22";

/// API base URL for the containers (the production service publishes 3001)
pub const DOCKER_ENV: &str = "BASE_URL=http://localhost:3001/api\n";

pub const START_SCRIPT: &str = "scripts/start-docker.sh";

/// Files the Docker commit stages
pub const INFRA_FILES: &[&str] = &[
    "Dockerfile.dev",
    "Dockerfile.prod",
    "docker-compose.yml",
    ".dockerignore",
    ".env.local",
    START_SCRIPT,
];

/// Versions baked into the Docker images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersions {
    pub node: String,
    pub yarn: String,
}

fn yarn_pin_rule(yarn: &str) -> Result<PatchRule> {
    Ok(PatchRule::regex(
        "pin Yarn version",
        r"RUN npm install -g yarn@.*",
        format!("RUN npm install -g yarn@{yarn} --force"),
    )?)
}

pub fn dockerfile_dev_rules(versions: &ToolVersions) -> Result<Vec<PatchRule>> {
    Ok(vec![
        PatchRule::regex(
            "pin Node.js image",
            r"FROM node:.*-alpine",
            format!("FROM node:{}-alpine", versions.node),
        )?,
        yarn_pin_rule(&versions.yarn)?,
    ])
}

pub fn dockerfile_prod_rules(versions: &ToolVersions) -> Result<Vec<PatchRule>> {
    Ok(vec![
        PatchRule::regex(
            "pin Node.js base image",
            r"FROM node:.*-alpine AS base",
            format!("FROM node:{}-alpine AS base", versions.node),
        )?,
        yarn_pin_rule(&versions.yarn)?,
    ])
}

/// Name both compose services, their containers and images after the project
pub fn compose_rules(project: &str) -> Vec<PatchRule> {
    ["dev", "prod"]
        .iter()
        .map(|profile| {
            let comment = if *profile == "dev" {
                "# Development service"
            } else {
                "# Production service"
            };
            PatchRule::literal(
                format!("name the {profile} service"),
                format!("  {comment}\n  app-{profile}:"),
                format!(
                    "  {comment}\n  {project}-{profile}:\n    container_name: {project}-{profile}\n    image: {project}-{profile}"
                ),
            )
            .unless_contains(format!("container_name: {project}-{profile}"))
        })
        .collect()
}

/// The production image copies `.next/standalone`, which needs standalone output
pub fn next_config_rules() -> Vec<PatchRule> {
    vec![PatchRule::literal(
        "enable standalone output",
        "const nextConfig: NextConfig = {",
        "const nextConfig: NextConfig = {\n  output: \"standalone\",",
    )
    .unless_contains("output:")]
}

/// Replace the generator's run instructions with Yarn and Docker ones
pub fn readme_rules() -> Vec<PatchRule> {
    vec![PatchRule::literal(
        "add Docker instructions",
        "```bash\nnpm run dev\n# or\nyarn dev\n# or\npnpm dev\n# or\nbun dev\n```",
        "```bash\nyarn dev\n```\n\nTo start the project using Docker (dev or prod), use the helper script:\n\n```bash\n./scripts/start-docker.sh\n```",
    )
    .unless_contains("./scripts/start-docker.sh")]
}

/// Detected version, or the answer to a prompt seeded with `default`
fn resolve_version(info: RuntimeInfo, default: &str) -> Result<String> {
    if let Some(version) = info.bare_version() {
        cliclack::log::info(format!("Detected {} {}", info.name, version))?;
        return Ok(version.to_string());
    }

    cliclack::log::warning(format!("Could not detect {} version", info.name))?;
    let version: String = cliclack::input(format!("Enter {} version to use:", info.name))
        .default_input(default)
        .interact()?;
    Ok(version.trim().to_string())
}

pub fn detect_versions() -> Result<ToolVersions> {
    Ok(ToolVersions {
        node: resolve_version(check_node(), DEFAULT_NODE_VERSION)?,
        yarn: resolve_version(check_yarn(), DEFAULT_YARN_VERSION)?,
    })
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

pub async fn run(ctx: &StepContext<'_>) -> Result<()> {
    let versions = detect_versions()?;

    apply_template(ctx, "infra", "Docker template files copied").await?;

    patch_project_file(ctx, "Dockerfile.dev", &dockerfile_dev_rules(&versions)?).await?;
    patch_project_file(ctx, "Dockerfile.prod", &dockerfile_prod_rules(&versions)?).await?;
    patch_project_file(ctx, "docker-compose.yml", &compose_rules(&ctx.config.name)).await?;
    write_project_file(&ctx.project_path(".env.local"), DOCKER_ENV).await?;

    soften(
        make_executable(&ctx.project_path(START_SCRIPT)).await,
        "Couldn't make start-docker.sh executable. Run: chmod +x scripts/start-docker.sh",
    )?;

    let next_config = async {
        patch_project_file(ctx, "next.config.ts", &next_config_rules()).await?;
        anyhow::Ok(())
    };
    soften(next_config.await, "Could not enable standalone output in next.config.ts")?;

    let mut staged = INFRA_FILES.to_vec();
    match patch_project_file(ctx, "README.md", &readme_rules()).await {
        Ok(report) if report.changed() => staged.push("README.md"),
        Ok(_) => cliclack::log::remark("README.md already contains Docker instructions")?,
        Err(e) => cliclack::log::warning(format!(
            "Could not update README.md: {e:#}\nYou may need to add the Docker instructions manually"
        ))?,
    }

    cliclack::log::success(format!(
        "Docker ready: node {} / yarn {}. Start it with ./{START_SCRIPT}",
        versions.node, versions.yarn
    ))?;
    commit_changes(ctx, &staged, "feat(docker): add Docker infrastructure").await
}
