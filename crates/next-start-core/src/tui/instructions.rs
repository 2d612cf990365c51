//! What to do once the project is generated

use crate::config::ProjectConfig;
use crate::steps::infra::START_SCRIPT;
use crate::steps::RunSummary;
use anyhow::Result;
use console::style;

/// Command that strips the mock backend out of an admin project
pub const REMOVE_MOCK_BACKEND: &str =
    r#"rm -rf "src/app/(server)" "data.db" && yarn remove bcrypt nedb @types/bcrypt @types/nedb"#;

/// Next steps for the generated project, in the order they should be read
pub fn next_steps(config: &ProjectConfig) -> Vec<String> {
    let mut steps = vec![
        format!("cd {}", config.name),
        "yarn dev".to_string(),
        format!("Run it in Docker: ./{START_SCRIPT}"),
        "Or use docker-compose directly: docker-compose --profile dev up (prod: --profile prod)"
            .to_string(),
        "Edit src/data/routes to change the navbar, footer and admin routes".to_string(),
        "Edit src/data/brand.ts to set the project name, logo and contact details".to_string(),
    ];

    if config.flags.admin {
        steps.push(format!("Remove the mock backend when you have a real API: {REMOVE_MOCK_BACKEND}"));
    }

    steps
}

pub(crate) fn print_next_steps(config: &ProjectConfig, summary: &RunSummary) -> Result<()> {
    let warnings: Vec<_> = summary.warnings().collect();
    if !warnings.is_empty() {
        cliclack::log::warning(
            warnings
                .iter()
                .map(|(step, message)| format!("{step}: {message}"))
                .collect::<Vec<_>>()
                .join("\n"),
        )?;
    }

    cliclack::log::success(format!("Project {} is ready!", style(&config.name).bold()))?;

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in next_steps(config).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();

    cliclack::outro("Happy coding!")?;

    Ok(())
}
