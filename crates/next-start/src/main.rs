//! next-start - interactive Next.js project scaffolding

use clap::{ArgAction, Parser};
use console::style;
use next_start_core::{Flags, RunArgs, ScaffoldError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `next_start_core=debug`)
const LOG_ENV: &str = "NEXT_START_LOG";

const CANCELLED: &str = "Operation cancelled by user";

const AFTER_HELP: &str = "\
What you get:
  - Next.js (app router, src/ dir, Tailwind CSS, ESLint) set up with Yarn
  - shadcn/ui with a client layout: navbar, footer, brand data, legal pages
  - Docker dev/prod images, compose profiles and scripts/start-docker.sh
  - --admin: sidebar dashboard, login page, user table and a mock NeDB API
  - --tests: Vitest or Jest, plus Playwright or Cypress

Examples:
  next-start
  next-start --admin --tests
  next-start -a --no-git";

#[derive(Parser, Debug)]
#[command(name = "next-start")]
#[command(about = "CLI for scaffolding Next.js projects with shadcn/ui, Docker and an optional admin dashboard")]
#[command(version, disable_version_flag = true)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Include the admin dashboard, login page, user table and mock API
    #[arg(short, long)]
    pub admin: bool,

    /// Skip the git commits made after each setup step
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Offer unit and end-to-end test framework setup
    #[arg(short, long)]
    pub tests: bool,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl From<Args> for RunArgs {
    fn from(args: Args) -> Self {
        RunArgs {
            flags: Flags {
                admin: args.admin,
                no_git: args.no_git,
                tests: args.tests,
            },
            template_dir: args.template_dir,
        }
    }
}

/// Drop arguments the CLI does not know so they are ignored rather than rejected
fn retain_known_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut kept: Vec<String> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--admin" | "-a" | "--no-git" | "--tests" | "-t" | "--help" | "-h" | "--version"
            | "-v" => kept.push(arg),
            "--template-dir" => {
                if let Some(value) = args.next() {
                    kept.push(arg);
                    kept.push(value);
                }
            }
            _ if arg.starts_with("--template-dir=") => kept.push(arg),
            _ => {}
        }
    }

    kept
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C outside a prompt (e.g. while a generator runs) is a clean exit
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        eprintln!("\n{}", style(CANCELLED).yellow());
        std::process::exit(0);
    })
    .ok();

    init_tracing();

    let args = Args::parse_from(retain_known_args(std::env::args()));
    let result = next_start_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ScaffoldError::Cancelled) => {
            eprintln!("\n{}", style(CANCELLED).yellow());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("\n{} {}", style("error:").red().bold(), err);
            ExitCode::from(err.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("next-start")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_unknown_args_are_dropped() {
        let kept = retain_known_args(argv(&["--admin", "--verbose", "extra", "-t", "-x"]));
        assert_eq!(kept, argv(&["--admin", "-t"]));
    }

    #[test]
    fn test_template_dir_keeps_its_value() {
        let kept = retain_known_args(argv(&["--template-dir", "./templates", "--no-git"]));
        assert_eq!(kept, argv(&["--template-dir", "./templates", "--no-git"]));

        let kept = retain_known_args(argv(&["--template-dir=./t"]));
        assert_eq!(kept, argv(&["--template-dir=./t"]));
    }

    #[test]
    fn test_flags_map_to_run_args() {
        let args = Args::parse_from(retain_known_args(argv(&["-a", "--no-git", "--bogus"])));
        let run: RunArgs = args.into();
        assert_eq!(
            run.flags,
            Flags {
                admin: true,
                no_git: true,
                tests: false,
            }
        );
        assert!(run.template_dir.is_none());
    }

    #[test]
    fn test_no_flags() {
        let run: RunArgs = Args::parse_from(argv(&[])).into();
        assert_eq!(run.flags, Flags::default());
    }

    #[test]
    fn test_short_v_is_version() {
        let err = Args::try_parse_from(argv(&["-v"])).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_help_exits_before_any_step() {
        for flag in ["--help", "-h"] {
            let err = Args::try_parse_from(retain_known_args(argv(&[flag, "--bogus"])))
                .unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp, "{flag}");
            assert_eq!(err.exit_code(), 0, "{flag}");
            assert!(err.to_string().contains("--no-git"));
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
