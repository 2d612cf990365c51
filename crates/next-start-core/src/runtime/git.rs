//! Git operations on the generated project

use crate::runtime::process::{Invocation, ProcessRunner};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Whether `dir` is inside a git work tree
pub async fn is_work_tree(runner: &ProcessRunner, dir: &Path) -> bool {
    runner
        .run(&Invocation::new("git", ["rev-parse", "--is-inside-work-tree"]).current_dir(dir))
        .await
        .is_ok()
}

/// `git add` arguments; no paths means everything
fn add_args(paths: &[&str]) -> Vec<String> {
    let mut args = vec!["add".to_string()];
    if paths.is_empty() {
        args.push(".".to_string());
    } else {
        args.extend(paths.iter().map(|p| p.to_string()));
    }
    args
}

/// Stage `paths` (or everything) and commit with `message`
pub async fn commit(runner: &ProcessRunner, dir: &Path, paths: &[&str], message: &str) -> Result<()> {
    if !is_work_tree(runner, dir).await {
        anyhow::bail!("{} is not a git repository", dir.display());
    }

    runner
        .run(&Invocation::new("git", add_args(paths)).current_dir(dir))
        .await
        .context("Failed to stage files")?;

    runner
        .run(&Invocation::new("git", ["commit", "-m", message]).current_dir(dir))
        .await
        .context("Failed to commit")?;

    info!(message, "created git commit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_everything_by_default() {
        assert_eq!(add_args(&[]), vec!["add", "."]);
    }

    #[test]
    fn test_add_specific_paths() {
        assert_eq!(
            add_args(&["Dockerfile.dev", "scripts/start-docker.sh"]),
            vec!["add", "Dockerfile.dev", "scripts/start-docker.sh"]
        );
    }

    #[tokio::test]
    async fn test_commit_outside_repository_fails() {
        let temp = TempDir::new().unwrap();
        let runner = ProcessRunner::new();
        let result = commit(&runner, temp.path(), &[], "feat: nothing").await;
        assert!(result.is_err());
    }
}
