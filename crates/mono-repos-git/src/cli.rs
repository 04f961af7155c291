//! Thin wrappers over the `git` executable

use std::path::Path;
use std::process::{Command, Output};

use tracing::{info, instrument};

use mono_repos_core::error::VersionControlError;

use crate::repository::Result;

/// Output fragments git prints when a commit would be empty
const EMPTY_COMMIT_MARKERS: &[&str] = &[
    "nothing to commit",
    "nothing added to commit",
    "no changes added to commit",
    "did not match any file",
];

/// Run `git` with `args` inside `workdir`
pub(crate) fn git(workdir: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .args(args)
        .current_dir(workdir)
        .env("LC_ALL", "C")
        .output()
        .map_err(|e| VersionControlError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            reason: e.to_string(),
        })
}

pub(crate) fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Commit using git CLI so `pre-commit` and `commit-msg` hooks run.
///
/// With a non-empty `pathspec` only paths under it are committed
/// (`git commit --only`); staged changes elsewhere stay staged. An empty
/// pathspec commits the whole index.
#[instrument(skip(message), fields(workdir = %workdir.display()))]
pub fn git_commit(workdir: &Path, message: &str, pathspec: &str) -> Result<()> {
    let mut args = vec!["commit", "-m", message];
    if !pathspec.is_empty() {
        args.extend(["--only", "--", pathspec]);
    }

    let start = std::time::Instant::now();
    let output = git(workdir, &args)?;
    info!(
        pathspec,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git commit (CLI)"
    );

    if output.status.success() {
        return Ok(());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = stderr_of(&output);
    if EMPTY_COMMIT_MARKERS
        .iter()
        .any(|marker| stdout.contains(marker) || stderr.contains(marker))
    {
        return Err(VersionControlError::NothingToCommit(workdir.join(pathspec)));
    }

    let reason = if stderr.is_empty() {
        stdout.trim().to_string()
    } else {
        stderr
    };
    Err(VersionControlError::CommandFailed {
        command: "git commit".to_string(),
        reason,
    })
}
