//! Remote operations

use std::path::Path;

use tracing::{debug, info, instrument};

use mono_repos_core::error::VersionControlError;

use crate::cli::{git, stderr_of};
use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Check if a remote exists
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        match self.repo.find_remote(name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) if e.code() == git2::ErrorCode::InvalidSpec => Ok(false),
            Err(e) => Err(VersionControlError::Git2(e)),
        }
    }

    /// Commits HEAD has that `refs/remotes/<remote>/<branch>` lacks, and the
    /// reverse, as `(ahead, behind)`.
    ///
    /// Uses the remote-tracking ref as it stands; call [`git_fetch`] first to
    /// refresh it.
    pub fn ahead_behind(&self, remote: &str, branch: &str) -> Result<(usize, usize)> {
        let tracking = format!("refs/remotes/{}/{}", remote, branch);
        let upstream = match self.repo.find_reference(&tracking) {
            Ok(reference) => reference.peel_to_commit()?.id(),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                return Err(VersionControlError::RemoteNotFound(format!(
                    "{}/{}",
                    remote, branch
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let local = match self.head_commit()? {
            Some(commit) => commit.id(),
            // An unborn branch lacks everything the remote has
            None => return Ok((0, 1)),
        };

        let (ahead, behind) = self.repo.graph_ahead_behind(local, upstream)?;
        debug!(remote, branch, ahead, behind, "compared with remote");
        Ok((ahead, behind))
    }
}

/// Push a branch using git CLI (works with credential helpers)
#[instrument(fields(workdir = %workdir.display()))]
pub fn git_push(workdir: &Path, remote: &str, branch: &str) -> Result<()> {
    let start = std::time::Instant::now();
    let output = git(workdir, &["push", remote, branch])?;
    info!(
        remote,
        branch,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git push (CLI)"
    );

    if !output.status.success() {
        return Err(VersionControlError::PushFailed(format!(
            "{}/{}: {}",
            remote,
            branch,
            stderr_of(&output)
        )));
    }
    Ok(())
}

/// Push all tags using git CLI
#[instrument(fields(workdir = %workdir.display()))]
pub fn git_push_tags(workdir: &Path, remote: &str) -> Result<()> {
    let start = std::time::Instant::now();
    let output = git(workdir, &["push", remote, "--tags"])?;
    info!(
        remote,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git push tags (CLI)"
    );

    if !output.status.success() {
        return Err(VersionControlError::PushFailed(format!(
            "{} --tags: {}",
            remote,
            stderr_of(&output)
        )));
    }
    Ok(())
}

/// Fetch one branch using git CLI, updating its remote-tracking ref
#[instrument(fields(workdir = %workdir.display()))]
pub fn git_fetch(workdir: &Path, remote: &str, branch: &str) -> Result<()> {
    let start = std::time::Instant::now();
    let output = git(workdir, &["fetch", remote, branch])?;
    info!(
        remote,
        branch,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git fetch (CLI)"
    );

    if !output.status.success() {
        return Err(VersionControlError::CommandFailed {
            command: format!("git fetch {} {}", remote, branch),
            reason: stderr_of(&output),
        });
    }
    Ok(())
}
