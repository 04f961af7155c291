//! `VersionControl` backed by a git working tree

use std::path::{Path, PathBuf};

use git2::IndexAddOption;
use tracing::{debug, info, instrument, warn};

use mono_repos_core::error::VersionControlError;
use mono_repos_core::traits::VersionControl;

use crate::cli::git_commit;
use crate::remote::{git_fetch, git_push, git_push_tags};
use crate::repository::{GitRepo, Result};

/// Git client used by the release pipeline.
///
/// The repository containing `path` is discovered on every call;
/// `git2::Repository` is not `Sync` and the pipeline touches git only a
/// handful of times per package. Commands that never reach git work outside
/// a repository.
#[derive(Debug, Clone)]
pub struct GitClient {
    path: PathBuf,
}

impl GitClient {
    /// Client for the repository containing `path`, located lazily
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the repository containing `path` now
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = GitRepo::discover(path)?;
        let workdir = repo.workdir()?.to_path_buf();
        debug!(workdir = %workdir.display(), "using git repository");
        Ok(Self { path: workdir })
    }

    /// Path the repository is searched from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<GitRepo> {
        GitRepo::discover(&self.path)
    }
}

impl VersionControl for GitClient {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn stage(&self, path: &Path) -> std::result::Result<(), VersionControlError> {
        let repo = self.open()?;
        let spec = repo.pathspec(path)?;
        let spec = if spec.is_empty() { "*".to_string() } else { spec };

        let mut index = repo.inner().index()?;
        index.add_all([spec.as_str()], IndexAddOption::DEFAULT, None)?;
        index.update_all([spec.as_str()], None)?;
        index.write()?;

        debug!(pathspec = %spec, "staged");
        Ok(())
    }

    /// Commit `scope` with git CLI so repository hooks run; a hook
    /// rejection is an error. Staged changes outside `scope` stay staged.
    #[instrument(skip(self, message), fields(scope = %scope.display()))]
    fn commit(&self, message: &str, scope: &Path) -> std::result::Result<(), VersionControlError> {
        let repo = self.open()?;
        let spec = repo.pathspec(scope)?;
        git_commit(repo.workdir()?, message, &spec)?;

        if let Some(head) = repo.head_commit()? {
            info!(commit = %head.id(), pathspec = %spec, "committed");
        }
        Ok(())
    }

    fn tag(&self, name: &str, message: &str) -> std::result::Result<(), VersionControlError> {
        self.open()?.create_tag(name, message).map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> std::result::Result<(), VersionControlError> {
        let repo = self.open()?;
        if let Some(current) = repo.current_branch()? {
            if current != branch {
                warn!(current = %current, target = %branch, "pushing a branch other than the checked-out one");
            }
        }
        git_push(repo.workdir()?, remote, branch)
    }

    fn push_tags(&self, remote: &str) -> std::result::Result<(), VersionControlError> {
        let repo = self.open()?;
        git_push_tags(repo.workdir()?, remote)
    }

    #[instrument(skip(self))]
    fn is_behind_remote(
        &self,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<bool, VersionControlError> {
        let repo = self.open()?;
        if !repo.has_remote(remote)? {
            return Err(VersionControlError::RemoteNotFound(remote.to_string()));
        }

        git_fetch(repo.workdir()?, remote, branch)?;
        let (_, behind) = repo.ahead_behind(remote, branch)?;
        Ok(behind > 0)
    }
}
