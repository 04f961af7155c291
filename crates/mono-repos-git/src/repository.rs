//! Git repository operations

use std::path::{Component, Path, PathBuf};

use git2::Repository;
use tracing::{debug, instrument};

use mono_repos_core::error::VersionControlError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, VersionControlError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        debug!("opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                VersionControlError::RepositoryNotFound(path.to_path_buf())
            } else {
                VersionControlError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        debug!("discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                VersionControlError::NotARepository(start_path.to_path_buf())
            } else {
                VersionControlError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the inner git2 Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Working tree root; bare repositories have none
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| VersionControlError::OpenFailed("repository has no working tree".into()))
    }

    /// Get the HEAD commit, or `None` on an unborn branch
    pub fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the current branch name; `None` when HEAD is detached
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    /// Express `path` relative to the working tree as a `/`-separated
    /// pathspec. The working tree root itself maps to an empty string.
    pub fn pathspec(&self, path: &Path) -> Result<String> {
        let absolute = path
            .canonicalize()
            .map_err(|_| VersionControlError::PathNotFound(path.to_path_buf()))?;
        let workdir = self
            .workdir()?
            .canonicalize()
            .map_err(|_| VersionControlError::PathNotFound(self.path.clone()))?;

        let relative = absolute
            .strip_prefix(&workdir)
            .map_err(|_| VersionControlError::OutsideRepository(path.to_path_buf()))?;

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        Ok(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::init_repo;
    use tempfile::TempDir;

    #[test]
    fn test_open_repo() {
        let (temp, _repo) = init_repo();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(!repo.inner().is_bare());
    }

    #[test]
    fn test_discover_repo() {
        let (temp, _repo) = init_repo();
        let subdir = temp.path().join("packages").join("foo");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // Canonicalize both paths to handle macOS /var -> /private/var symlink
        let repo_path = repo.path().canonicalize().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        assert_eq!(repo_path, temp_path);
    }

    #[test]
    fn test_not_a_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::open(temp.path());
        assert!(matches!(
            result,
            Err(VersionControlError::RepositoryNotFound(_))
        ));
    }

    #[test]
    fn test_current_branch() {
        let (_temp, repo) = init_repo();
        // Git might default to 'master' or 'main' depending on config
        assert!(repo.current_branch().unwrap().is_some());
    }

    #[test]
    fn test_pathspec() {
        let (temp, repo) = init_repo();
        let dir = temp.path().join("packages").join("foo");
        std::fs::create_dir_all(&dir).unwrap();

        assert_eq!(repo.pathspec(&dir).unwrap(), "packages/foo");
        assert_eq!(repo.pathspec(temp.path()).unwrap(), "");
        assert!(matches!(
            repo.pathspec(&temp.path().join("missing")),
            Err(VersionControlError::PathNotFound(_))
        ));

        let outside = TempDir::new().unwrap();
        assert!(matches!(
            repo.pathspec(outside.path()),
            Err(VersionControlError::OutsideRepository(_))
        ));
    }
}
