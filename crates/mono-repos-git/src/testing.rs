//! Throwaway repositories for tests

use std::path::Path;
use std::process::Command;

use git2::{IndexAddOption, Repository};
use tempfile::TempDir;

use crate::repository::GitRepo;

/// Initialise a repository with an identity and one commit containing
/// `README.md`
pub(crate) fn init_repo() -> (TempDir, GitRepo) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    std::fs::write(temp.path().join("README.md"), "# monorepo\n").unwrap();
    commit_all(&repo, "Initial commit");

    let git_repo = GitRepo::open(temp.path()).unwrap();
    (temp, git_repo)
}

/// Stage everything in the working tree and commit it
pub(crate) fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = repo.signature().unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Write `content` to `relative` under `root`, creating parent directories
pub(crate) fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Whether a `git` executable can be run
pub(crate) fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create a bare repository and register it as `origin` of `repo`
pub(crate) fn add_bare_origin(repo: &Repository) -> TempDir {
    let remote = TempDir::new().unwrap();
    Repository::init_bare(remote.path()).unwrap();
    repo.remote("origin", remote.path().to_str().unwrap())
        .unwrap();
    remote
}
