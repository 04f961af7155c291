//! The monorepo root and its member packages

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{Config, GitConfig};
use crate::error::{Result, VersionControlError, WorkspaceError};
use crate::options::Options;
use crate::traits::{PackageManager, VersionControl};

use super::operation::Operation;
use super::package::Package;

/// Directory under the root that holds one subdirectory per package
pub const PACKAGES_DIR: &str = "packages";

/// A monorepo: a root directory whose `packages/` subdirectories are
/// independently versioned packages
#[derive(Clone)]
pub struct Workspace {
    root: PathBuf,
    packages_path: PathBuf,
    defaults: Options,
    git: GitConfig,
    vcs: Arc<dyn VersionControl>,
    package_manager: Arc<dyn PackageManager>,
}

impl Workspace {
    /// Create a workspace rooted at `root` with default options
    pub fn new(
        root: impl Into<PathBuf>,
        vcs: Arc<dyn VersionControl>,
        package_manager: Arc<dyn PackageManager>,
    ) -> Self {
        let root = root.into();
        let packages_path = root.join(PACKAGES_DIR);

        Self {
            root,
            packages_path,
            defaults: Options::new(),
            git: GitConfig::default(),
            vcs,
            package_manager,
        }
    }

    /// Create a workspace from loaded configuration
    pub fn from_config(
        root: impl Into<PathBuf>,
        config: &Config,
        vcs: Arc<dyn VersionControl>,
        package_manager: Arc<dyn PackageManager>,
    ) -> Self {
        Self::new(root, vcs, package_manager)
            .with_defaults(config.defaults.clone())
            .with_git(config.git.clone())
    }

    /// Replace the options every package starts from
    pub fn with_defaults(mut self, defaults: Options) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the remote and branch releases are pushed to
    pub fn with_git(mut self, git: GitConfig) -> Self {
        self.git = git;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn packages_path(&self) -> &Path {
        &self.packages_path
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    pub fn git(&self) -> &GitConfig {
        &self.git
    }

    pub fn version_control(&self) -> &Arc<dyn VersionControl> {
        &self.vcs
    }

    pub fn package_manager(&self) -> &Arc<dyn PackageManager> {
        &self.package_manager
    }

    /// Path of the member directory `name`; existence is not checked
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.packages_path.join(name)
    }

    /// Package view for the member directory `name`
    pub fn package(&self, name: &str) -> Package<'_> {
        Package::new(self, name)
    }

    /// Member directory names, sorted by file name.
    ///
    /// Plain files and symlinks are skipped. A directory whose name is not
    /// valid UTF-8 is an error.
    pub fn members(&self) -> Result<Vec<String>> {
        if !self.packages_path.is_dir() {
            return Err(WorkspaceError::PackagesDirNotFound(self.packages_path.clone()).into());
        }

        let mut members = Vec::new();
        for entry in WalkDir::new(&self.packages_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| WorkspaceError::Unreadable {
                path: self.packages_path.clone(),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_dir() {
                debug!(path = %entry.path().display(), "skipping non-directory entry");
                continue;
            }

            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| WorkspaceError::NonUtf8Name(entry.path().to_path_buf()))?;
            members.push(name.to_string());
        }

        debug!(count = members.len(), "listed members");
        Ok(members)
    }

    /// Manifest names of every member.
    ///
    /// Fails on the first missing or unparsable manifest.
    pub fn packages(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for member in self.members()? {
            let manifest = self.package(&member).read()?;
            names.insert(manifest.name()?.to_string());
        }
        Ok(names)
    }

    /// Run `operation` against every member in order, stopping at the first
    /// failure.
    ///
    /// Returns `Ok(true)` unless a package reported failure. A neutral
    /// outcome leaves the running result unchanged.
    pub fn each(&self, mut operation: Operation<'_>) -> Result<bool> {
        let members = self.members()?;
        info!(
            operation = operation.name(),
            packages = members.len(),
            "running"
        );

        let mut success = true;
        for member in &members {
            let package = self.package(member);
            let outcome = operation.run(&package)?;
            success = outcome.apply(success);
            debug!(package = %member, ?outcome, "visited");

            if !success {
                warn!(operation = operation.name(), package = %member, "stopping after failure");
                break;
            }
        }

        Ok(success)
    }

    /// Install every package
    pub fn install(&self) -> Result<bool> {
        self.each(Operation::Install)
    }

    /// Remove installed dependencies from every package
    pub fn uninstall(&self) -> Result<bool> {
        self.each(Operation::Uninstall)
    }

    /// Run every package's tests
    pub fn test(&self) -> Result<bool> {
        self.each(Operation::Test)
    }

    /// Link workspace siblings into every package
    pub fn link(&self) -> Result<bool> {
        self.each(Operation::Link)
    }

    /// Release every package
    pub fn publish(&self, options: Options) -> Result<bool> {
        self.each(Operation::Publish(options))
    }

    /// Fail when the local branch is behind the configured remote branch
    pub fn verify(&self) -> Result<()> {
        let GitConfig { remote, branch, .. } = &self.git;
        debug!(%remote, %branch, "checking remote");

        if self.vcs.is_behind_remote(remote, branch)? {
            warn!(%remote, %branch, "local branch is behind remote");
            return Err(VersionControlError::BehindRemote {
                remote: remote.clone(),
                branch: branch.clone(),
            }
            .into());
        }

        Ok(())
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("root", &self.root)
            .field("defaults", &self.defaults)
            .field("git", &self.git)
            .field("package_manager", &self.package_manager.name())
            .finish()
    }
}
