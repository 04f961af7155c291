//! Collaborator traits
//!
//! The release pipeline and the linking pass talk to version control and to
//! the package manager only through these traits.

use std::path::Path;

use crate::error::{PackageManagerError, VersionControlError};

/// Version-control operations needed by the release pipeline
pub trait VersionControl: Send + Sync {
    /// Stage every change under `path`
    fn stage(&self, path: &Path) -> Result<(), VersionControlError>;

    /// Commit staged changes under `scope` with `message`
    fn commit(&self, message: &str, scope: &Path) -> Result<(), VersionControlError>;

    /// Create an annotated tag at HEAD
    fn tag(&self, name: &str, message: &str) -> Result<(), VersionControlError>;

    /// Push `branch` to `remote`
    fn push(&self, remote: &str, branch: &str) -> Result<(), VersionControlError>;

    /// Push all tags to `remote`
    fn push_tags(&self, remote: &str) -> Result<(), VersionControlError>;

    /// Whether the local branch lacks commits that `remote/branch` has
    fn is_behind_remote(&self, remote: &str, branch: &str) -> Result<bool, VersionControlError>;
}

/// The package a package-manager command runs against
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    /// Package root directory
    pub dir: &'a Path,
    /// Suppress package-manager output
    pub silent: bool,
}

impl<'a> Target<'a> {
    /// Create a new target
    pub fn new(dir: &'a Path, silent: bool) -> Self {
        Self { dir, silent }
    }
}

/// Package-manager operations needed per package
pub trait PackageManager: Send + Sync {
    /// Get the package manager name (e.g., "npm")
    fn name(&self) -> &'static str;

    /// Install the package's dependencies
    fn install(&self, target: Target<'_>) -> Result<(), PackageManagerError>;

    /// Register the package so siblings can link to it
    fn register_link(&self, target: Target<'_>) -> Result<(), PackageManagerError>;

    /// Link the registered package `name` into the target
    fn link(&self, target: Target<'_>, name: &str) -> Result<(), PackageManagerError>;

    /// Run a script declared by the package
    fn run_script(&self, target: Target<'_>, script: &str) -> Result<(), PackageManagerError>;

    /// Publish the package to its registry
    fn publish(&self, target: Target<'_>) -> Result<(), PackageManagerError>;
}
