//! mono-repos core - workspace model and release pipeline
//!
//! This crate provides the error types, configuration, manifest handling and
//! version arithmetic for the mono-repos tool, along with the `Workspace` and
//! `Package` types that drive installs, tests, links and releases through the
//! [`VersionControl`] and [`PackageManager`] traits.

pub mod config;
pub mod error;
pub mod manifest;
pub mod monorepo;
pub mod options;
pub mod traits;
pub mod types;
pub mod version;

pub use config::{Config, GitConfig, NpmConfig, PublishAccess};
pub use error::{
    ConfigError, FilesystemError, ManifestError, MonoError, PackageManagerError, Result,
    VersionControlError, VersionError, WorkspaceError,
};
pub use manifest::{Manifest, MANIFEST_FILE};
pub use monorepo::{Operation, Outcome, Package, Workspace, PACKAGES_DIR};
pub use options::Options;
pub use traits::{PackageManager, Target, VersionControl};
pub use types::ReleaseType;
pub use version::bump;
