//! Error types for mono-repos

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using MonoError
pub type Result<T> = std::result::Result<T, MonoError>;

/// Main error type for mono-repos operations
#[derive(Debug, Error)]
pub enum MonoError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Workspace layout errors
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Manifest read/write errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Version-control errors
    #[error(transparent)]
    VersionControl(#[from] VersionControlError),

    /// Package-manager errors
    #[error(transparent)]
    PackageManager(#[from] PackageManagerError),

    /// Filesystem errors
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors about the shape of the monorepo on disk
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The packages directory does not exist
    #[error("Packages directory not found at {0}")]
    PackagesDirNotFound(PathBuf),

    /// The packages directory could not be listed
    #[error("Failed to list packages in {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// A member directory name is not valid UTF-8
    #[error("Package directory name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
}

/// Manifest (package.json) errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Package manifest not found at {0}")]
    NotFound(PathBuf),

    /// Manifest could not be read
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON or not a JSON object
    #[error("Failed to parse manifest {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A required field is absent or has the wrong type
    #[error("Manifest {path} has no string field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },

    /// Manifest could not be written
    #[error("Failed to write manifest {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version is not three dot-separated non-negative integers
    #[error("Invalid version format '{0}': expected MAJOR.MINOR.PATCH")]
    InvalidFormat(String),

    /// Unknown release type in strict parsing
    #[error("Invalid release type: {0}")]
    InvalidReleaseType(String),
}

/// Version-control errors
#[derive(Debug, Error)]
pub enum VersionControlError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Path to stage does not exist
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Path lies outside the repository working tree
    #[error("Path is outside the repository: {0}")]
    OutsideRepository(PathBuf),

    /// Nothing staged under the commit scope
    #[error("Nothing to commit under {0}")]
    NothingToCommit(PathBuf),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Local branch is behind its remote counterpart
    #[error("Local branch is behind {remote}/{branch}; pull before releasing")]
    BehindRemote { remote: String, branch: String },

    /// Command execution failed
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Package-manager errors
#[derive(Debug, Error)]
pub enum PackageManagerError {
    /// The package manager could not be started
    #[error("Failed to run {command}: {reason}")]
    Spawn { command: String, reason: String },

    /// The package manager exited unsuccessfully
    #[error("Command failed: {command} - {reason}")]
    CommandFailed { command: String, reason: String },

    /// A named script exited unsuccessfully
    #[error("Script '{script}' failed: {reason}")]
    ScriptFailed { script: String, reason: String },

    /// Linking to a sibling failed
    #[error("Failed to link {name}: {reason}")]
    LinkFailed { name: String, reason: String },

    /// Publish failed
    #[error("Failed to publish package: {0}")]
    PublishFailed(String),
}

/// Filesystem errors
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// Recursive directory removal failed
    #[error("Failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
