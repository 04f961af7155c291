//! Configuration types

use serde::{Deserialize, Serialize};

use crate::options::Options;

/// Main configuration for mono-repos
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Git configuration
    pub git: GitConfig,

    /// npm configuration
    pub npm: NpmConfig,

    /// Default options handed to every package
    pub defaults: Options,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote to push releases to
    pub remote: String,

    /// Branch to push releases to
    pub branch: String,

    /// Refuse to publish when the local branch is behind the remote
    pub verify: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "master".to_string(),
            verify: false,
        }
    }
}

/// npm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpmConfig {
    /// Program to invoke
    pub program: String,

    /// Registry URL to publish to (npm default if None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    /// Access level for published packages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<PublishAccess>,

    /// Dist-tag to publish under (e.g., "latest", "next")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            registry: None,
            access: None,
            tag: None,
        }
    }
}

/// Access level for published packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishAccess {
    /// Public package (anyone can install)
    #[default]
    Public,
    /// Restricted/private package
    Restricted,
}

impl std::fmt::Display for PublishAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Restricted => write!(f, "restricted"),
        }
    }
}
