//! package.json handling
//!
//! The manifest is kept as an ordered JSON object so that rewriting it only
//! changes the fields we touch; key order and unknown fields survive a
//! load/save cycle.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ManifestError;

/// Manifest file name inside every package directory
pub const MANIFEST_FILE: &str = "package.json";

/// A parsed package.json
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
    trailing_newline: bool,
}

impl Manifest {
    /// Load package.json from path
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound(path.to_path_buf())
            } else {
                ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(path, &content)
    }

    /// Parse manifest content that was read from `path`
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let Value::Object(document) = value else {
            return Err(ManifestError::Parse {
                path: path.to_path_buf(),
                reason: "top-level value is not an object".to_string(),
            });
        };

        let manifest = Self {
            path: path.to_path_buf(),
            document,
            trailing_newline: content.ends_with('\n'),
        };

        // Every member must be identifiable by name
        manifest.name()?;
        Ok(manifest)
    }

    /// Save the manifest back to the path it was loaded from
    pub fn save(&self) -> Result<(), ManifestError> {
        self.save_to(&self.path)
    }

    /// Save the manifest to an arbitrary path
    pub fn save_to(&self, path: &Path) -> Result<(), ManifestError> {
        let mut content =
            serde_json::to_string_pretty(&self.document).map_err(|e| ManifestError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if self.trailing_newline {
            content.push('\n');
        }

        std::fs::write(path, content).map_err(|e| ManifestError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "wrote manifest");
        Ok(())
    }

    /// Path this manifest was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package name
    pub fn name(&self) -> Result<&str, ManifestError> {
        self.string_field("name")
    }

    /// Package version
    pub fn version(&self) -> Result<&str, ManifestError> {
        self.string_field("version")
    }

    /// Replace the version field, keeping its position in the document
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.document
            .insert("version".to_string(), Value::String(version.into()));
    }

    /// Names listed under `dependencies`
    pub fn dependencies(&self) -> Vec<&str> {
        self.dependency_keys("dependencies")
    }

    /// Names listed under `devDependencies`
    pub fn dev_dependencies(&self) -> Vec<&str> {
        self.dependency_keys("devDependencies")
    }

    /// De-duplicated union of `dependencies` and `devDependencies` names
    pub fn dependency_names(&self) -> BTreeSet<String> {
        self.dependencies()
            .into_iter()
            .chain(self.dev_dependencies())
            .map(str::to_string)
            .collect()
    }

    /// Look up any top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    fn string_field(&self, field: &'static str) -> Result<&str, ManifestError> {
        self.document
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| ManifestError::MissingField {
                path: self.path.clone(),
                field,
            })
    }

    fn dependency_keys(&self, field: &str) -> Vec<&str> {
        match self.document.get(field) {
            Some(Value::Object(deps)) => deps.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
