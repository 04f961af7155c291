//! Core types for mono-repos

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Tier of a version bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Major version bump (breaking changes)
    Major,
    /// Minor version bump (new features)
    Minor,
    /// Patch version bump (bug fixes)
    #[default]
    Patch,
}

impl ReleaseType {
    /// Returns the string representation of the release type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }

    /// Select a tier from a free-form release string.
    ///
    /// Matching is case-insensitive. Anything that is not `major` or `minor`,
    /// including the empty string, selects a patch release.
    pub fn from_release(release: &str) -> Self {
        match release.to_lowercase().as_str() {
            "major" => Self::Major,
            "minor" => Self::Minor,
            _ => Self::Patch,
        }
    }
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReleaseType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(VersionError::InvalidReleaseType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_release_type_from_str() {
        assert_eq!(ReleaseType::from_str("major").unwrap(), ReleaseType::Major);
        assert_eq!(ReleaseType::from_str("MINOR").unwrap(), ReleaseType::Minor);
        assert_eq!(ReleaseType::from_str("patch").unwrap(), ReleaseType::Patch);
        assert!(ReleaseType::from_str("invalid").is_err());
    }

    #[test]
    fn test_from_release_is_lenient() {
        assert_eq!(ReleaseType::from_release("Major"), ReleaseType::Major);
        assert_eq!(ReleaseType::from_release("minor"), ReleaseType::Minor);
        assert_eq!(ReleaseType::from_release(""), ReleaseType::Patch);
        assert_eq!(ReleaseType::from_release("prerelease"), ReleaseType::Patch);
    }
}
