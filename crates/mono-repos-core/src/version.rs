//! Version bumping

use semver::Version;

use crate::error::VersionError;
use crate::types::ReleaseType;

/// Parse a plain `MAJOR.MINOR.PATCH` version.
///
/// Pre-release and build metadata are rejected, as are leading zeros.
pub fn parse(version: &str) -> Result<Version, VersionError> {
    let invalid = || VersionError::InvalidFormat(version.to_string());

    let parsed = Version::parse(version).map_err(|_| invalid())?;
    if !parsed.pre.is_empty() || !parsed.build.is_empty() {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Bump `version` to the next release.
///
/// `release` is matched case-insensitively: `major` resets minor and patch,
/// `minor` resets patch, and anything else (including `""`) bumps the patch.
pub fn bump(version: &str, release: &str) -> Result<String, VersionError> {
    let current = parse(version)?;
    let overflow = || VersionError::InvalidFormat(version.to_string());

    let next = match ReleaseType::from_release(release) {
        ReleaseType::Major => Version::new(current.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        ReleaseType::Minor => Version::new(
            current.major,
            current.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        ReleaseType::Patch => Version::new(
            current.major,
            current.minor,
            current.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };
    Ok(next.to_string())
}
