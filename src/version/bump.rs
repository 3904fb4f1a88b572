//! Semver increment rules.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::Serialize;

use crate::error::VersionError;

/// Type of version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = VersionError;

    /// Matching is exact: `Minor` or `patchwork` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(VersionError::UnknownBumpType(s.to_string())),
        }
    }
}

/// Parse a version string from a manifest.
pub fn parse_version(raw: &str) -> Result<Version, VersionError> {
    Version::parse(raw.trim()).map_err(|e| VersionError::ParseFailed(raw.to_string(), e))
}

/// Apply a bump to a version.
///
/// Increments the requested component and resets every lower component to
/// zero. Pre-release and build metadata are dropped, so the result is always
/// a plain `MAJOR.MINOR.PATCH` strictly greater than the input.
pub fn apply_bump(version: &Version, bump: BumpType) -> Result<Version, VersionError> {
    let overflow = || VersionError::Overflow {
        version: version.to_string(),
        bump: bump.to_string(),
    };

    let next = match bump {
        BumpType::Major => Version::new(version.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        BumpType::Minor => Version::new(
            version.major,
            version.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        BumpType::Patch => Version::new(
            version.major,
            version.minor,
            version.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };

    Ok(next)
}
