//! Error types for pkgbump modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing a package directory name.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PackageNameError {
    #[error("Directory name '{0}' does not follow the <scope>-<name> convention")]
    MissingSeparator(String),

    #[error("Directory name '{0}' has an empty scope or package name")]
    EmptyComponent(String),
}

/// Errors from version operations.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, #[source] semver::Error),

    #[error("Unknown version type '{0}' (expected: major, minor or patch)")]
    UnknownBumpType(String),

    #[error("Cannot bump {bump} component of {version}: value would overflow")]
    Overflow { version: String, bump: String },
}

/// Errors from manifest (package.json) operations.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest {} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("Manifest {} has no string \"version\" field", path.display())]
    MissingVersion { path: PathBuf },

    #[error("Manifest {} has an invalid version: {source}", path.display())]
    InvalidVersion {
        path: PathBuf,
        #[source]
        source: VersionError,
    },

    #[error("Failed to serialize manifest {}: {source}", path.display())]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write manifest {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read changelog {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write changelog {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the version bump pipeline.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Failed to read package directory {}: {source}", path.display())]
    PackageDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error("Failed to write status output {}: {source}", path.display())]
    OutputFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write status to console: {0}")]
    ConsoleFailed(#[source] std::io::Error),
}

/// Errors from dependency range updates.
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("Failed to read packages directory {}: {source}", path.display())]
    PackagesDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Section \"{section}\" in {} is not a JSON object", path.display())]
    InvalidSection { path: PathBuf, section: String },
}
