//! pkgbump - bump package versions across a monorepo and record them in changelogs.
//!
//! # Overview
//!
//! pkgbump walks a directory of `<scope>-<name>` packages, bumps the semver
//! `version` in each `package.json`, and prepends a release entry to the
//! package's `CHANGELOG.md`. A companion command propagates a released version
//! into the dependency ranges of the other packages.

pub mod atomic;
pub mod bump;
pub mod changelog;
pub mod deps;
pub mod error;
pub mod manifest;
pub mod package;
pub mod version;

// Re-export commonly used types
pub use bump::{run_bump, BumpConfig, BumpReport, IncrementSource, PackageOutcome};
pub use deps::{run_update_deps, UpdateDepsConfig};
pub use error::{BumpError, ChangelogError, DepsError, ManifestError, PackageNameError, VersionError};
pub use manifest::Manifest;
pub use package::{AllowList, PackageName};
pub use version::BumpType;
