//! Version bump pipeline.
//!
//! Walks the package root, bumps each matching package's manifest version and
//! prepends a release entry to its changelog. Packages are processed one at
//! a time; a failure in one package is recorded and the run moves on. There
//! is no rollback across packages.

pub mod report;
pub mod sink;

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::changelog::{prepend_entry, read_changelog, write_changelog, ReleaseEntry};
use crate::error::{BumpError, ChangelogError, VersionError};
use crate::manifest::Manifest;
use crate::package::{discover_packages, AllowList, DiscoveredEntry, PackageDir};
use crate::version::{apply_bump, BumpType};

pub use report::{BumpReport, BumpedPackage, PackageOutcome};
pub use sink::{ConsoleSink, FollowUpLog, StatusSink};

/// Where the increment kind comes from.
#[derive(Debug, Clone)]
pub enum IncrementSource {
    /// Always the same kind.
    Fixed(BumpType),
    /// Caller-supplied text, validated for each package.
    Requested(String),
}

impl IncrementSource {
    pub fn resolve(&self) -> Result<BumpType, VersionError> {
        match self {
            Self::Fixed(bump) => Ok(*bump),
            Self::Requested(raw) => raw.parse(),
        }
    }
}

/// Configuration for a bump run, derived from CLI arguments.
#[derive(Debug, Clone)]
pub struct BumpConfig {
    pub package_dir: PathBuf,
    pub increment: IncrementSource,
    pub header: String,
    pub message: String,
    pub allow_list: AllowList,
    /// Date written into the changelog heading.
    pub date: NaiveDate,
}

/// Run the bump over every package under `config.package_dir`.
///
/// Only an unreadable package root or a failing status sink abort the run.
/// Both are checked before the first package is touched. Everything else
/// ends up as a [`PackageOutcome`] in the report.
pub fn run_bump(
    config: &BumpConfig,
    sink: &mut dyn StatusSink,
) -> Result<BumpReport, BumpError> {
    let entries =
        discover_packages(&config.package_dir).map_err(|e| BumpError::PackageDirUnreadable {
            path: config.package_dir.clone(),
            source: e,
        })?;

    sink.prepare()?;

    let mut report = BumpReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for entry in entries {
        let package = match entry {
            DiscoveredEntry::Package(package) => package,
            DiscoveredEntry::Malformed { path, error } => {
                report.push(PackageOutcome::Skipped {
                    dir: path,
                    reason: error.to_string(),
                });
                continue;
            }
        };

        if !config.allow_list.admits(&package.name) {
            debug!(package = %package.name, "Not in allow-list, skipping");
            continue;
        }
        seen.insert(package.name.base_name.clone());

        match bump_package(&package, config) {
            Ok(bumped) => {
                info!(
                    package = %package.name,
                    from = %bumped.previous,
                    to = %bumped.version,
                    "Bumped package"
                );
                sink.record(&bumped)?;
                report.push(PackageOutcome::Bumped(bumped));
            }
            Err(error) => {
                let manifest_written = manifest_was_written(&error);
                debug!(package = %package.name, %error, manifest_written, "Skipping package");
                report.push(PackageOutcome::Failed {
                    dir: package.path,
                    manifest_written,
                    error,
                });
            }
        }
    }

    for name in config.allow_list.unmatched(&seen) {
        warn!("No package matches '{}'", name);
    }

    sink.finish()?;

    Ok(report)
}

/// Bump one package.
///
/// Everything is read and computed before the first write, so an invalid
/// increment kind, a bad manifest or a missing changelog leave both files
/// untouched.
pub fn bump_package(package: &PackageDir, config: &BumpConfig) -> Result<BumpedPackage, BumpError> {
    let bump = config.increment.resolve()?;

    let mut manifest = Manifest::load(&package.manifest_path())?;
    let previous = manifest.version()?;
    let version = apply_bump(&previous, bump)?;

    let changelog_path = package.changelog_path();
    let existing = read_changelog(&changelog_path)?;
    let entry = ReleaseEntry {
        version: &version,
        date: config.date,
        header: &config.header,
        message: &config.message,
    };
    let updated = prepend_entry(&existing, &entry);

    manifest.set_version(&version);
    manifest.save()?;
    write_changelog(&changelog_path, &updated)?;

    Ok(BumpedPackage {
        dir: package.path.clone(),
        dir_name: package.name.dir_name(),
        base_name: package.name.base_name.clone(),
        bump,
        previous,
        version,
    })
}

/// Whether `bump_package` failed after the manifest was already saved.
///
/// The changelog write is the only step after the manifest save.
fn manifest_was_written(error: &BumpError) -> bool {
    matches!(error, BumpError::Changelog(ChangelogError::WriteFailed { .. }))
}
