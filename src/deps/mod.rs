//! Propagate a released version to packages that depend on it.
//!
//! After a release, every package under the packages root that lists the
//! released package in `devDependencies` or `peerDependencies` gets its range
//! moved to `^<version>`. Ranges that are not caret, tilde or bare versions
//! (`workspace:*`, `file:..`, git URLs) are left alone.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex_lite::Regex;
use semver::Version;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::DepsError;
use crate::manifest::Manifest;
use crate::package::MANIFEST_FILE;

/// Default scope prefix turning a base name into an npm package name.
pub const DEFAULT_SCOPE_PREFIX: &str = "@xchainjs/xchain-";

/// Dependency sections that are rewritten.
pub const SECTIONS: [&str; 2] = ["devDependencies", "peerDependencies"];

static COMPATIBLE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\^|~|\d)").expect("Invalid regex"));

/// Configuration for a dependency update run.
#[derive(Debug, Clone)]
pub struct UpdateDepsConfig {
    pub packages_dir: PathBuf,
    pub package_name: String,
    pub version: Version,
    /// Use `package_name` verbatim instead of prefixing it with `scope_prefix`.
    pub full_name: bool,
    pub scope_prefix: String,
}

impl UpdateDepsConfig {
    /// The npm name of the dependency being updated.
    pub fn dependency_name(&self) -> String {
        if self.full_name {
            self.package_name.clone()
        } else {
            format!("{}{}", self.scope_prefix, self.package_name)
        }
    }
}

/// Result of checking one dependency section of one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionChange {
    Updated { from: String, to: String },
    UpToDate,
    IncompatibleSpecifier { range: String },
    NotPresent,
}

/// Per-manifest result.
#[derive(Debug, Serialize)]
pub struct ManifestUpdate {
    pub manifest: PathBuf,
    pub sections: Vec<(String, SectionChange)>,
    pub written: bool,
}

/// Outcomes of a dependency update run.
#[derive(Debug, Default, Serialize)]
pub struct DepsReport {
    pub updates: Vec<ManifestUpdate>,
    pub failures: Vec<DepsFailure>,
}

#[derive(Debug, Serialize)]
pub struct DepsFailure {
    pub manifest: PathBuf,
    pub error: String,
}

impl DepsReport {
    pub fn written(&self) -> impl Iterator<Item = &ManifestUpdate> {
        self.updates.iter().filter(|u| u.written)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Find package directories under `root`.
///
/// A directory holding a manifest is a package and is not descended into;
/// other directories are searched recursively. Results are sorted.
pub fn find_package_dirs(root: &Path) -> Result<Vec<PathBuf>, DepsError> {
    let unreadable = |e| DepsError::PackagesDirUnreadable {
        path: root.to_path_buf(),
        source: e,
    };

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut packages = Vec::new();
    for dir in dirs {
        if dir.join(MANIFEST_FILE).is_file() {
            packages.push(dir);
        } else {
            packages.extend(find_package_dirs(&dir)?);
        }
    }

    Ok(packages)
}

/// Rewrite the dependency ranges of one manifest in memory.
pub fn update_manifest(
    manifest: &mut Manifest,
    dependency: &str,
    version: &Version,
) -> Result<Vec<(String, SectionChange)>, DepsError> {
    let target = format!("^{}", version);
    let path = manifest.path().to_path_buf();
    let mut changes = Vec::with_capacity(SECTIONS.len());

    for section in SECTIONS {
        let change = match manifest.get_mut(section) {
            None => SectionChange::NotPresent,
            Some(Value::Object(deps)) => match deps.get_mut(dependency) {
                None => SectionChange::NotPresent,
                Some(Value::String(range)) => {
                    if !COMPATIBLE_RANGE.is_match(range.as_str()) {
                        SectionChange::IncompatibleSpecifier {
                            range: range.clone(),
                        }
                    } else if range.as_str() == target {
                        SectionChange::UpToDate
                    } else {
                        let from = std::mem::replace(range, target.clone());
                        SectionChange::Updated {
                            from,
                            to: target.clone(),
                        }
                    }
                }
                Some(other) => SectionChange::IncompatibleSpecifier {
                    range: other.to_string(),
                },
            },
            Some(_) => {
                return Err(DepsError::InvalidSection {
                    path,
                    section: section.to_string(),
                });
            }
        };
        changes.push((section.to_string(), change));
    }

    Ok(changes)
}

/// Update every package under the packages root.
///
/// A manifest is only rewritten when a range actually changed. A broken
/// manifest is reported and skipped.
pub fn run_update_deps(config: &UpdateDepsConfig) -> Result<DepsReport, DepsError> {
    let dependency = config.dependency_name();
    let mut report = DepsReport::default();

    for dir in find_package_dirs(&config.packages_dir)? {
        let path = dir.join(MANIFEST_FILE);
        match update_one(&path, &dependency, &config.version) {
            Ok(update) => {
                for (section, change) in &update.sections {
                    if let SectionChange::Updated { from, to } = change {
                        info!(
                            manifest = %path.display(),
                            %section,
                            "Updating {} from {} to {}",
                            dependency, from, to
                        );
                    }
                }
                report.updates.push(update);
            }
            Err(error) => {
                debug!(manifest = %path.display(), %error, "Skipping manifest");
                report.failures.push(DepsFailure {
                    manifest: path,
                    error: error.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn update_one(path: &Path, dependency: &str, version: &Version) -> Result<ManifestUpdate, DepsError> {
    let mut manifest = Manifest::load(path)?;
    let sections = update_manifest(&mut manifest, dependency, version)?;

    let written = sections
        .iter()
        .any(|(_, change)| matches!(change, SectionChange::Updated { .. }));
    if written {
        manifest.save()?;
    }

    Ok(ManifestUpdate {
        manifest: path.to_path_buf(),
        sections,
        written,
    })
}
