//! Package enumeration under a package root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::PackageNameError;

use super::name::PackageName;

/// Manifest file name inside each package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Changelog file name inside each package directory.
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// A package directory that follows the naming convention.
#[derive(Debug, Clone)]
pub struct PackageDir {
    pub path: PathBuf,
    pub name: PackageName,
}

impl PackageDir {
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.path.join(CHANGELOG_FILE)
    }
}

/// A directory entry found while scanning the package root.
#[derive(Debug)]
pub enum DiscoveredEntry {
    Package(PackageDir),
    /// A directory whose name does not follow the convention.
    Malformed { path: PathBuf, error: PackageNameError },
}

/// Optional set of base names restricting which packages are processed.
///
/// An empty allow-list admits every package.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    names: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn admits(&self, name: &PackageName) -> bool {
        self.names.is_empty() || self.names.contains(&name.base_name)
    }

    /// Entries that never matched any of the given packages, sorted.
    pub fn unmatched(&self, seen: &HashSet<String>) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| !seen.contains(*name))
            .collect();
        missing.sort_unstable();
        missing
    }
}

/// List the directories directly under `root`, sorted by name.
///
/// Plain files are ignored. Directory names that don't split into
/// `<scope>-<baseName>` are returned as [`DiscoveredEntry::Malformed`] so the
/// caller can report them.
pub fn discover_packages(root: &Path) -> std::io::Result<Vec<DiscoveredEntry>> {
    let mut dirs = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            debug!(path = %path.display(), "Skipping non-directory");
            continue;
        }
        dirs.push(path);
    }

    dirs.sort();

    let entries = dirs
        .into_iter()
        .map(|path| {
            let dir_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match PackageName::parse(&dir_name) {
                Ok(name) => DiscoveredEntry::Package(PackageDir { path, name }),
                Err(error) => {
                    warn!(dir = %dir_name, "{}", error);
                    DiscoveredEntry::Malformed { path, error }
                }
            }
        })
        .collect();

    Ok(entries)
}
