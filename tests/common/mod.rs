//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use pkgbump::{AllowList, BumpConfig, IncrementSource};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a manifest fixture.
pub fn manifest_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("manifests").join(name)
}

/// Get the path to a changelog fixture.
pub fn changelog_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("changelogs").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Fixed release date used by tests.
pub fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

/// A temporary package root with `<scope>-<name>` package directories.
pub struct TestPackages {
    pub dir: tempfile::TempDir,
}

impl TestPackages {
    pub fn new() -> Self {
        Self {
            dir: temp_test_dir(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Add a package with a minimal manifest and a one-entry changelog.
    pub fn add(&self, dir_name: &str, version: &str) -> PathBuf {
        let manifest = format!(
            "{{\n  \"name\": \"@xchainjs/{}\",\n  \"version\": \"{}\"\n}}\n",
            dir_name, version
        );
        let changelog = format!("# v{} (2024-01-01)\n\n## Module Initialisation\n\n- Initial release\n", version);
        self.add_raw(dir_name, Some(&manifest), Some(&changelog))
    }

    /// Add a package with arbitrary manifest and changelog content.
    pub fn add_raw(&self, dir_name: &str, manifest: Option<&str>, changelog: Option<&str>) -> PathBuf {
        let path = self.root().join(dir_name);
        fs::create_dir_all(&path).expect("Failed to create package dir");
        if let Some(manifest) = manifest {
            fs::write(path.join("package.json"), manifest).expect("Failed to write manifest");
        }
        if let Some(changelog) = changelog {
            fs::write(path.join("CHANGELOG.md"), changelog).expect("Failed to write changelog");
        }
        path
    }

    pub fn manifest(&self, dir_name: &str) -> String {
        fs::read_to_string(self.root().join(dir_name).join("package.json"))
            .expect("Failed to read manifest")
    }

    pub fn changelog(&self, dir_name: &str) -> String {
        fs::read_to_string(self.root().join(dir_name).join("CHANGELOG.md"))
            .expect("Failed to read changelog")
    }

    pub fn version(&self, dir_name: &str) -> String {
        let json: serde_json::Value =
            serde_json::from_str(&self.manifest(dir_name)).expect("Manifest is not JSON");
        json["version"].as_str().expect("No version").to_string()
    }

    /// Bump config over this root.
    pub fn config(&self, increment: IncrementSource, allow: &[&str]) -> BumpConfig {
        BumpConfig {
            package_dir: self.root().to_path_buf(),
            increment,
            header: "Release".to_string(),
            message: "Fixed bug".to_string(),
            allow_list: AllowList::new(allow.iter().copied()),
            date: release_date(),
        }
    }
}
