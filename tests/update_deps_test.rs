//! Integration tests for propagating released versions to dependents.

mod common;

use std::fs;
use std::path::PathBuf;

use pkgbump::deps::{find_package_dirs, DEFAULT_SCOPE_PREFIX};
use pkgbump::{run_update_deps, UpdateDepsConfig};
use semver::Version;

fn config(root: PathBuf, name: &str, version: Version) -> UpdateDepsConfig {
    UpdateDepsConfig {
        packages_dir: root,
        package_name: name.to_string(),
        version,
        full_name: false,
        scope_prefix: DEFAULT_SCOPE_PREFIX.to_string(),
    }
}

fn write_manifest(root: &std::path::Path, rel: &str, content: &str) -> PathBuf {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("package.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_find_package_dirs_recurses_into_groups() {
    let temp_dir = common::temp_test_dir();
    let root = temp_dir.path();
    write_manifest(root, "xchain-bitcoin", "{}");
    write_manifest(root, "evm/xchain-avax", "{}");
    // Nested packages below a package are not separate packages
    write_manifest(root, "xchain-bitcoin/fixtures/nested", "{}");
    fs::create_dir_all(root.join("empty")).unwrap();

    let dirs = find_package_dirs(root).unwrap();

    assert_eq!(
        dirs,
        vec![root.join("evm/xchain-avax"), root.join("xchain-bitcoin")]
    );
}

#[test]
fn test_updates_dependents_and_skips_unchanged() {
    let temp_dir = common::temp_test_dir();
    let root = temp_dir.path();
    let client = write_manifest(
        root,
        "xchain-client",
        r#"{"name": "client", "devDependencies": {"@xchainjs/xchain-util": "^1.0.0"}, "peerDependencies": {"@xchainjs/xchain-util": "^1.0.0"}}"#,
    );
    let unrelated_content = r#"{"name": "crypto", "devDependencies": {"bip39": "3.1.0"}}"#;
    let unrelated = write_manifest(root, "xchain-crypto", unrelated_content);

    let report = run_update_deps(&config(root.to_path_buf(), "util", Version::new(1, 1, 0))).unwrap();

    assert!(!report.has_failures());
    let written: Vec<&PathBuf> = report.written().map(|u| &u.manifest).collect();
    assert_eq!(written, vec![&client]);

    assert_eq!(
        fs::read_to_string(&client).unwrap(),
        "{\n  \"name\": \"client\",\n  \"devDependencies\": {\n    \"@xchainjs/xchain-util\": \"^1.1.0\"\n  },\n  \"peerDependencies\": {\n    \"@xchainjs/xchain-util\": \"^1.1.0\"\n  }\n}\n"
    );
    assert_eq!(fs::read_to_string(&unrelated).unwrap(), unrelated_content);
}

#[test]
fn test_full_name_and_incompatible_ranges() {
    let temp_dir = common::temp_test_dir();
    let root = temp_dir.path();
    let content = r#"{"devDependencies": {"@scope/lib": "workspace:*"}}"#;
    let path = write_manifest(root, "pkg-a", content);

    let mut cfg = config(root.to_path_buf(), "@scope/lib", Version::new(3, 0, 0));
    cfg.full_name = true;
    let report = run_update_deps(&cfg).unwrap();

    assert_eq!(report.written().count(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_broken_manifest_is_reported_and_others_continue() {
    let temp_dir = common::temp_test_dir();
    let root = temp_dir.path();
    write_manifest(root, "xchain-a", "not json");
    let good = write_manifest(
        root,
        "xchain-b",
        r#"{"devDependencies": {"@xchainjs/xchain-util": "~0.9.0"}}"#,
    );

    let report = run_update_deps(&config(root.to_path_buf(), "util", Version::new(1, 0, 0))).unwrap();

    assert!(report.has_failures());
    assert!(report.failures[0].manifest.ends_with("xchain-a/package.json"));
    assert!(fs::read_to_string(&good).unwrap().contains("\"^1.0.0\""));
}

#[test]
fn test_missing_packages_dir_is_fatal() {
    let temp_dir = common::temp_test_dir();
    let result = run_update_deps(&config(
        temp_dir.path().join("missing"),
        "util",
        Version::new(1, 0, 0),
    ));
    assert!(result.is_err());
}
