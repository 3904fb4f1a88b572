//! Per-package outcomes of a bump run.

use std::path::PathBuf;

use semver::Version;
use serde::{Serialize, Serializer};

use crate::error::BumpError;
use crate::version::BumpType;

/// A package whose manifest and changelog were both updated.
#[derive(Debug, Clone, Serialize)]
pub struct BumpedPackage {
    pub dir: PathBuf,
    pub dir_name: String,
    pub base_name: String,
    pub bump: BumpType,
    pub previous: Version,
    pub version: Version,
}

/// What happened to one directory under the package root.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PackageOutcome {
    Bumped(BumpedPackage),
    /// Not a package (naming convention mismatch). Nothing was touched.
    Skipped { dir: PathBuf, reason: String },
    /// Processing failed. Both files are unchanged unless `manifest_written`
    /// is set, in which case the manifest carries the new version but the
    /// changelog does not.
    Failed {
        dir: PathBuf,
        manifest_written: bool,
        #[serde(serialize_with = "serialize_display")]
        error: BumpError,
    },
}

/// Outcomes of a run, in processing order.
#[derive(Debug, Default, Serialize)]
pub struct BumpReport {
    pub outcomes: Vec<PackageOutcome>,
}

impl BumpReport {
    pub fn push(&mut self, outcome: PackageOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn bumped(&self) -> impl Iterator<Item = &BumpedPackage> {
        self.outcomes.iter().filter_map(|o| match o {
            PackageOutcome::Bumped(p) => Some(p),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &BumpError)> {
        self.outcomes.iter().filter_map(|o| match o {
            PackageOutcome::Failed { dir, error, .. } => Some((dir, error)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Summary line for the user.
    pub fn summary(&self) -> String {
        let bumped = self.bumped().count();
        let failed = self.failures().count();
        let skipped = self
            .outcomes
            .iter()
            .filter(|o| matches!(o, PackageOutcome::Skipped { .. }))
            .count();

        let package_word = if bumped == 1 { "package" } else { "packages" };
        let mut summary = format!("Bumped {} {}", bumped, package_word);
        if failed > 0 {
            summary.push_str(&format!(", {} failed", failed));
        }
        if skipped > 0 {
            summary.push_str(&format!(", {} skipped", skipped));
        }
        summary
    }
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: std::fmt::Display,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersionError;

    fn bumped(name: &str) -> PackageOutcome {
        PackageOutcome::Bumped(BumpedPackage {
            dir: PathBuf::from(format!("packages/xchain-{}", name)),
            dir_name: format!("xchain-{}", name),
            base_name: name.to_string(),
            bump: BumpType::Patch,
            previous: Version::new(1, 0, 0),
            version: Version::new(1, 0, 1),
        })
    }

    #[test]
    fn test_summary_counts() {
        let mut report = BumpReport::default();
        report.push(bumped("bitcoin"));
        report.push(bumped("litecoin"));
        report.push(PackageOutcome::Failed {
            dir: PathBuf::from("packages/xchain-doge"),
            manifest_written: false,
            error: VersionError::UnknownBumpType("patchwork".into()).into(),
        });

        assert!(report.has_failures());
        assert_eq!(report.summary(), "Bumped 2 packages, 1 failed");
    }

    #[test]
    fn test_serialize_failed_outcome() {
        let outcome = PackageOutcome::Failed {
            dir: PathBuf::from("packages/xchain-doge"),
            manifest_written: false,
            error: VersionError::UnknownBumpType("patchwork".into()).into(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["manifest_written"], false);
        assert!(json["error"].as_str().unwrap().contains("patchwork"));
    }

    #[test]
    fn test_serialize_half_applied_outcome() {
        let outcome = PackageOutcome::Failed {
            dir: PathBuf::from("packages/xchain-doge"),
            manifest_written: true,
            error: crate::error::ChangelogError::WriteFailed {
                path: PathBuf::from("packages/xchain-doge/CHANGELOG.md"),
                source: std::io::Error::other("disk full"),
            }
            .into(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["manifest_written"], true);
        assert!(json["error"].as_str().unwrap().contains("CHANGELOG.md"));
    }

    #[test]
    fn test_serialize_bumped_outcome() {
        let json = serde_json::to_value(bumped("bitcoin")).unwrap();
        assert_eq!(json["status"], "bumped");
        assert_eq!(json["version"], "1.0.1");
        assert_eq!(json["bump"], "patch");
    }
}
