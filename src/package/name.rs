//! Package directory naming convention: `<scope>-<baseName>`.

use std::fmt;
use std::str::FromStr;

use crate::error::PackageNameError;

/// Separator between scope and base name.
pub const SEPARATOR: char = '-';

/// A parsed package directory name.
///
/// The name splits at the first separator only, so `xchain-thorchain-query`
/// has scope `xchain` and base name `thorchain-query`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    pub scope: String,
    pub base_name: String,
}

impl PackageName {
    pub fn parse(dir_name: &str) -> Result<Self, PackageNameError> {
        let (scope, base_name) = dir_name
            .split_once(SEPARATOR)
            .ok_or_else(|| PackageNameError::MissingSeparator(dir_name.to_string()))?;

        if scope.is_empty() || base_name.is_empty() {
            return Err(PackageNameError::EmptyComponent(dir_name.to_string()));
        }

        Ok(Self {
            scope: scope.to_string(),
            base_name: base_name.to_string(),
        })
    }

    /// The directory name this was parsed from.
    pub fn dir_name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for PackageName {
    type Err = PackageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.scope, SEPARATOR, self.base_name)
    }
}
