//! Package naming and discovery.

pub mod discovery;
pub mod name;

pub use discovery::{
    discover_packages, AllowList, DiscoveredEntry, PackageDir, CHANGELOG_FILE, MANIFEST_FILE,
};
pub use name::PackageName;
