//! Version management and semver bumping.

pub mod bump;

pub use bump::{apply_bump, parse_version, BumpType};
