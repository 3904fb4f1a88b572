//! Changelog entry formatting and prepending.

pub mod format;
pub mod writer;

pub use format::ReleaseEntry;
pub use writer::{prepend_entry, read_changelog, write_changelog};
