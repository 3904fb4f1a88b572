//! Prepend release entries to an existing changelog.

use std::path::Path;

use crate::atomic::write_atomic;
use crate::error::ChangelogError;

use super::format::ReleaseEntry;

/// Read the current changelog content.
///
/// The file must exist: a package without a changelog is an error, not a
/// fresh changelog.
pub fn read_changelog(path: &Path) -> Result<String, ChangelogError> {
    std::fs::read_to_string(path).map_err(|e| ChangelogError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Build the new changelog content: the entry block followed by the
/// existing content, unchanged.
///
/// The block uses CRLF line endings when the existing content does.
pub fn prepend_entry(existing: &str, entry: &ReleaseEntry<'_>) -> String {
    let newline = if existing.contains("\r\n") { "\r\n" } else { "\n" };

    let mut content = entry.render(newline);
    content.push_str(existing);
    content
}

/// Persist changelog content.
pub fn write_changelog(path: &Path, content: &str) -> Result<(), ChangelogError> {
    write_atomic(path, content).map_err(|e| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
