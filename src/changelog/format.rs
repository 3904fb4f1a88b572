//! Release block formatting.

use chrono::NaiveDate;
use semver::Version;

/// One release entry to prepend to a changelog.
#[derive(Debug, Clone)]
pub struct ReleaseEntry<'a> {
    pub version: &'a Version,
    pub date: NaiveDate,
    pub header: &'a str,
    pub message: &'a str,
}

impl ReleaseEntry<'_> {
    /// The lines of the block, each followed by a blank line:
    ///
    /// ```text
    /// # v1.3.0 (2024-01-01)
    ///
    /// ## Release
    ///
    /// - Fixed bug
    ///
    /// ```
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("# v{} ({})", self.version, self.date.format("%Y-%m-%d")),
            String::new(),
            format!("## {}", self.header),
            String::new(),
            format!("- {}", self.message),
            String::new(),
        ]
    }

    /// Render the block using `newline` as the line terminator.
    pub fn render(&self, newline: &str) -> String {
        let mut block = String::new();
        for line in self.lines() {
            block.push_str(&line);
            block.push_str(newline);
        }
        block
    }
}
