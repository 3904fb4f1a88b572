//! Destinations for per-package success records.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::atomic::write_atomic;
use crate::error::BumpError;

use super::report::BumpedPackage;

/// Default follow-up tool written into the log.
pub const DEFAULT_FOLLOW_UP_TOOL: &str = "yarn";

/// Default follow-up log path, relative to the working directory.
pub const DEFAULT_FOLLOW_UP_LOG: &str = "output.txt";

/// Receives one record per successfully bumped package.
pub trait StatusSink {
    /// Called once before the first package is touched. An error here aborts
    /// the run with every file still unchanged.
    fn prepare(&mut self) -> Result<(), BumpError> {
        Ok(())
    }

    fn record(&mut self, package: &BumpedPackage) -> Result<(), BumpError>;

    /// Called once after all packages were processed.
    fn finish(&mut self) -> Result<(), BumpError> {
        Ok(())
    }
}

/// Prints a confirmation line per package as it is bumped.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusSink for ConsoleSink<W> {
    fn record(&mut self, package: &BumpedPackage) -> Result<(), BumpError> {
        writeln!(
            self.out,
            "Updated {} from {} to {}",
            package.dir_name, package.previous, package.version
        )
        .map_err(BumpError::ConsoleFailed)
    }

    fn finish(&mut self) -> Result<(), BumpError> {
        self.out.flush().map_err(BumpError::ConsoleFailed)
    }
}

/// Collects follow-up dependency update commands and writes them to a file.
///
/// The file is truncated before any package is bumped and replaced with the
/// collected commands at the end, even when nothing was bumped, so commands
/// from an earlier run never linger.
pub struct FollowUpLog {
    path: PathBuf,
    tool: String,
    lines: Vec<String>,
}

impl FollowUpLog {
    pub fn new(path: impl Into<PathBuf>, tool: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tool: tool.into(),
            lines: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn write(&self, content: &str) -> Result<(), BumpError> {
        write_atomic(&self.path, content).map_err(|e| BumpError::OutputFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl StatusSink for FollowUpLog {
    fn prepare(&mut self) -> Result<(), BumpError> {
        self.write("")
    }

    fn record(&mut self, package: &BumpedPackage) -> Result<(), BumpError> {
        self.lines.push(format!(
            "{} updateDeps {} {}",
            self.tool, package.base_name, package.version
        ));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), BumpError> {
        let mut content = self.lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        self.write(&content)
    }
}
