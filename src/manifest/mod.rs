//! package.json loading and in-place version updates.
//!
//! The manifest is held as an insertion-ordered JSON map so unknown fields
//! and their order survive a rewrite untouched. Only `version` is typed.

use std::path::{Path, PathBuf};

use semver::Version;
use serde_json::{Map, Value};

use crate::atomic::write_atomic;
use crate::error::ManifestError;
use crate::version::parse_version;

/// A loaded package.json.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest content; `path` is used for error reporting and saving.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ManifestError::InvalidJson {
                path: path.to_path_buf(),
                source: e,
            })?;

        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `name` field, if present.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// The current `version` as semver.
    pub fn version(&self) -> Result<Version, ManifestError> {
        let raw = self
            .fields
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| ManifestError::MissingVersion {
                path: self.path.clone(),
            })?;

        parse_version(raw).map_err(|e| ManifestError::InvalidVersion {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Overwrite the `version` field, keeping its position in the object.
    pub fn set_version(&mut self, version: &Version) {
        self.fields
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        let output = serde_json::to_string_pretty(&self.fields).map_err(|e| {
            ManifestError::SerializeFailed {
                path: self.path.clone(),
                source: e,
            }
        })?;

        // npm uses trailing newline
        Ok(format!("{}\n", output))
    }

    /// Write the manifest back to the path it was loaded from.
    pub fn save(&self) -> Result<(), ManifestError> {
        let output = self.to_json_string()?;
        write_atomic(&self.path, &output).map_err(|e| ManifestError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}
