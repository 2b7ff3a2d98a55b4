//! package.json model
//!
//! The manifest is kept as an ordered JSON object so keys this tool does not
//! know about survive every rewrite untouched and in place.

use crate::core::MigrationError;
use crate::files::io;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Result of setting a key that must not silently change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryUpdate {
    /// Key was absent and has been set
    Inserted,
    /// Key already had the expected value
    Unchanged,
}

/// In-memory package manifest bound to its file
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageManifest {
    /// Parse manifest text
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self, MigrationError> {
        let path = path.into();
        let fields = io::parse_json_object(&path, contents)?;
        Ok(Self { path, fields })
    }

    /// Read the manifest from disk
    pub async fn load(path: &Path) -> Result<Self, MigrationError> {
        let contents = io::read_text(path).await?;
        Self::parse(path, &contents)
    }

    /// Write the manifest back to the file it was read from
    pub async fn save(&self) -> Result<(), MigrationError> {
        let contents = self.to_json_string()?;
        io::rewrite_text(&self.path, &contents).await
    }

    /// The package name
    pub fn name(&self) -> Result<&str, MigrationError> {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| MigrationError::MissingKey {
                path: self.path.clone(),
                key: "name".to_string(),
            })
    }

    /// Set a key, last write wins
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Set a key only if it is absent
    ///
    /// A different existing value is a `Conflict`: a human put it there and
    /// it is not ours to overwrite. Null and empty strings count as absent.
    pub fn set_if_absent(&mut self, key: &str, expected: &str) -> Result<EntryUpdate, MigrationError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::String(existing)) if existing.is_empty() => {}
            Some(Value::String(existing)) if existing == expected => {
                return Ok(EntryUpdate::Unchanged);
            }
            Some(existing) => {
                let existing = match existing {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(MigrationError::Conflict {
                    path: self.path.clone(),
                    key: key.to_string(),
                    existing,
                });
            }
        }

        self.set(key, expected);
        Ok(EntryUpdate::Inserted)
    }

    /// Serialized form, as it would be written
    pub fn to_json_string(&self) -> Result<String, MigrationError> {
        io::to_json_string(&self.path, &self.fields)
    }
}
