//! File read/write primitives with uniform error wrapping

use crate::core::MigrationError;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Read a UTF-8 text file
///
/// A missing file is reported as `MissingFile` so the user knows to create it.
pub async fn read_text(path: &Path) -> Result<String, MigrationError> {
    fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            MigrationError::MissingFile(path.to_path_buf())
        } else {
            MigrationError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Append text to an existing file
pub async fn append_text(path: &Path, content: &str) -> Result<(), MigrationError> {
    let write_err = |source| MigrationError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .await
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    debug!("Appended {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Replace the whole content of a file
///
/// The file is truncated first and then written, so no stale trailing bytes
/// survive a shorter rewrite.
pub async fn rewrite_text(path: &Path, content: &str) -> Result<(), MigrationError> {
    let write_err = |source| MigrationError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    debug!("Rewrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Parse JSON text as an object, keeping key order
pub fn parse_json_object(path: &Path, contents: &str) -> Result<Map<String, Value>, MigrationError> {
    serde_json::from_str(contents).map_err(|source| MigrationError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize an object with two-space indentation and no trailing newline
pub fn to_json_string(path: &Path, object: &Map<String, Value>) -> Result<String, MigrationError> {
    serde_json::to_string_pretty(object).map_err(|source| MigrationError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}
