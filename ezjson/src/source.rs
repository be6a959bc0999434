//! Batch load records.
//!
//! A batch is an ordered list of `{ "name": ..., "path": ... }` records. The
//! whole list is validated before anything is loaded.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{RegistryError, Result},
    format::read_document,
};

/// Name and file of a document to load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentSource {
    /// Registry name.
    pub name: String,
    /// Source file.
    pub path: PathBuf,
}

impl DocumentSource {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl<N: Into<String>, P: Into<PathBuf>> From<(N, P)> for DocumentSource {
    fn from((name, path): (N, P)) -> Self {
        Self::new(name, path)
    }
}

/// Checks every record of a typed batch.
///
/// Names and paths must be non-empty.
pub fn validate(entries: &[DocumentSource]) -> Result<()> {
    for (idx, entry) in entries.iter().enumerate() {
        if entry.name.is_empty() {
            return Err(RegistryError::invalid_input(format!(
                "entry {idx}: \"name\" must be a non-empty string"
            )));
        }
        if entry.path.as_os_str().is_empty() {
            return Err(RegistryError::invalid_input(format!(
                "entry {idx} ({}): \"path\" must be a non-empty path",
                entry.name
            )));
        }
    }
    Ok(())
}

/// Converts an untyped batch into records.
///
/// `value` must be an array whose elements are objects carrying a string
/// `name` and a string `path`. Extra fields are ignored.
pub fn from_value(value: &Value) -> Result<Vec<DocumentSource>> {
    let Value::Array(items) = value else {
        return Err(RegistryError::invalid_input(
            "batch must be a list of {\"name\", \"path\"} records",
        ));
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(idx, item)| record_from_value(idx, item))
        .collect::<Result<Vec<_>>>()?;
    validate(&entries)?;
    Ok(entries)
}

fn record_from_value(idx: usize, item: &Value) -> Result<DocumentSource> {
    if !item.is_object() {
        return Err(RegistryError::invalid_input(format!(
            "entry {idx} must be an object"
        )));
    }
    DocumentSource::deserialize(item)
        .map_err(|e| RegistryError::invalid_input(format!("entry {idx}: {e}")))
}

/// Reads a manifest file holding an untyped batch.
pub fn read_manifest(path: &Path) -> Result<Vec<DocumentSource>> {
    let manifest = read_document(path)?;
    from_value(&manifest)
}
