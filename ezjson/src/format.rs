//! JSON document parsing, rendering and file I/O.
//!
//! Documents are read as UTF-8 JSON whatever the file extension, and written
//! back pretty-printed with four-space indentation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;

use crate::error::{RegistryError, Result};

const JSON_INDENT: &[u8] = b"    ";

/// Parses `content` read from `path` into a document tree.
pub fn parse(content: &str, path: &Path) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| RegistryError::invalid_format(path, e))
}

/// Renders a document tree for writing to `path`.
pub fn render(document: &Value, path: &Path) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut ser)
        .map_err(|e| RegistryError::serialize(path, e))?;
    String::from_utf8(buf).map_err(|e| RegistryError::serialize(path, e))
}

fn decode(bytes: Vec<u8>, path: &Path) -> Result<Value> {
    let content = String::from_utf8(bytes).map_err(|e| RegistryError::invalid_format(path, e))?;
    parse(&content, path)
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// - [`RegistryError::FileNotFound`] if `path` does not exist
/// - [`RegistryError::Io`] if the file cannot be read
/// - [`RegistryError::InvalidFormat`] if the content is not UTF-8 JSON
pub fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(RegistryError::FileNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|e| RegistryError::io(path, e))?;
    trace!("read {} bytes from {}", bytes.len(), path.display());
    decode(bytes, path)
}

/// Async counterpart of [`read_document`].
#[cfg(feature = "async")]
pub async fn read_document_async(path: &Path) -> Result<Value> {
    if !matches!(tokio::fs::try_exists(path).await, Ok(true)) {
        return Err(RegistryError::FileNotFound(path.to_path_buf()));
    }
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| RegistryError::io(path, e))?;
    trace!("read {} bytes from {}", bytes.len(), path.display());
    decode(bytes, path)
}

/// Rendered document waiting to be written to its source file.
///
/// Produced by mutating registry operations. The write replaces the whole
/// file and is not atomic.
#[derive(Debug, Clone)]
#[must_use = "the document is not persisted until the pending write is flushed"]
pub struct PendingWrite {
    path: PathBuf,
    contents: String,
}

impl PendingWrite {
    /// Renders `document` for writing to `path`.
    pub fn render(path: &Path, document: &Value) -> Result<Self> {
        let contents = render(document, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the contents, blocking the current thread.
    pub fn write(self) -> Result<()> {
        fs::write(&self.path, &self.contents).map_err(|e| RegistryError::io(&self.path, e))?;
        debug!("persisted {}", self.path.display());
        Ok(())
    }

    /// Writes the contents through `tokio::fs`.
    #[cfg(feature = "async")]
    pub async fn write_async(self) -> Result<()> {
        tokio::fs::write(&self.path, &self.contents)
            .await
            .map_err(|e| RegistryError::io(&self.path, e))?;
        debug!("persisted {}", self.path.display());
        Ok(())
    }
}
