//! Configuration registry.
//!
//! Holds named documents bound to the file they were loaded from. Reads go
//! through dotted keys; every successful [`ConfigRegistry::set`] or
//! [`ConfigRegistry::remove`] rewrites the whole source file.
//!
//! ```rust,no_run
//! use ezjson::ConfigRegistry;
//!
//! let mut configs = ConfigRegistry::new();
//! configs.load("default", "config.json")?;
//!
//! let port = configs.get("server.port", "default")?;
//! configs.set("server.host", "localhost", "default")?;
//! # let _ = port;
//! # Ok::<(), ezjson::RegistryError>(())
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{
    error::{RegistryError, Result},
    format::{PendingWrite, read_document},
    key,
    source::{self, DocumentSource},
};

#[cfg(feature = "async")]
use crate::format::read_document_async;

/// A loaded configuration document and the file backing it.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    document: Value,
    source_path: PathBuf,
}

impl ConfigEntry {
    /// Parsed document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// File the document was loaded from and is persisted to.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn pending_write(&self) -> Result<PendingWrite> {
        PendingWrite::render(&self.source_path, &self.document)
    }
}

/// Named configuration documents with write-through persistence.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    entries: HashMap<String, ConfigEntry>,
}

impl ConfigRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the document at `path` under `name`.
    ///
    /// The name is checked before the file is touched, so a collision never
    /// reads `path`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyLoaded`] if `name` is taken
    /// - [`RegistryError::FileNotFound`] if `path` does not exist
    /// - [`RegistryError::Io`] if `path` cannot be read
    /// - [`RegistryError::InvalidFormat`] if the content does not parse
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.ensure_vacant(name)?;
        let document = read_document(path)?;
        self.insert_loaded(name, path, document)
    }

    /// Async counterpart of [`ConfigRegistry::load`].
    #[cfg(feature = "async")]
    pub async fn load_async(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.ensure_vacant(name)?;
        let document = read_document_async(path).await?;
        self.insert_loaded(name, path, document)
    }

    /// Loads every record of `entries` in order.
    ///
    /// All records are validated first; a malformed one loads nothing. Loading
    /// stops at the first failure and keeps what was loaded before it.
    pub fn load_batch(&mut self, entries: &[DocumentSource]) -> Result<()> {
        source::validate(entries)?;
        for entry in entries {
            self.load(&entry.name, &entry.path)?;
        }
        Ok(())
    }

    /// Async counterpart of [`ConfigRegistry::load_batch`].
    #[cfg(feature = "async")]
    pub async fn load_batch_async(&mut self, entries: &[DocumentSource]) -> Result<()> {
        source::validate(entries)?;
        for entry in entries {
            self.load_async(&entry.name, &entry.path).await?;
        }
        Ok(())
    }

    /// Loads an untyped batch, see [`source::from_value`] for its shape.
    pub fn load_batch_value(&mut self, batch: &Value) -> Result<()> {
        let entries = source::from_value(batch)?;
        self.load_batch(&entries)
    }

    /// Async counterpart of [`ConfigRegistry::load_batch_value`].
    #[cfg(feature = "async")]
    pub async fn load_batch_value_async(&mut self, batch: &Value) -> Result<()> {
        let entries = source::from_value(batch)?;
        self.load_batch_async(&entries).await
    }

    /// Loads the batch listed in a manifest file.
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let entries = source::read_manifest(path.as_ref())?;
        self.load_batch(&entries)
    }

    /// Fails with [`RegistryError::AlreadyLoaded`] if `name` is taken.
    pub fn ensure_vacant(&self, name: &str) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::AlreadyLoaded(name.to_string()));
        }
        Ok(())
    }

    /// Registers a document that was read outside the registry.
    pub fn insert_loaded(
        &mut self,
        name: &str,
        path: &Path,
        document: Value,
    ) -> Result<()> {
        self.ensure_vacant(name)?;
        debug!("loaded configuration `{name}` from {}", path.display());
        self.entries.insert(
            name.to_string(),
            ConfigEntry {
                document,
                source_path: path.to_path_buf(),
            },
        );
        Ok(())
    }

    /// Looks up a dotted `key` in configuration `name`.
    ///
    /// A key that does not resolve returns itself as a string value.
    pub fn get(&self, key: &str, name: &str) -> Result<Value> {
        Ok(key::lookup(self.document(name)?, key))
    }

    /// Whole document of configuration `name`.
    pub fn document(&self, name: &str) -> Result<&Value> {
        self.entry(name).map(ConfigEntry::document)
    }

    /// Entry of configuration `name`.
    pub fn entry(&self, name: &str) -> Result<&ConfigEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::NotLoaded(name.to_string()))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut ConfigEntry> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotLoaded(name.to_string()))
    }

    /// Source file of configuration `name`.
    pub fn source_path(&self, name: &str) -> Result<&Path> {
        self.entry(name).map(ConfigEntry::source_path)
    }

    /// Assigns `value` at `key` and rewrites the source file.
    ///
    /// Missing objects along `key` are created; non-object values in the way
    /// are replaced by empty objects. A document whose root is not an object
    /// is replaced by an object as well.
    pub fn set(&mut self, key: &str, value: impl Into<Value>, name: &str) -> Result<()> {
        self.stage_set(key, value, name)?.write()
    }

    /// Async counterpart of [`ConfigRegistry::set`].
    #[cfg(feature = "async")]
    pub async fn set_async(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        name: &str,
    ) -> Result<()> {
        self.stage_set(key, value, name)?.write_async().await
    }

    /// Applies [`ConfigRegistry::set`] in memory and returns the file write
    /// still to be done.
    pub fn stage_set(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        name: &str,
    ) -> Result<PendingWrite> {
        let entry = self.entry_mut(name)?;
        key::insert(&mut entry.document, key, value.into());
        trace!("set `{key}` in configuration `{name}`");
        entry.pending_write()
    }

    /// Deletes the value at `key` and rewrites the source file.
    ///
    /// # Errors
    ///
    /// [`RegistryError::KeyNotFound`] if the last segment of `key` is absent
    /// or the document root is not an object; the file is not written in that
    /// case.
    pub fn remove(&mut self, key: &str, name: &str) -> Result<()> {
        self.stage_remove(key, name)?.write()
    }

    /// Async counterpart of [`ConfigRegistry::remove`].
    #[cfg(feature = "async")]
    pub async fn remove_async(&mut self, key: &str, name: &str) -> Result<()> {
        self.stage_remove(key, name)?.write_async().await
    }

    /// Applies [`ConfigRegistry::remove`] in memory and returns the file write
    /// still to be done.
    pub fn stage_remove(&mut self, key: &str, name: &str) -> Result<PendingWrite> {
        let entry = self.entry_mut(name)?;
        if key::remove(&mut entry.document, key).is_none() {
            return Err(RegistryError::KeyNotFound {
                key: key.to_string(),
                name: name.to_string(),
            });
        }
        trace!("removed `{key}` from configuration `{name}`");
        entry.pending_write()
    }

    /// Forgets configuration `name`. The source file is left as is.
    pub fn unload(&mut self, name: &str) -> Result<()> {
        self.entries
            .remove(name)
            .ok_or_else(|| RegistryError::NotLoaded(name.to_string()))?;
        debug!("unloaded configuration `{name}`");
        Ok(())
    }

    /// Forgets every configuration.
    pub fn unload_all(&mut self) {
        debug!("unloading {} configuration(s)", self.entries.len());
        self.entries.clear();
    }

    /// Read view of every loaded document, ordered by name.
    pub fn snapshot(&self) -> BTreeMap<&str, &Value> {
        self.documents().collect()
    }

    /// Iterates over `(name, document)` pairs in no particular order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.document))
    }

    /// Whether `name` is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Loaded names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of loaded configurations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no configuration is loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
