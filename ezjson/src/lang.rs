//! Language registry.
//!
//! Holds read-only translation tables. One table can be made active, and
//! [`LanguageRegistry::translate`] resolves dotted keys against it.
//!
//! ```rust,no_run
//! use ezjson::LanguageRegistry;
//!
//! let mut langs = LanguageRegistry::new();
//! langs.load("en", "lang/en.json")?;
//! langs.load("es", "lang/es.json")?;
//! langs.set_active("es")?;
//!
//! println!("{}", langs.translate_text("menu.quit")?);
//! # Ok::<(), ezjson::RegistryError>(())
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use serde_json::Value;

use crate::{
    error::{RegistryError, Result},
    format::read_document,
    key,
    source::{self, DocumentSource},
};

#[cfg(feature = "async")]
use crate::format::read_document_async;

/// Named translation tables with one active selection.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: HashMap<String, Value>,
    active: Option<String>,
}

impl LanguageRegistry {
    /// Creates an empty registry with no active language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the translation table at `path` under `name`.
    ///
    /// Checks and errors are the same as [`crate::ConfigRegistry::load`].
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.ensure_vacant(name)?;
        let document = read_document(path)?;
        self.insert_loaded(name, path, document)
    }

    /// Async counterpart of [`LanguageRegistry::load`].
    #[cfg(feature = "async")]
    pub async fn load_async(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.ensure_vacant(name)?;
        let document = read_document_async(path).await?;
        self.insert_loaded(name, path, document)
    }

    /// Loads every record of `entries` in order, stopping at the first failure.
    pub fn load_batch(&mut self, entries: &[DocumentSource]) -> Result<()> {
        source::validate(entries)?;
        for entry in entries {
            self.load(&entry.name, &entry.path)?;
        }
        Ok(())
    }

    /// Async counterpart of [`LanguageRegistry::load_batch`].
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

    /// Async counterpart of [`LanguageRegistry::load_batch_value`].
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
        if self.languages.contains_key(name) {
            return Err(RegistryError::AlreadyLoaded(name.to_string()));
        }
        Ok(())
    }

    /// Registers a table that was read outside the registry.
    pub fn insert_loaded(
        &mut self,
        name: &str,
        path: &Path,
        document: Value,
    ) -> Result<()> {
        self.ensure_vacant(name)?;
        debug!("loaded language `{name}` from {}", path.display());
        self.languages.insert(name.to_string(), document);
        Ok(())
    }

    /// Makes `name` the target of translations.
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.languages.contains_key(name) {
            return Err(RegistryError::NotLoaded(name.to_string()));
        }
        debug!("active language set to `{name}`");
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Active language name, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Resolves a dotted `key` in the active language.
    ///
    /// A key that does not resolve returns itself as a string value.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotSet`] if no language is active.
    pub fn translate(&self, key: &str) -> Result<Value> {
        let active = self.active.as_deref().ok_or(RegistryError::NotSet)?;
        Ok(key::lookup(self.document(active)?, key))
    }

    /// [`LanguageRegistry::translate`] rendered for display.
    ///
    /// Strings are returned as is, anything else as compact JSON.
    pub fn translate_text(&self, key: &str) -> Result<String> {
        Ok(match self.translate(key)? {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Translation table of `name`.
    pub fn document(&self, name: &str) -> Result<&Value> {
        self.languages
            .get(name)
            .ok_or_else(|| RegistryError::NotLoaded(name.to_string()))
    }

    /// Removes language `name`, clearing the active selection if it was `name`.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.languages
            .remove(name)
            .ok_or_else(|| RegistryError::NotLoaded(name.to_string()))?;
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        debug!("removed language `{name}`");
        Ok(())
    }

    /// Removes each of `names` in order, stopping at the first failure.
    pub fn remove_batch<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        for name in names {
            self.remove(name.as_ref())?;
        }
        Ok(())
    }

    /// Removes every language and clears the active selection.
    pub fn remove_all(&mut self) {
        debug!("removing {} language(s)", self.languages.len());
        self.languages.clear();
        self.active = None;
    }

    /// Read view of every loaded table, ordered by name.
    pub fn snapshot(&self) -> BTreeMap<&str, &Value> {
        self.documents().collect()
    }

    /// Iterates over `(name, table)` pairs in no particular order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.languages.iter().map(|(name, doc)| (name.as_str(), doc))
    }

    /// Whether `name` is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }

    /// Loaded names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of loaded languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether no language is loaded.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
