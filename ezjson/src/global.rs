//! Process-wide registries.
//!
//! One [`ConfigRegistry`] and one [`LanguageRegistry`] live for the whole
//! process, created on first use. The free functions here operate on them.
//!
//! Each call takes the registry lock only for its in-memory step: file reads
//! happen before the document is inserted and file writes after the lock is
//! released, so async callers never hold it across an `.await`. Calls are not
//! atomic with respect to each other; two tasks loading the same name may
//! both read the file, and the later insert fails with
//! [`RegistryError::AlreadyLoaded`].
//!
//! Code that needs isolation should own its registries instead.
//!
//! [`RegistryError::AlreadyLoaded`]: crate::RegistryError::AlreadyLoaded

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde_json::Value;

use crate::{
    config::ConfigRegistry,
    error::Result,
    format::read_document,
    lang::LanguageRegistry,
    source::{self, DocumentSource},
};

#[cfg(feature = "async")]
use crate::format::read_document_async;

/// Name used by callers that keep a single configuration.
pub const DEFAULT_CONFIG_NAME: &str = "default";

static CONFIGS: LazyLock<RwLock<ConfigRegistry>> = LazyLock::new(Default::default);
static LANGUAGES: LazyLock<RwLock<LanguageRegistry>> = LazyLock::new(Default::default);

fn configs() -> RwLockReadGuard<'static, ConfigRegistry> {
    CONFIGS.read().unwrap_or_else(PoisonError::into_inner)
}

fn configs_mut() -> RwLockWriteGuard<'static, ConfigRegistry> {
    CONFIGS.write().unwrap_or_else(PoisonError::into_inner)
}

fn languages() -> RwLockReadGuard<'static, LanguageRegistry> {
    LANGUAGES.read().unwrap_or_else(PoisonError::into_inner)
}

fn languages_mut() -> RwLockWriteGuard<'static, LanguageRegistry> {
    LANGUAGES.write().unwrap_or_else(PoisonError::into_inner)
}

/// Loads a configuration file under `name`.
pub fn load_configuration(name: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    configs().ensure_vacant(name)?;
    let document = read_document(path)?;
    configs_mut().insert_loaded(name, path, document)
}

/// Loads several configuration files, see [`ConfigRegistry::load_batch`].
pub fn load_configurations(entries: &[DocumentSource]) -> Result<()> {
    source::validate(entries)?;
    for entry in entries {
        load_configuration(&entry.name, &entry.path)?;
    }
    Ok(())
}

/// Loads an untyped batch of configuration files.
pub fn load_configurations_from_value(batch: &Value) -> Result<()> {
    load_configurations(&source::from_value(batch)?)
}

/// Loads the configuration files listed in a manifest.
pub fn load_configuration_manifest(path: impl AsRef<Path>) -> Result<()> {
    load_configurations(&source::read_manifest(path.as_ref())?)
}

/// Async counterpart of [`load_configuration`].
#[cfg(feature = "async")]
pub async fn async_load_configuration(name: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    configs().ensure_vacant(name)?;
    let document = read_document_async(path).await?;
    configs_mut().insert_loaded(name, path, document)
}

/// Async counterpart of [`load_configurations`].
#[cfg(feature = "async")]
pub async fn async_load_configurations(entries: &[DocumentSource]) -> Result<()> {
    source::validate(entries)?;
    for entry in entries {
        async_load_configuration(&entry.name, &entry.path).await?;
    }
    Ok(())
}

/// Copy of configuration `name`.
pub fn get_configuration(name: &str) -> Result<Value> {
    configs().document(name).cloned()
}

/// Copy of every loaded configuration, ordered by name.
pub fn get_configurations() -> BTreeMap<String, Value> {
    owned(configs().snapshot())
}

/// Looks up a dotted `key` in configuration `name`.
pub fn get_config_value(key: &str, name: &str) -> Result<Value> {
    configs().get(key, name)
}

/// Assigns `value` at `key` in configuration `name` and rewrites its file.
pub fn set_config_value(key: &str, value: impl Into<Value>, name: &str) -> Result<()> {
    let pending = configs_mut().stage_set(key, value, name)?;
    pending.write()
}

/// Deletes `key` from configuration `name` and rewrites its file.
pub fn remove_config_value(key: &str, name: &str) -> Result<()> {
    let pending = configs_mut().stage_remove(key, name)?;
    pending.write()
}

/// Async counterpart of [`set_config_value`].
#[cfg(feature = "async")]
pub async fn async_set_config_value(key: &str, value: impl Into<Value>, name: &str) -> Result<()> {
    let pending = configs_mut().stage_set(key, value, name)?;
    pending.write_async().await
}

/// Async counterpart of [`remove_config_value`].
#[cfg(feature = "async")]
pub async fn async_remove_config_value(key: &str, name: &str) -> Result<()> {
    let pending = configs_mut().stage_remove(key, name)?;
    pending.write_async().await
}

/// Forgets configuration `name`.
pub fn remove_configuration(name: &str) -> Result<()> {
    configs_mut().unload(name)
}

/// Forgets every configuration.
pub fn remove_all_configurations() {
    configs_mut().unload_all();
}

/// Loads a language file under `name`.
pub fn load_language(name: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    languages().ensure_vacant(name)?;
    let document = read_document(path)?;
    languages_mut().insert_loaded(name, path, document)
}

/// Loads several language files, see [`LanguageRegistry::load_batch`].
pub fn load_languages(entries: &[DocumentSource]) -> Result<()> {
    source::validate(entries)?;
    for entry in entries {
        load_language(&entry.name, &entry.path)?;
    }
    Ok(())
}

/// Loads an untyped batch of language files.
pub fn load_languages_from_value(batch: &Value) -> Result<()> {
    load_languages(&source::from_value(batch)?)
}

/// Loads the language files listed in a manifest.
pub fn load_language_manifest(path: impl AsRef<Path>) -> Result<()> {
    load_languages(&source::read_manifest(path.as_ref())?)
}

/// Async counterpart of [`load_language`].
#[cfg(feature = "async")]
pub async fn async_load_language(name: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    languages().ensure_vacant(name)?;
    let document = read_document_async(path).await?;
    languages_mut().insert_loaded(name, path, document)
}

/// Async counterpart of [`load_languages`].
#[cfg(feature = "async")]
pub async fn async_load_languages(entries: &[DocumentSource]) -> Result<()> {
    source::validate(entries)?;
    for entry in entries {
        async_load_language(&entry.name, &entry.path).await?;
    }
    Ok(())
}

/// Makes `name` the active language.
pub fn set_language(name: &str) -> Result<()> {
    languages_mut().set_active(name)
}

/// Name of the active language, if any.
pub fn get_current_language() -> Option<String> {
    languages().active().map(str::to_string)
}

/// Copy of language table `name`.
pub fn get_language(name: &str) -> Result<Value> {
    languages().document(name).cloned()
}

/// Copy of every loaded language table, ordered by name.
pub fn get_languages() -> BTreeMap<String, Value> {
    owned(languages().snapshot())
}

/// Resolves a dotted `key` in the active language.
pub fn translate_message(key: &str) -> Result<Value> {
    languages().translate(key)
}

/// [`translate_message`] rendered for display.
pub fn translate_text(key: &str) -> Result<String> {
    languages().translate_text(key)
}

/// Removes language `name`.
pub fn remove_language(name: &str) -> Result<()> {
    languages_mut().remove(name)
}

/// Removes each of `names` in order, stopping at the first failure.
pub fn remove_languages<S: AsRef<str>>(names: &[S]) -> Result<()> {
    languages_mut().remove_batch(names)
}

/// Removes every language and clears the active selection.
pub fn remove_all_languages() {
    languages_mut().remove_all();
}

fn owned(snapshot: BTreeMap<&str, &Value>) -> BTreeMap<String, Value> {
    snapshot
        .into_iter()
        .map(|(name, doc)| (name.to_string(), doc.clone()))
        .collect()
}
