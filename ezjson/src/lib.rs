//! # ezjson
//!
//! Named JSON configuration and language documents with dotted-key access.
//!
//! Documents are registered under a name and the file they come from, parsed
//! once and kept in memory. Values are addressed with dotted keys such as
//! `"server.port"`.
//!
//! ## Features
//!
//! - Configuration registry with write-through persistence on every change
//! - Language registry with an active translation table
//! - Lookups that fall back to the key itself when nothing is found
//! - Documents are always JSON, whatever the file extension
//! - Blocking and `tokio`-based async file I/O (`async` feature, on by default)
//! - Owned registries or process-wide ones through free functions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//!
//! ezjson::load_configuration(ezjson::DEFAULT_CONFIG_NAME, "config.json")?;
//!
//! // {"server": {"port": 8080}}
//! let port = ezjson::get_config_value("server.port", "default")?;
//! assert_eq!(port, json!(8080));
//!
//! // Unknown keys come back as-is.
//! let host = ezjson::get_config_value("server.host", "default")?;
//! assert_eq!(host, json!("server.host"));
//!
//! // Rewrites config.json with four-space indentation.
//! ezjson::set_config_value("server.host", "localhost", "default")?;
//!
//! ezjson::load_language("en", "lang/en.json")?;
//! ezjson::set_language("en")?;
//! println!("{}", ezjson::translate_text("menu.quit")?);
//! # Ok::<(), ezjson::RegistryError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration registry
//! - [`lang`] - Language registry
//! - [`global`] - Process-wide registries and free functions
//! - [`key`] - Dotted-key traversal
//! - [`format`] - JSON parsing, rendering and file I/O
//! - [`source`] - Batch load records
//! - [`error`] - Error types and result definitions

#[macro_use]
extern crate log;

/// Configuration registry with write-through persistence.
pub mod config;

/// Error types and result definitions.
pub mod error;

/// JSON parsing, rendering and file I/O.
pub mod format;

/// Process-wide registries and the free-function API.
pub mod global;

/// Dotted-key traversal.
pub mod key;

/// Language registry.
pub mod lang;

/// Batch load records.
pub mod source;

#[cfg(test)]
mod testing;

pub use config::{ConfigEntry, ConfigRegistry};
pub use error::{RegistryError, Result};
pub use format::PendingWrite;
pub use global::*;
pub use lang::LanguageRegistry;
pub use source::DocumentSource;
pub use serde_json::Value;
