//! Error types and result definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the configuration and language registries.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A document is already registered under this name.
    #[error("document `{0}` already loaded")]
    AlreadyLoaded(String),

    /// No document is registered under this name.
    #[error("document `{0}` not loaded")]
    NotLoaded(String),

    /// A translation was requested before any language was made active.
    #[error("no active language set")]
    NotSet,

    /// The source file does not exist.
    #[error("file {} not found", .0.display())]
    FileNotFound(PathBuf),

    /// The source file could not be parsed.
    #[error("file {} is not a valid document: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    /// A batch load request was malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The final key segment does not exist in its containing object.
    #[error("key `{key}` not found in document `{name}`")]
    KeyNotFound { key: String, name: String },

    /// Reading or writing a document file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be rendered for persisting.
    #[error("cannot serialize document for {}: {reason}", .path.display())]
    Serialize { path: PathBuf, reason: String },
}

impl RegistryError {
    /// Creates an invalid format error.
    pub fn invalid_format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    /// Creates an I/O error bound to the file it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a serialization error.
    pub fn serialize(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Serialize {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegistryError::AlreadyLoaded("default".into());
        assert_eq!(err.to_string(), "document `default` already loaded");

        let err = RegistryError::KeyNotFound {
            key: "server.host".into(),
            name: "default".into(),
        };
        assert_eq!(
            err.to_string(),
            "key `server.host` not found in document `default`"
        );

        let err = RegistryError::FileNotFound(PathBuf::from("missing.json"));
        assert_eq!(err.to_string(), "file missing.json not found");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RegistryError::io("cfg.json", inner);
        let source = std::error::Error::source(&err).expect("io error should carry a source");
        assert_eq!(source.to_string(), "denied");
    }
}
