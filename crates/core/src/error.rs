//! Error types for sheet2json configuration.

use thiserror::Error;

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Caller configuration errors, raised before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required option was not supplied.
    #[error("Configuration error: `{option}` is required")]
    MissingOption { option: &'static str },

    /// Two header labels map to the same canonical key.
    #[error("Configuration error: labels '{first}' and '{second}' both map to key '{key}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    /// A header label was declared more than once.
    #[error("Configuration error: header label '{label}' is mapped more than once")]
    DuplicateLabel { label: String },
}

impl ConfigError {
    /// Create a missing option error.
    pub fn missing(option: &'static str) -> Self {
        Self::MissingOption { option }
    }
}
