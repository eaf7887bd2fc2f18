//! Error types for the tomlpath library
//!
//! Every failure mode of the path resolver and the surrounding I/O surfaces
//! as one variant here, so the binary can render a single-line diagnostic
//! and a non-zero exit without inspecting error internals.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum TomlPathError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target file does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// TOML syntax errors while parsing the target file
    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml_edit::TomlError,
    },

    /// A table field named by the key path does not exist
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    /// An array index named by the key path is out of range
    #[error("index {index} out of bounds for array '{key}'")]
    IndexNotFound { key: String, index: usize },

    /// A path segment expects a table/array but found something else
    #[error("key '{key}' is not {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    /// A raw value could not be coerced to the requested type
    #[error("invalid value '{value}': expected {expected}")]
    InvalidValue { value: String, expected: String },

    /// Key path expression errors
    #[error("invalid key path '{path}': {reason}")]
    InvalidKeyPath { path: String, reason: String },

    /// JMESPath expression errors
    #[error("invalid jmespath expression: {reason}")]
    InvalidQuery { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TomlPathError>;

impl TomlPathError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn index_not_found(key: impl Into<String>, index: usize) -> Self {
        Self::IndexNotFound {
            key: key.into(),
            index,
        }
    }

    pub fn type_mismatch(key: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
        }
    }

    pub fn invalid_value(value: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn invalid_key_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_query(reason: impl ToString) -> Self {
        Self::InvalidQuery {
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TomlPathError::key_not_found("person.hobby");
        assert_eq!(err.to_string(), "key 'person.hobby' not found");

        let err = TomlPathError::index_not_found("vehicles", 122);
        assert_eq!(err.to_string(), "index 122 out of bounds for array 'vehicles'");

        let err = TomlPathError::invalid_query("syntax error at offset 5");
        assert!(err.to_string().starts_with("invalid jmespath expression"));
    }

    #[test]
    fn test_error_creation() {
        let err = TomlPathError::file_not_found("config.toml");
        assert!(matches!(err, TomlPathError::FileNotFound { .. }));

        let err = TomlPathError::type_mismatch("person.name", "a table");
        assert!(matches!(err, TomlPathError::TypeMismatch { .. }));
    }
}
