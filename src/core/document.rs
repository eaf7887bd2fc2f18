//! The editable document
//!
//! A thin wrapper over `toml_edit::DocumentMut`. Parsing keeps the original
//! formatting, ordering, and comments of every region the resolver does not
//! touch, and `Display` serializes the tree back to TOML text.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value as JsonValue;
use toml_edit::{DocumentMut, Item, Table};

use crate::core::value::item_to_json;
use crate::error::{Result, TomlPathError};

/// A parsed TOML document, mutable in place.
#[derive(Clone, Debug, Default)]
pub struct Document {
    inner: DocumentMut,
}

impl Document {
    /// Parse TOML text into an editable document.
    pub fn parse(text: &str) -> Result<Self> {
        let inner = text
            .parse::<DocumentMut>()
            .map_err(|source| TomlPathError::Parse {
                path: Path::new("<input>").to_path_buf(),
                source,
            })?;
        Ok(Self { inner })
    }

    /// Parse TOML text, attributing syntax errors to `path`.
    pub fn parse_from(text: &str, path: &Path) -> Result<Self> {
        text.parse::<DocumentMut>()
            .map(|inner| Self { inner })
            .map_err(|source| TomlPathError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn root(&self) -> &Item {
        self.inner.as_item()
    }

    pub fn root_mut(&mut self) -> &mut Item {
        self.inner.as_item_mut()
    }

    pub fn root_table_mut(&mut self) -> &mut Table {
        self.inner.as_table_mut()
    }

    /// Unwrap the whole document into a plain JSON value, stripping
    /// formatting metadata. Key order follows document order.
    pub fn to_json(&self) -> JsonValue {
        item_to_json(self.inner.as_item())
    }
}

impl FromStr for Document {
    type Err = TomlPathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Display delegates straight to toml_edit so untouched regions round-trip
// byte for byte.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
