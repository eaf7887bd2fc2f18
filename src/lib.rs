//! tomlpath: read and edit TOML files via dotted key paths
//!
//! This library backs the `tomlpath` CLI. It resolves dotted/bracketed key
//! path expressions (e.g. `person.vehicles[1].model`) against a TOML
//! document, with read, write, delete, and section-creation semantics at
//! the terminal step, plus a JMESPath query mode. Edits preserve the
//! formatting, ordering, and comments of everything they do not touch.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tomlpath::{Document, KeyPath, resolver, Result};
//!
//! fn main() -> Result<()> {
//!     let mut document = Document::parse("[person]\nage = 12\n")?;
//!
//!     let age = resolver::get(&document, &KeyPath::parse("person.age")?, None)?;
//!     assert_eq!(age, 12);
//!
//!     let path = KeyPath::parse("person.name")?;
//!     resolver::set(&mut document, &path, toml_edit::Value::from("MyName"))?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: key-path parsing, the document wrapper, the resolver, value
//!   coercion, and the JMESPath delegate
//! - [`io`]: whole-file load and atomic store
//! - [`ops`]: CLI command handlers used by the binary
//! - [`error`]: the error enum every operation surfaces

pub use error::{Result, TomlPathError};

pub use crate::core::{CoercionMode, Document, KeyPath, Step};
pub use crate::core::{query, resolver, value};

pub mod args;
pub mod core;
pub mod error;
pub mod io;
pub mod ops;
