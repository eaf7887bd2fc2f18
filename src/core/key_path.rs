use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, TomlPathError};

/// One parsed segment of a key path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Plain field lookup in a table, e.g. `name`.
    Field(String),
    /// Indexed array lookup, e.g. `vehicles[1]`.
    Index { name: String, position: usize },
}

impl Step {
    /// The field name this step looks up in its parent table.
    pub fn name(&self) -> &str {
        match self {
            Step::Field(name) => name,
            Step::Index { name, .. } => name,
        }
    }
}

/// A dotted key path, e.g. `person.vehicles[1].model`.
///
/// Always holds at least one step; the last step is the terminal step whose
/// handling differs per operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPath {
    steps: Vec<Step>,
    raw: String,
}

fn indexed_segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<key>.+?)\[(?P<index>\d+)\]$").expect("indexed segment pattern is valid")
    })
}

impl KeyPath {
    /// Parse a dotted key path expression.
    ///
    /// Segments are split on `.`; a segment of the form `name[digits]`
    /// becomes an [`Step::Index`], anything else a [`Step::Field`].
    /// Malformed bracket syntax (non-digit index, unmatched bracket) falls
    /// through to a plain field, which keeps literal keys containing
    /// brackets addressable.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(TomlPathError::invalid_key_path(raw, "empty key path"));
        }

        let steps = raw
            .split('.')
            .map(|segment| {
                if let Some(caps) = indexed_segment_re().captures(segment) {
                    // An index too large for usize is not a usable position;
                    // treat the whole segment as a literal key.
                    if let Ok(position) = caps["index"].parse::<usize>() {
                        return Step::Index {
                            name: caps["key"].to_string(),
                            position,
                        };
                    }
                }
                Step::Field(segment.to_string())
            })
            .collect();

        Ok(Self {
            steps,
            raw: raw.to_string(),
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Split into the navigation prefix and the terminal step.
    pub fn split_terminal(&self) -> (&[Step], &Step) {
        let (last, prefix) = self
            .steps
            .split_last()
            .expect("a parsed key path holds at least one step");
        (prefix, last)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
