//! Key-path resolution and mutation
//!
//! The resolver walks a [`Document`] along a parsed [`KeyPath`], applying
//! read, write, or delete semantics at the terminal step. Positions in the
//! tree are threaded as an explicit node enum rather than live back
//! pointers: `toml_edit` stores array elements as plain `Value`s and
//! array-of-tables elements as `Table`s, so a walker that only knew about
//! `Item` could not reach them.

use serde_json::Value as JsonValue;
use toml_edit::{Array, Item, Table, TableLike, Value};

use crate::core::document::Document;
use crate::core::key_path::{KeyPath, Step};
use crate::core::value::{item_to_json, table_to_json, value_to_json};
use crate::error::{Result, TomlPathError};

/// A read-only position in the document tree.
#[derive(Clone, Copy)]
enum Node<'a> {
    Item(&'a Item),
    Value(&'a Value),
    Table(&'a Table),
}

enum FieldLookup<'a> {
    Found(Node<'a>),
    Missing,
    NotATable,
}

impl<'a> Node<'a> {
    fn as_table_like(self) -> Option<&'a dyn TableLike> {
        match self {
            Node::Item(item) => item.as_table_like(),
            Node::Value(value) => value.as_inline_table().map(|t| t as &dyn TableLike),
            Node::Table(table) => Some(table as &dyn TableLike),
        }
    }

    fn field(self, name: &str) -> FieldLookup<'a> {
        match self.as_table_like() {
            None => FieldLookup::NotATable,
            Some(table) => match table.get(name) {
                Some(item) => FieldLookup::Found(Node::Item(item)),
                None => FieldLookup::Missing,
            },
        }
    }

    fn to_json(self) -> JsonValue {
        match self {
            Node::Item(item) => item_to_json(item),
            Node::Value(value) => value_to_json(value),
            Node::Table(table) => table_to_json(table),
        }
    }
}

fn index_into<'a>(node: Node<'a>, name: &str, position: usize) -> Result<Node<'a>> {
    match node {
        Node::Item(Item::Value(Value::Array(array))) => array
            .get(position)
            .map(Node::Value)
            .ok_or_else(|| TomlPathError::index_not_found(name, position)),
        Node::Item(Item::ArrayOfTables(tables)) => tables
            .get(position)
            .map(Node::Table)
            .ok_or_else(|| TomlPathError::index_not_found(name, position)),
        Node::Value(Value::Array(array)) => array
            .get(position)
            .map(Node::Value)
            .ok_or_else(|| TomlPathError::index_not_found(name, position)),
        _ => Err(TomlPathError::type_mismatch(name, "an array")),
    }
}

/// Resolve a key path for reading and unwrap the matched node.
///
/// With a default supplied, a missing field anywhere along the path (and a
/// field step that lands on a non-table value) resolves to the default.
/// Out-of-range indices on arrays that do exist never take the default.
pub fn get(document: &Document, path: &KeyPath, default: Option<&str>) -> Result<JsonValue> {
    let mut node = Node::Item(document.root());

    for step in path.steps() {
        let looked_up = match node.field(step.name()) {
            FieldLookup::Found(next) => next,
            FieldLookup::Missing => {
                return match default {
                    Some(value) => Ok(JsonValue::String(value.to_string())),
                    None => Err(TomlPathError::key_not_found(step.name())),
                }
            }
            FieldLookup::NotATable => {
                return match default {
                    Some(value) => Ok(JsonValue::String(value.to_string())),
                    None => Err(TomlPathError::type_mismatch(step.name(), "inside a table")),
                }
            }
        };

        node = match step {
            Step::Field(_) => looked_up,
            Step::Index { name, position } => index_into(looked_up, name, *position)?,
        };
    }

    Ok(node.to_json())
}

/// A mutable position in the document tree.
enum NodeMut<'a> {
    Item(&'a mut Item),
    Value(&'a mut Value),
    Table(&'a mut Table),
}

impl<'a> NodeMut<'a> {
    fn into_table_like(self) -> Option<&'a mut dyn TableLike> {
        match self {
            NodeMut::Item(item) => item.as_table_like_mut(),
            NodeMut::Value(value) => value
                .as_inline_table_mut()
                .map(|t| t as &mut dyn TableLike),
            NodeMut::Table(table) => Some(table as &mut dyn TableLike),
        }
    }

    /// Strict navigation for one prefix step: the field must already exist,
    /// indices must be in range, and shapes must match. No defaulting, no
    /// auto-creation.
    fn descend(self, step: &Step) -> Result<NodeMut<'a>> {
        let name = step.name();
        let table = self
            .into_table_like()
            .ok_or_else(|| TomlPathError::type_mismatch(name, "inside a table"))?;
        let item = table
            .get_mut(name)
            .ok_or_else(|| TomlPathError::key_not_found(name))?;

        match step {
            Step::Field(_) => Ok(NodeMut::Item(item)),
            Step::Index { position, .. } => match item {
                Item::Value(Value::Array(array)) => array
                    .get_mut(*position)
                    .map(NodeMut::Value)
                    .ok_or_else(|| TomlPathError::index_not_found(name, *position)),
                Item::ArrayOfTables(tables) => tables
                    .get_mut(*position)
                    .map(NodeMut::Table)
                    .ok_or_else(|| TomlPathError::index_not_found(name, *position)),
                _ => Err(TomlPathError::type_mismatch(name, "an array")),
            },
        }
    }
}

fn walk_prefix<'a>(document: &'a mut Document, prefix: &[Step]) -> Result<NodeMut<'a>> {
    let mut node = NodeMut::Item(document.root_mut());
    for step in prefix {
        node = node.descend(step)?;
    }
    Ok(node)
}

/// Replace in bounds, append otherwise. A position past the end is a
/// request to extend by exactly one element, never to grow sparsely.
fn upsert(array: &mut Array, position: usize, mut value: Value) {
    match array.get_mut(position) {
        Some(slot) => {
            value
                .decor_mut()
                .set_prefix(if position == 0 { "" } else { " " });
            *slot = value;
        }
        None => array.push(value),
    }
}

/// Write a coerced value at the terminal step.
///
/// The prefix is navigated strictly; the caller must not persist the
/// document when this returns an error.
pub fn set(document: &mut Document, path: &KeyPath, value: Value) -> Result<()> {
    let (prefix, terminal) = path.split_terminal();
    let node = walk_prefix(document, prefix)?;

    match terminal {
        Step::Field(name) => {
            let table = node
                .into_table_like()
                .ok_or_else(|| TomlPathError::type_mismatch(name, "inside a table"))?;
            // Existing keys are replaced in place, new keys append at the
            // end of the table in document order.
            table.insert(name, Item::Value(value));
            Ok(())
        }
        Step::Index { name, position } => {
            let table = node
                .into_table_like()
                .ok_or_else(|| TomlPathError::type_mismatch(name, "inside a table"))?;
            let item = table
                .get_mut(name)
                .ok_or_else(|| TomlPathError::key_not_found(name))?;
            let array = item
                .as_array_mut()
                .ok_or_else(|| TomlPathError::type_mismatch(name, "an array of values"))?;
            upsert(array, *position, value);
            Ok(())
        }
    }
}

/// Delete the terminal key from its parent table.
///
/// Removing the last key of a nested table leaves the empty table in
/// place, so its bracketed header survives serialization.
pub fn unset(document: &mut Document, path: &KeyPath) -> Result<()> {
    let (prefix, terminal) = path.split_terminal();
    let node = walk_prefix(document, prefix)?;

    let name = match terminal {
        Step::Field(name) => name,
        Step::Index { .. } => {
            return Err(TomlPathError::invalid_key_path(
                path.raw(),
                "cannot unset an array element",
            ))
        }
    };

    let table = node
        .into_table_like()
        .ok_or_else(|| TomlPathError::type_mismatch(name, "inside a table"))?;
    table
        .remove(name)
        .ok_or_else(|| TomlPathError::key_not_found(name))?;
    Ok(())
}

/// Create every table named by the path that does not exist yet.
///
/// Idempotent: re-adding an existing section changes nothing. A segment
/// that resolves to an existing non-table value is a type mismatch.
pub fn add_section(document: &mut Document, path: &KeyPath) -> Result<()> {
    let mut table = document.root_table_mut();

    for step in path.steps() {
        let name = match step {
            Step::Field(name) => name,
            Step::Index { .. } => {
                return Err(TomlPathError::invalid_key_path(
                    path.raw(),
                    "array indices are not allowed in section paths",
                ))
            }
        };

        if !table.contains_key(name) {
            table.insert(name, Item::Table(Table::new()));
        }
        table = table
            .get_mut(name)
            .and_then(Item::as_table_mut)
            .ok_or_else(|| TomlPathError::type_mismatch(name, "a table"))?;
    }

    Ok(())
}

/// Version constraint modifiers recognized in dependency requirements,
/// ordered so that two-character modifiers are tried before `>`.
const VERSION_MODIFIERS: [&str; 7] = [">=", "!=", "==", "<=", "~=", "===", ">"];

fn rewrite_requirement(text: &str, package: &str, version: &str, version_has_modifier: bool) -> String {
    for modifier in VERSION_MODIFIERS {
        if let Some((name_part, _)) = text.split_once(modifier) {
            // The requirement already pins a version; keep its modifier
            // unless the new version string carries its own.
            let keep = if version_has_modifier { "" } else { modifier };
            return format!("{name_part}{keep}{version}");
        }
    }
    if version_has_modifier {
        format!("{package}{version}")
    } else {
        format!("{package}>={version}")
    }
}

fn dependency_line(mut value: Value) -> Value {
    value.decor_mut().set_prefix("\n    ");
    value
}

/// Update the version constraint of `package` inside the dependency array
/// at the terminal step, rewriting the array one element per line.
///
/// Elements not matching the package, and non-string elements, are kept
/// unchanged.
pub fn update_dependency_list(
    document: &mut Document,
    path: &KeyPath,
    package: &str,
    version: &str,
) -> Result<()> {
    let (prefix, terminal) = path.split_terminal();
    let node = walk_prefix(document, prefix)?;

    let name = match terminal {
        Step::Field(name) => name,
        Step::Index { .. } => {
            return Err(TomlPathError::invalid_key_path(
                path.raw(),
                "the dependency list must be named by a plain key",
            ))
        }
    };

    let table = node
        .into_table_like()
        .ok_or_else(|| TomlPathError::type_mismatch(name, "inside a table"))?;
    let item = table
        .get_mut(name)
        .ok_or_else(|| TomlPathError::key_not_found(name))?;
    let array = item
        .as_array_mut()
        .ok_or_else(|| TomlPathError::type_mismatch(name, "an array"))?;

    let version_has_modifier = VERSION_MODIFIERS.iter().any(|m| version.contains(m));

    let mut rewritten = Array::new();
    for element in array.iter() {
        let value = match element.as_str() {
            Some(text) if text.starts_with(package) => {
                Value::from(rewrite_requirement(text, package, version, version_has_modifier))
            }
            _ => element.clone(),
        };
        rewritten.push_formatted(dependency_line(value));
    }
    rewritten.set_trailing_comma(true);
    rewritten.set_trailing("\n");

    *array = rewritten;
    Ok(())
}
