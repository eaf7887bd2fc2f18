//! JMESPath query delegate
//!
//! The whole unwrapped document is handed to the external evaluator; this
//! module only distinguishes "matched", "no match", and "bad expression".

use jmespath::Variable;
use serde_json::Value as JsonValue;

use crate::core::document::Document;
use crate::core::value::render;
use crate::error::{Result, TomlPathError};

/// A result the evaluator considers empty: nothing to print but not an
/// error either.
fn is_no_result(variable: &Variable) -> bool {
    variable.is_null()
        || variable.as_array().map(Vec::is_empty).unwrap_or(false)
        || variable.as_object().map(|o| o.is_empty()).unwrap_or(false)
        || variable.as_string().map(String::is_empty).unwrap_or(false)
}

/// Evaluate a JMESPath expression against the document.
///
/// Returns the rendered match, or `None` when the evaluator found nothing.
/// A syntactically invalid expression is an [`TomlPathError::InvalidQuery`].
pub fn search(document: &Document, expression: &str) -> Result<Option<String>> {
    let compiled = jmespath::compile(expression).map_err(TomlPathError::invalid_query)?;

    let payload = serde_json::to_string(&document.to_json())
        .map_err(TomlPathError::invalid_query)?;
    let data = Variable::from_json(&payload).map_err(TomlPathError::invalid_query)?;

    let result = compiled
        .search(data)
        .map_err(TomlPathError::invalid_query)?;

    if is_no_result(&result) {
        return Ok(None);
    }

    let unwrapped: JsonValue =
        serde_json::to_value(&*result).map_err(TomlPathError::invalid_query)?;
    Ok(Some(render(&unwrapped)))
}
