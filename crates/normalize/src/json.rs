//! JSON normalization.
//!
//! Accepts either a single object (wrapped into a one-element sequence) or
//! an array of objects (used as-is, in array order). Anything else is a
//! normalization failure.

use model::FieldMap;
use serde_json::Value;

use crate::error::NormalizeError;

/// Parses JSON bytes into one field-mapping per record.
pub fn normalize_json(raw: &[u8]) -> Result<Vec<FieldMap>, NormalizeError> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|err| NormalizeError::Json(err.to_string()))?;

    match value {
        Value::Object(fields) => Ok(vec![fields]),
        Value::Array(items) => {
            let mut rows = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(fields) => rows.push(fields),
                    other => {
                        return Err(NormalizeError::Json(format!(
                            "array element {index} is not an object (found {})",
                            kind_of(&other)
                        )))
                    }
                }
            }
            Ok(rows)
        }
        other => Err(NormalizeError::Json(format!(
            "expected an object or an array of objects, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
