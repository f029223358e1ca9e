//! Schema Validator: parsed model JSON → typed entity.
//!
//! Each entity declares a static field table. Validation walks the table,
//! fills documented defaults for missing fields, coerces the deviations
//! models commonly produce, and only then hands the value to serde. Keys not
//! in the table pass through untouched and are ignored by serde.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::debug;

use crate::json_repair::type_name;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// String; `null` becomes `""` unless required.
    Text,
    OptionalText,
    TextList,
    Number,
    OptionalNumber,
    OptionalBool,
    /// Closed set of lowercase values. Anything else becomes `null`.
    Choice(&'static [&'static str]),
    Object(&'static [Field]),
    ObjectList(&'static [Field]),
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::OptionalText | FieldKind::Choice(_) => "string",
            FieldKind::TextList => "array of strings",
            FieldKind::Number | FieldKind::OptionalNumber => "number",
            FieldKind::OptionalBool => "boolean",
            FieldKind::Object(_) => "object",
            FieldKind::ObjectList(_) => "array of objects",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }
}

/// An entity that can be validated from untyped model output.
pub trait Schema: DeserializeOwned {
    const NAME: &'static str;
    const FIELDS: &'static [Field];
}

/// Offending location, expected shape and received JSON type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed at {path}: expected {expected}, received {received}")]
pub struct ValidationError {
    pub path: String,
    pub expected: String,
    pub received: String,
}

impl ValidationError {
    fn new(path: &str, expected: &str, received: &str) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.to_string(),
            received: received.to_string(),
        }
    }
}

/// Validates `value` against `T`'s field table and deserializes it.
pub fn validate<T: Schema>(value: Value) -> Result<T, ValidationError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Err(ValidationError::new("$", "object", type_name(&other))),
    };

    coerce_object(&mut map, T::FIELDS, "$")?;

    serde_json::from_value(Value::Object(map))
        .map_err(|e| ValidationError::new("$", T::NAME, &format!("object ({e})")))
}

fn coerce_object(
    map: &mut Map<String, Value>,
    fields: &[Field],
    path: &str,
) -> Result<(), ValidationError> {
    for field in fields {
        let field_path = format!("{path}.{}", field.name);
        let current = map.remove(field.name);

        let value = match current {
            None if field.required => {
                return Err(ValidationError::new(&field_path, field.kind.expected(), "missing"))
            }
            Some(Value::Null) if field.required => {
                return Err(ValidationError::new(&field_path, field.kind.expected(), "null"))
            }
            None => Value::Null,
            Some(v) => v,
        };

        let coerced = coerce_kind(field.kind, value, &field_path)?;
        map.insert(field.name.to_string(), coerced);
    }
    Ok(())
}

fn coerce_kind(kind: FieldKind, value: Value, path: &str) -> Result<Value, ValidationError> {
    let mismatch = |v: &Value| ValidationError::new(path, kind.expected(), type_name(v));

    match kind {
        FieldKind::Text | FieldKind::OptionalText => match value {
            Value::String(_) => Ok(value),
            Value::Null if matches!(kind, FieldKind::OptionalText) => Ok(Value::Null),
            Value::Null => Ok(Value::String(String::new())),
            Value::Array(ref items) => match join_strings(items) {
                Some(joined) => {
                    debug!("Coerced list to string at {path}");
                    Ok(Value::String(joined))
                }
                None => Err(mismatch(&value)),
            },
            other => Err(mismatch(&other)),
        },

        FieldKind::TextList => match value {
            Value::Null => Ok(Value::Array(vec![])),
            Value::String(s) => Ok(Value::Array(vec![Value::String(s)])),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    match item {
                        Value::String(_) => out.push(item),
                        Value::Number(n) => out.push(Value::String(n.to_string())),
                        Value::Bool(b) => out.push(Value::String(b.to_string())),
                        Value::Null => {}
                        other => {
                            return Err(ValidationError::new(
                                &format!("{path}[{i}]"),
                                "string",
                                type_name(&other),
                            ))
                        }
                    }
                }
                Ok(Value::Array(out))
            }
            other => Err(mismatch(&other)),
        },

        FieldKind::Number | FieldKind::OptionalNumber => match value {
            Value::Number(_) => Ok(value),
            Value::Null if matches!(kind, FieldKind::OptionalNumber) => Ok(Value::Null),
            Value::Null => Ok(Value::Number(Number::from(0))),
            Value::String(ref s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| mismatch(&value)),
            other => Err(mismatch(&other)),
        },

        FieldKind::OptionalBool => match value {
            Value::Bool(_) | Value::Null => Ok(value),
            Value::String(ref s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(ref s) if s.trim().eq_ignore_ascii_case("false") => {
                Ok(Value::Bool(false))
            }
            other => Err(mismatch(&other)),
        },

        FieldKind::Choice(options) => match value {
            Value::String(s) => {
                let normalized = s.trim().to_lowercase();
                if options.contains(&normalized.as_str()) {
                    Ok(Value::String(normalized))
                } else {
                    debug!("Unknown value '{s}' at {path}, treating as null");
                    Ok(Value::Null)
                }
            }
            _ => Ok(Value::Null),
        },

        FieldKind::Object(fields) => match value {
            Value::Null => {
                let mut map = Map::new();
                coerce_object(&mut map, fields, path)?;
                Ok(Value::Object(map))
            }
            Value::Object(mut map) => {
                coerce_object(&mut map, fields, path)?;
                Ok(Value::Object(map))
            }
            other => Err(mismatch(&other)),
        },

        FieldKind::ObjectList(fields) => match value {
            Value::Null => Ok(Value::Array(vec![])),
            Value::Object(mut map) => {
                coerce_object(&mut map, fields, &format!("{path}[0]"))?;
                Ok(Value::Array(vec![Value::Object(map)]))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match item {
                        Value::Object(mut map) => {
                            coerce_object(&mut map, fields, &item_path)?;
                            out.push(Value::Object(map));
                        }
                        other => {
                            return Err(ValidationError::new(
                                &item_path,
                                "object",
                                type_name(&other),
                            ))
                        }
                    }
                }
                Ok(Value::Array(out))
            }
            other => Err(mismatch(&other)),
        },
    }
}

/// Joins a list of strings with single spaces. `None` if any item is not a string.
pub fn join_strings(items: &[Value]) -> Option<String> {
    items
        .iter()
        .map(|v| v.as_str())
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join(" "))
}
