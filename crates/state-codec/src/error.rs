//! Codec error types.
//!
//! Authoring mistakes surface while compiling a schema ([`SchemaError`]);
//! everything that goes wrong for one particular value surfaces from
//! encode/decode ([`CodecError`]). Paths use `/`-separated segments from the
//! schema root, with `/` alone meaning the root itself.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while compiling a schema description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("unsupported schema node at {path}: literal {literal} is not a codec")]
    Literal { path: String, literal: Value },
    #[error("vector pattern at {path} is empty")]
    EmptyPattern { path: String },
    #[error("object schema at {path} has no fields")]
    EmptyObject { path: String },
    #[error("array schema at {path} has no elements")]
    EmptyArray { path: String },
    #[error("object schema at {path} has an empty field name")]
    EmptyFieldName { path: String },
    #[error("object schema at {path} declares field \"{field}\" twice")]
    DuplicateField { path: String, field: String },
    #[error("range codec step must be non-zero")]
    ZeroStep,
}

/// Errors raised while encoding or decoding a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("value {value} at {path} is not a member of the enumeration domain")]
    DomainMismatch { path: String, value: Value },
    #[error("index {index} at {path} is outside the enumeration domain of length {len}")]
    IndexOutOfRange { path: String, index: i64, len: usize },
    #[error("expected {expected} at {path}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },
    #[error("object at {path} has field \"{field}\" that the schema does not declare")]
    UnknownField { path: String, field: String },
    #[error("expected at most {expected} elements at {path}, found {found}")]
    ArityMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("compact value has no leading schema version")]
    MissingVersion,
    #[error("schema version {found} is not supported (supported: {supported:?})")]
    UnsupportedVersion { found: u64, supported: Vec<u32> },
}

/// Result type alias for encode/decode operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Short description of a JSON value's kind, used in shape errors.
pub(crate) fn kind_of(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("array of length {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    if parent == "/" {
        format!("/{segment}")
    } else {
        format!("{parent}/{segment}")
    }
}
