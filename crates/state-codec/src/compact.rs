//! Compact values: the positional output of encoding.

use serde_json::Value;

/// Positional, name-free form of an encoded value.
///
/// `Absent` is disjoint from every encoded value: an enumeration index `0`
/// is `Int(0)`, never `Absent`. The overloaded wire `0` only appears once a
/// compact value is rendered with [`crate::StateCodec::to_wire`].
#[derive(Debug, Clone, PartialEq)]
pub enum Compact {
    /// No value at this position.
    Absent,
    /// Enumeration index or truncated integer.
    Int(i64),
    /// Irreducible value carried as-is (passthrough fields).
    Raw(Value),
    /// Positional slots of an object, fixed array or vector.
    List(Vec<Compact>),
}

impl Compact {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_list(&self) -> Option<&[Compact]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Schema-independent JSON rendering, with `Absent` as `null`.
    ///
    /// Useful for logging; the wire form handed to the link layer comes from
    /// [`crate::StateCodec::to_wire`], which knows which positions are
    /// composite.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Int(n) => Value::from(*n),
            Self::Raw(v) => v.clone(),
            Self::List(items) => Value::Array(items.iter().map(Compact::to_json).collect()),
        }
    }
}

impl From<i64> for Compact {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Vec<Compact>> for Compact {
    fn from(items: Vec<Compact>) -> Self {
        Self::List(items)
    }
}
