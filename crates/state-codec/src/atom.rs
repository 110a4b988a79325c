//! Atomic codecs: passthrough, integer, enumeration and the enumeration
//! shorthands (boolean, range, sorted keys).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::compact::Compact;
use crate::error::{kind_of, CodecError, CodecResult, SchemaError};

/// Ordered, immutable list of the values an enumeration may take.
///
/// Built from an owned copy of the caller's values, so later changes to the
/// source collection are never observed. Clones share the same snapshot.
#[derive(Clone)]
pub struct Domain {
    values: Arc<[Value]>,
    strings: Arc<HashMap<String, usize>>,
}

impl Domain {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Arc<[Value]> = values.into_iter().map(Into::into).collect();
        let mut strings = HashMap::new();
        for (i, value) in values.iter().enumerate() {
            if let Value::String(s) = value {
                strings.entry(s.clone()).or_insert(i);
            }
        }
        Self {
            values,
            strings: Arc::new(strings),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// First position of `value` in the domain, by exact equality.
    ///
    /// Numbers compare by value when either side is a float, so `2.0` finds
    /// the member `2`. Decoding then yields the domain's own `2`.
    pub fn position(&self, value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => self.strings.get(s).copied(),
            _ => self
                .values
                .iter()
                .position(|v| v == value || same_number(v, value)),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

fn same_number(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            x.as_f64() == y.as_f64()
        }
        _ => false,
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// A leaf codec.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "domain", rename_all = "snake_case")]
pub enum Atom {
    /// Identity in both directions, for free-form values such as search text.
    Passthrough,
    /// Truncates toward zero on encode; identity on decode.
    Integer,
    /// Replaces a value by its position in the domain.
    Enumeration(Domain),
}

impl Atom {
    pub fn passthrough() -> Self {
        Self::Passthrough
    }

    pub fn integer() -> Self {
        Self::Integer
    }

    pub fn enumeration<I, V>(domain: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Enumeration(Domain::new(domain))
    }

    /// `false` encodes to 0, `true` to 1.
    pub fn boolean() -> Self {
        Self::enumeration([false, true])
    }

    /// Enumeration over the arithmetic progression from `start` up to, but
    /// excluding, `end`.
    ///
    /// With a positive step and `end < start` the bounds are swapped, so
    /// `range(5, 2, 1)` is the same domain as `range(2, 5, 1)`. A negative
    /// step mirrors this, walking down from the larger bound.
    pub fn range(start: i64, end: i64, step: i64) -> Result<Self, SchemaError> {
        if step == 0 {
            return Err(SchemaError::ZeroStep);
        }
        let mut values = Vec::new();
        if step > 0 {
            let (mut i, end) = if end < start { (end, start) } else { (start, end) };
            while i < end {
                values.push(i);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        } else {
            let (mut i, end) = if end > start { (end, start) } else { (start, end) };
            while i > end {
                values.push(i);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        }
        Ok(Self::enumeration(values))
    }

    /// Enumeration over a key set, sorted ascending with duplicates removed.
    ///
    /// Sorting makes the domain independent of the order the keys were
    /// listed in.
    pub fn sorted_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        keys.sort();
        keys.dedup();
        Self::enumeration(keys)
    }

    /// Enumeration over the keys of a JSON object.
    pub fn keys_of(object: &Map<String, Value>) -> Self {
        Self::sorted_keys(object.keys().cloned())
    }

    pub fn domain(&self) -> Option<&Domain> {
        match self {
            Self::Enumeration(domain) => Some(domain),
            _ => None,
        }
    }

    pub(crate) fn encode(&self, value: Option<&Value>, path: &str) -> CodecResult<Compact> {
        match self {
            Self::Passthrough => Ok(match value {
                None | Some(Value::Null) => Compact::Absent,
                Some(v) => Compact::Raw(v.clone()),
            }),
            Self::Integer => match value {
                None | Some(Value::Null) => Ok(Compact::Absent),
                Some(Value::Number(n)) => Ok(Compact::Int(truncate(n))),
                Some(other) => Err(CodecError::ShapeMismatch {
                    path: path.to_string(),
                    expected: "number",
                    found: kind_of(other),
                }),
            },
            Self::Enumeration(domain) => {
                let Some(v) = value else {
                    return Ok(Compact::Absent);
                };
                match domain.position(v) {
                    Some(i) => Ok(Compact::Int(i as i64)),
                    None if v.is_null() => Ok(Compact::Absent),
                    None => Err(CodecError::DomainMismatch {
                        path: path.to_string(),
                        value: v.clone(),
                    }),
                }
            }
        }
    }

    pub(crate) fn decode(&self, compact: &Compact, path: &str) -> CodecResult<Option<Value>> {
        match (self, compact) {
            (_, Compact::Absent) => Ok(None),
            (Self::Passthrough, c) => Ok(Some(match c {
                Compact::Raw(v) => v.clone(),
                other => other.to_json(),
            })),
            (Self::Integer, Compact::Int(n)) => Ok(Some(Value::from(*n))),
            (Self::Enumeration(domain), Compact::Int(i)) => usize::try_from(*i)
                .ok()
                .and_then(|idx| domain.get(idx))
                .cloned()
                .map(Some)
                .ok_or_else(|| CodecError::IndexOutOfRange {
                    path: path.to_string(),
                    index: *i,
                    len: domain.len(),
                }),
            (_, other) => Err(CodecError::ShapeMismatch {
                path: path.to_string(),
                expected: "integer",
                found: kind_of(&other.to_json()),
            }),
        }
    }
}

fn truncate(n: &serde_json::Number) -> i64 {
    if let Some(i) = n.as_i64() {
        return i;
    }
    if let Some(u) = n.as_u64() {
        return i64::try_from(u).unwrap_or(i64::MAX);
    }
    // `as` saturates for out-of-range floats.
    n.as_f64().map_or(0, |f| f.trunc() as i64)
}
