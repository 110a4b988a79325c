//! Schema descriptions, the declarative input to the compiler.

use serde_json::Value;

use crate::atom::Atom;

/// A declarative shape description.
///
/// Object fields may be declared in any order; the compiler canonicalizes
/// them by name. `Literal` exists so that a bare value placed where a codec
/// was meant is representable and can be rejected with its path.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Atom(Atom),
    Object(Vec<(String, Schema)>),
    Array(Vec<Schema>),
    Vector(Vec<Schema>),
    Literal(Value),
}

impl Schema {
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Self::Array(elements.into_iter().collect())
    }

    /// Variable-length sequence; element `i` uses `pattern[i % pattern.len()]`.
    pub fn vector<I>(pattern: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Self::Vector(pattern.into_iter().collect())
    }

    pub fn passthrough() -> Self {
        Self::Atom(Atom::passthrough())
    }

    pub fn integer() -> Self {
        Self::Atom(Atom::integer())
    }

    pub fn boolean() -> Self {
        Self::Atom(Atom::boolean())
    }
}

impl From<Atom> for Schema {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_builder_keeps_declaration_order() {
        let s = Schema::object([("b", Schema::integer()), ("a", Schema::boolean())]);
        let Schema::Object(fields) = s else {
            panic!("expected object");
        };
        assert_eq!(fields[0].0, "b");
        assert_eq!(fields[1].0, "a");
    }

    #[test]
    fn conversions() {
        assert_eq!(Schema::from(Atom::integer()), Schema::integer());
        assert_eq!(Schema::from(json!(3)), Schema::Literal(json!(3)));
    }
}
