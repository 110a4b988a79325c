//! Compiled codec tree and the pure functions that interpret it.
//!
//! Encode and decode walk the same tree in the same slot order, which is
//! what makes them inverses. Composite nodes (object, array, vector) never
//! produce anything but `Absent` or a `List`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::atom::Atom;
use crate::compact::Compact;
use crate::error::{join_path, kind_of, CodecError, CodecResult};

/// A named slot of a compiled object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub node: CodecNode,
}

/// A compiled schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodecNode {
    Atomic { codec: Atom },
    /// Fields sorted ascending by name.
    Object { fields: Vec<Field> },
    Array { elements: Vec<CodecNode> },
    /// Non-empty repeating pattern.
    Vector { pattern: Vec<CodecNode> },
}

impl CodecNode {
    pub fn is_composite(&self) -> bool {
        !matches!(self, Self::Atomic { .. })
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Self::Atomic { .. } => 0,
            Self::Object { fields } => fields.iter().map(|f| f.node.node_count()).sum(),
            Self::Array { elements: nodes } | Self::Vector { pattern: nodes } => {
                nodes.iter().map(CodecNode::node_count).sum()
            }
        }
    }

    /// Node used for slot `i` of a list produced by this composite.
    fn slot(&self, i: usize) -> Option<(&CodecNode, String)> {
        match self {
            Self::Atomic { .. } => None,
            Self::Object { fields } => fields.get(i).map(|f| (&f.node, f.name.clone())),
            Self::Array { elements } => elements.get(i).map(|n| (n, i.to_string())),
            Self::Vector { pattern } => Some((&pattern[i % pattern.len()], i.to_string())),
        }
    }

    fn arity(&self) -> Option<usize> {
        match self {
            Self::Object { fields } => Some(fields.len()),
            Self::Array { elements } => Some(elements.len()),
            Self::Atomic { .. } | Self::Vector { .. } => None,
        }
    }

    pub fn encode(&self, value: Option<&Value>, path: &str) -> CodecResult<Compact> {
        match self {
            Self::Atomic { codec } => codec.encode(value, path),
            Self::Object { fields } => {
                let map = match value {
                    None | Some(Value::Null) => return Ok(Compact::Absent),
                    Some(Value::Object(map)) => map,
                    Some(other) => return Err(shape(path, "object", other)),
                };
                if map.is_empty() {
                    return Ok(Compact::Absent);
                }
                if let Some(field) = map.keys().find(|k| !fields.iter().any(|f| &f.name == *k)) {
                    return Err(CodecError::UnknownField {
                        path: path.to_string(),
                        field: field.clone(),
                    });
                }
                let slots = fields
                    .iter()
                    .map(|f| f.node.encode(map.get(&f.name), &join_path(path, &f.name)))
                    .collect::<CodecResult<Vec<_>>>()?;
                Ok(Compact::List(slots))
            }
            Self::Array { elements } => {
                let items = match value {
                    None | Some(Value::Null) => return Ok(Compact::Absent),
                    Some(Value::Array(items)) => items,
                    Some(other) => return Err(shape(path, "array", other)),
                };
                if items.is_empty() {
                    return Ok(Compact::Absent);
                }
                if items.len() > elements.len() {
                    return Err(CodecError::ArityMismatch {
                        path: path.to_string(),
                        expected: elements.len(),
                        found: items.len(),
                    });
                }
                let slots = elements
                    .iter()
                    .enumerate()
                    .map(|(i, node)| node.encode(items.get(i), &join_path(path, &i.to_string())))
                    .collect::<CodecResult<Vec<_>>>()?;
                Ok(Compact::List(slots))
            }
            Self::Vector { pattern } => {
                let items = match value {
                    None | Some(Value::Null) => return Ok(Compact::Absent),
                    Some(Value::Array(items)) => items,
                    Some(other) => return Err(shape(path, "array", other)),
                };
                if items.is_empty() {
                    return Ok(Compact::Absent);
                }
                let slots = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        pattern[i % pattern.len()].encode(Some(item), &join_path(path, &i.to_string()))
                    })
                    .collect::<CodecResult<Vec<_>>>()?;
                Ok(Compact::List(slots))
            }
        }
    }

    /// Inverse of [`CodecNode::encode`]. `None` means absent.
    ///
    /// An absent vector decodes to `[]`: absence and emptiness share one
    /// encoding, and the empty sequence is the value callers expect back.
    pub fn decode(&self, compact: &Compact, path: &str) -> CodecResult<Option<Value>> {
        match self {
            Self::Atomic { codec } => codec.decode(compact, path),
            Self::Object { fields } => {
                let Some(slots) = self.slots(compact, path)? else {
                    return Ok(None);
                };
                let mut map = Map::new();
                for (i, field) in fields.iter().enumerate() {
                    let slot = slots.get(i).unwrap_or(&Compact::Absent);
                    if let Some(v) = field.node.decode(slot, &join_path(path, &field.name))? {
                        map.insert(field.name.clone(), v);
                    }
                }
                Ok(Some(Value::Object(map)))
            }
            Self::Array { elements } => {
                let Some(slots) = self.slots(compact, path)? else {
                    return Ok(None);
                };
                let items = elements
                    .iter()
                    .enumerate()
                    .map(|(i, node)| {
                        let slot = slots.get(i).unwrap_or(&Compact::Absent);
                        node.decode(slot, &join_path(path, &i.to_string()))
                            .map(|v| v.unwrap_or(Value::Null))
                    })
                    .collect::<CodecResult<Vec<_>>>()?;
                Ok(Some(Value::Array(items)))
            }
            Self::Vector { pattern } => {
                let Some(slots) = self.slots(compact, path)? else {
                    return Ok(Some(Value::Array(Vec::new())));
                };
                let items = slots
                    .iter()
                    .enumerate()
                    .map(|(i, slot)| {
                        pattern[i % pattern.len()]
                            .decode(slot, &join_path(path, &i.to_string()))
                            .map(|v| v.unwrap_or(Value::Null))
                    })
                    .collect::<CodecResult<Vec<_>>>()?;
                Ok(Some(Value::Array(items)))
            }
        }
    }

    /// Slots of a composite's compact value, `None` when absent.
    fn slots<'c>(&self, compact: &'c Compact, path: &str) -> CodecResult<Option<&'c [Compact]>> {
        match compact {
            Compact::Absent => Ok(None),
            Compact::List(slots) => {
                self.check_arity(slots.len(), path)?;
                Ok(Some(slots))
            }
            other => Err(shape(path, "list", &other.to_json())),
        }
    }

    /// Render a compact value as JSON: absent composites become `0`, absent
    /// atoms become `null`.
    pub fn to_wire(&self, compact: &Compact, path: &str) -> CodecResult<Value> {
        if !self.is_composite() {
            return Ok(compact.to_json());
        }
        match compact {
            Compact::Absent => Ok(Value::from(0)),
            Compact::List(slots) => {
                self.check_arity(slots.len(), path)?;
                slots
                    .iter()
                    .enumerate()
                    .map(|(i, slot)| match self.slot(i) {
                        Some((node, segment)) => node.to_wire(slot, &join_path(path, &segment)),
                        None => Ok(slot.to_json()),
                    })
                    .collect::<CodecResult<Vec<_>>>()
                    .map(Value::Array)
            }
            other => Err(shape(path, "list", &other.to_json())),
        }
    }

    /// Parse the JSON produced by [`CodecNode::to_wire`].
    pub fn from_wire(&self, wire: &Value, path: &str) -> CodecResult<Compact> {
        match self {
            Self::Atomic { codec } => match (codec, wire) {
                (_, Value::Null) => Ok(Compact::Absent),
                (Atom::Passthrough, v) => Ok(Compact::Raw(v.clone())),
                (_, Value::Number(n)) => n
                    .as_i64()
                    .map(Compact::Int)
                    .ok_or_else(|| shape(path, "integer", wire)),
                (_, other) => Err(shape(path, "integer", other)),
            },
            _ => match wire {
                Value::Null => Ok(Compact::Absent),
                Value::Number(n) if n.as_f64() == Some(0.0) => Ok(Compact::Absent),
                Value::Array(items) => {
                    self.check_arity(items.len(), path)?;
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| match self.slot(i) {
                            Some((node, segment)) => node.from_wire(item, &join_path(path, &segment)),
                            None => Ok(Compact::Raw(item.clone())),
                        })
                        .collect::<CodecResult<Vec<_>>>()
                        .map(Compact::List)
                }
                other => Err(shape(path, "array or 0", other)),
            },
        }
    }

    fn check_arity(&self, found: usize, path: &str) -> CodecResult<()> {
        match self.arity() {
            Some(expected) if found > expected => Err(CodecError::ArityMismatch {
                path: path.to_string(),
                expected,
                found,
            }),
            _ => Ok(()),
        }
    }
}

fn shape(path: &str, expected: &'static str, found: &Value) -> CodecError {
    CodecError::ShapeMismatch {
        path: path.to_string(),
        expected,
        found: kind_of(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn atomic(codec: Atom) -> CodecNode {
        CodecNode::Atomic { codec }
    }

    fn pair() -> CodecNode {
        CodecNode::Object {
            fields: vec![
                Field {
                    name: "asc".to_string(),
                    node: atomic(Atom::boolean()),
                },
                Field {
                    name: "key".to_string(),
                    node: atomic(Atom::enumeration(["a", "b", "c"])),
                },
            ],
        }
    }

    #[test]
    fn object_absent_and_empty_encode_to_absent() {
        let node = pair();
        assert_eq!(node.encode(None, "/").unwrap(), Compact::Absent);
        assert_eq!(node.encode(Some(&json!(null)), "/").unwrap(), Compact::Absent);
        assert_eq!(node.encode(Some(&json!({})), "/").unwrap(), Compact::Absent);
        assert_eq!(node.decode(&Compact::Absent, "/").unwrap(), None);
    }

    #[test]
    fn object_sparse_decode_omits_absent_fields() {
        let node = pair();
        let c = node.encode(Some(&json!({"key": "b"})), "/").unwrap();
        assert_eq!(c, Compact::List(vec![Compact::Absent, Compact::Int(1)]));
        assert_eq!(node.decode(&c, "/").unwrap(), Some(json!({"key": "b"})));
    }

    #[test]
    fn populated_object_with_only_zero_values_is_a_list() {
        let node = pair();
        let c = node.encode(Some(&json!({"asc": false, "key": "a"})), "/").unwrap();
        assert_eq!(c, Compact::List(vec![Compact::Int(0), Compact::Int(0)]));
        assert_eq!(node.to_wire(&c, "/").unwrap(), json!([0, 0]));
    }

    #[test]
    fn object_rejects_undeclared_field() {
        let err = pair()
            .encode(Some(&json!({"key": "a", "ascending": true})), "/order/0")
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownField {
                path: "/order/0".to_string(),
                field: "ascending".to_string(),
            }
        );
    }

    #[test]
    fn object_rejects_non_object() {
        let err = pair().encode(Some(&json!([1])), "/x").unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { expected: "object", .. }));
    }

    #[test]
    fn array_fixed_arity() {
        let node = CodecNode::Array {
            elements: vec![atomic(Atom::integer()), atomic(Atom::boolean())],
        };
        let c = node.encode(Some(&json!([4, true])), "/").unwrap();
        assert_eq!(c, Compact::List(vec![Compact::Int(4), Compact::Int(1)]));
        assert_eq!(node.decode(&c, "/").unwrap(), Some(json!([4, true])));

        let err = node.encode(Some(&json!([1, true, 3])), "/").unwrap_err();
        assert_eq!(
            err,
            CodecError::ArityMismatch {
                path: "/".to_string(),
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn array_absent_element_decodes_to_null() {
        let node = CodecNode::Array {
            elements: vec![atomic(Atom::integer()), atomic(Atom::integer())],
        };
        let c = node.encode(Some(&json!([4])), "/").unwrap();
        assert_eq!(node.decode(&c, "/").unwrap(), Some(json!([4, null])));
    }

    #[test]
    fn vector_cycles_pattern() {
        let node = CodecNode::Vector {
            pattern: vec![atomic(Atom::enumeration(["x", "y"])), atomic(Atom::boolean())],
        };
        let value = json!(["y", true, "x", false, "y"]);
        let c = node.encode(Some(&value), "/").unwrap();
        assert_eq!(
            c.to_json(),
            json!([1, 1, 0, 0, 1])
        );
        assert_eq!(node.decode(&c, "/").unwrap(), Some(value));
    }

    #[test]
    fn vector_absent_decodes_to_empty() {
        let node = CodecNode::Vector {
            pattern: vec![atomic(Atom::integer())],
        };
        assert_eq!(node.encode(Some(&json!([])), "/").unwrap(), Compact::Absent);
        assert_eq!(node.decode(&Compact::Absent, "/").unwrap(), Some(json!([])));
    }

    #[test]
    fn decode_errors_carry_field_path() {
        let node = CodecNode::Object {
            fields: vec![Field {
                name: "order".to_string(),
                node: CodecNode::Vector { pattern: vec![pair()] },
            }],
        };
        let c = Compact::List(vec![Compact::List(vec![Compact::List(vec![
            Compact::Int(0),
            Compact::Int(9),
        ])])]);
        let err = node.decode(&c, "/").unwrap_err();
        assert_eq!(
            err,
            CodecError::IndexOutOfRange {
                path: "/order/0/key".to_string(),
                index: 9,
                len: 3,
            }
        );
    }

    #[test]
    fn decode_rejects_extra_slots() {
        let c = Compact::List(vec![Compact::Int(0), Compact::Int(0), Compact::Int(0)]);
        assert!(matches!(
            pair().decode(&c, "/").unwrap_err(),
            CodecError::ArityMismatch { expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn wire_distinguishes_absent_atom_from_index_zero() {
        let node = pair();
        let c = Compact::List(vec![Compact::Absent, Compact::Int(0)]);
        let wire = node.to_wire(&c, "/").unwrap();
        assert_eq!(wire, json!([null, 0]));
        assert_eq!(node.from_wire(&wire, "/").unwrap(), c);
    }

    #[test]
    fn wire_zero_at_composite_is_absent() {
        let node = CodecNode::Object {
            fields: vec![
                Field {
                    name: "a".to_string(),
                    node: pair(),
                },
                Field {
                    name: "b".to_string(),
                    node: atomic(Atom::integer()),
                },
            ],
        };
        let c = node.from_wire(&json!([0, 0]), "/").unwrap();
        assert_eq!(c, Compact::List(vec![Compact::Absent, Compact::Int(0)]));
        assert_eq!(node.decode(&c, "/").unwrap(), Some(json!({"b": 0})));
    }

    #[test]
    fn from_wire_rejects_string_at_enumeration() {
        let err = pair().from_wire(&json!([1, "b"]), "/").unwrap_err();
        assert_eq!(
            err,
            CodecError::ShapeMismatch {
                path: "/key".to_string(),
                expected: "integer",
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn node_count_and_serialization() {
        let node = CodecNode::Vector { pattern: vec![pair()] };
        assert_eq!(node.node_count(), 4);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "vector");
        assert_eq!(json["pattern"][0]["kind"], "object");
        assert_eq!(json["pattern"][0]["fields"][1]["name"], "key");
        assert_eq!(
            json["pattern"][0]["fields"][1]["node"]["codec"]["domain"],
            json!(["a", "b", "c"])
        );
    }
}
