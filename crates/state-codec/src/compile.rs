//! Schema compiler: resolves a [`Schema`] description into a [`CodecNode`]
//! tree.

use crate::error::{join_path, SchemaError};
use crate::node::{CodecNode, Field};
use crate::schema::Schema;

/// Compile a schema description.
///
/// Object fields are sorted by name, so two descriptions declaring the same
/// fields in a different order compile to the same tree. Any node that is
/// not a codec or a well-formed composite fails with its path.
pub fn compile(schema: &Schema) -> Result<CodecNode, SchemaError> {
    compile_at(schema, "/")
}

fn compile_at(schema: &Schema, path: &str) -> Result<CodecNode, SchemaError> {
    match schema {
        Schema::Atom(codec) => Ok(CodecNode::Atomic {
            codec: codec.clone(),
        }),
        Schema::Object(fields) => compile_object(fields, path),
        Schema::Array(elements) => {
            if elements.is_empty() {
                return Err(SchemaError::EmptyArray {
                    path: path.to_string(),
                });
            }
            Ok(CodecNode::Array {
                elements: compile_list(elements, path)?,
            })
        }
        Schema::Vector(pattern) => {
            if pattern.is_empty() {
                return Err(SchemaError::EmptyPattern {
                    path: path.to_string(),
                });
            }
            Ok(CodecNode::Vector {
                pattern: compile_list(pattern, path)?,
            })
        }
        Schema::Literal(literal) => Err(SchemaError::Literal {
            path: path.to_string(),
            literal: literal.clone(),
        }),
    }
}

fn compile_object(fields: &[(String, Schema)], path: &str) -> Result<CodecNode, SchemaError> {
    if fields.is_empty() {
        return Err(SchemaError::EmptyObject {
            path: path.to_string(),
        });
    }
    let mut sorted: Vec<&(String, Schema)> = fields.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut compiled: Vec<Field> = Vec::with_capacity(sorted.len());
    for (name, schema) in sorted {
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                path: path.to_string(),
            });
        }
        if compiled.last().is_some_and(|prev| prev.name == *name) {
            return Err(SchemaError::DuplicateField {
                path: path.to_string(),
                field: name.clone(),
            });
        }
        compiled.push(Field {
            name: name.clone(),
            node: compile_at(schema, &join_path(path, name))?,
        });
    }
    Ok(CodecNode::Object { fields: compiled })
}

fn compile_list(nodes: &[Schema], path: &str) -> Result<Vec<CodecNode>, SchemaError> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| compile_at(node, &join_path(path, &i.to_string())))
        .collect()
}
