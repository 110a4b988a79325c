//! Compiled codec pair.

use std::sync::Arc;

use serde_json::Value;

use crate::compact::Compact;
use crate::compile::compile;
use crate::error::{CodecResult, SchemaError};
use crate::node::CodecNode;
use crate::schema::Schema;

/// A shareable encoder function.
pub type EncoderFn = Arc<dyn Fn(&Value) -> CodecResult<Compact> + Send + Sync>;

/// A shareable decoder function. `None` means the value was absent.
pub type DecoderFn = Arc<dyn Fn(&Compact) -> CodecResult<Option<Value>> + Send + Sync>;

const ROOT: &str = "/";

/// An immutable `{encode, decode}` pair compiled from one schema.
///
/// Cloning is cheap; clones share the compiled tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StateCodec {
    root: Arc<CodecNode>,
}

impl StateCodec {
    pub fn compile(schema: &Schema) -> Result<Self, SchemaError> {
        let root = compile(schema)?;
        tracing::debug!(nodes = root.node_count(), "compiled state codec");
        Ok(Self {
            root: Arc::new(root),
        })
    }

    pub fn root(&self) -> &CodecNode {
        &self.root
    }

    /// Encode a value. JSON `null` is treated as absent.
    pub fn encode(&self, value: &Value) -> CodecResult<Compact> {
        self.root.encode(Some(value), ROOT)
    }

    pub fn decode(&self, compact: &Compact) -> CodecResult<Option<Value>> {
        self.root.decode(compact, ROOT)
    }

    /// Render a compact value as the JSON handed to the link layer.
    pub fn to_wire(&self, compact: &Compact) -> CodecResult<Value> {
        self.root.to_wire(compact, ROOT)
    }

    pub fn from_wire(&self, wire: &Value) -> CodecResult<Compact> {
        self.root.from_wire(wire, ROOT)
    }

    pub fn encode_wire(&self, value: &Value) -> CodecResult<Value> {
        self.to_wire(&self.encode(value)?)
    }

    pub fn decode_wire(&self, wire: &Value) -> CodecResult<Option<Value>> {
        self.decode(&self.from_wire(wire)?)
    }

    pub fn encoder(&self) -> EncoderFn {
        let root = Arc::clone(&self.root);
        Arc::new(move |value: &Value| root.encode(Some(value), ROOT))
    }

    pub fn decoder(&self) -> DecoderFn {
        let root = Arc::clone(&self.root);
        Arc::new(move |compact: &Compact| root.decode(compact, ROOT))
    }

    /// JSON description of the compiled tree, for debugging.
    pub fn describe(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&*self.root)
    }
}

/// Compile `schema` into its codec pair.
pub fn make_codec(schema: &Schema) -> Result<StateCodec, SchemaError> {
    StateCodec::compile(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use serde_json::json;

    fn sample() -> StateCodec {
        make_codec(&Schema::object([
            ("search", Schema::passthrough()),
            ("zoom", Schema::integer()),
            ("mode", Atom::enumeration(["Text", "Bars"]).into()),
        ]))
        .unwrap()
    }

    #[test]
    fn encode_decode_round_trip() {
        let codec = sample();
        let v = json!({"search": "Actb", "zoom": 8, "mode": "Bars"});
        let c = codec.encode(&v).unwrap();
        // fields sorted: mode, search, zoom
        assert_eq!(c.to_json(), json!([1, "Actb", 8]));
        assert_eq!(codec.decode(&c).unwrap(), Some(v));
    }

    #[test]
    fn closures_match_methods() {
        let codec = sample();
        let encode = codec.encoder();
        let decode = codec.decoder();
        let v = json!({"mode": "Text"});
        let c = encode(&v).unwrap();
        assert_eq!(c, codec.encode(&v).unwrap());
        assert_eq!(decode(&c).unwrap(), Some(v));
    }

    #[test]
    fn wire_round_trip() {
        let codec = sample();
        let v = json!({"mode": "Text", "zoom": 0});
        let wire = codec.encode_wire(&v).unwrap();
        assert_eq!(wire, json!([0, null, 0]));
        assert_eq!(codec.decode_wire(&wire).unwrap(), Some(v));
        assert_eq!(codec.encode_wire(&json!(null)).unwrap(), json!(0));
        assert_eq!(codec.decode_wire(&json!(0)).unwrap(), None);
    }

    #[test]
    fn describe_lists_sorted_fields() {
        let d = sample().describe().unwrap();
        assert_eq!(d["kind"], "object");
        let names: Vec<&str> = d["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["mode", "search", "zoom"]);
    }
}
