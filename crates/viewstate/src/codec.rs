//! The per-dataset view-state codec.

use loom_state_codec::{Schema, StateCodec, VersionedCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ViewStateResult;
use crate::hydrate::merge_over;
use crate::keys::{DatasetKeys, KeyDomains};
use crate::options::ViewStateOptions;
use crate::schema::view_state_schema;

/// Encoder/decoder for one dataset's view state.
///
/// Build it once when the dataset is loaded and reuse it for the whole
/// session. The key domains are captured at construction, so a codec built
/// from differently ordered keys is a different codec.
#[derive(Debug, Clone)]
pub struct ViewStateCodec {
    codec: VersionedCodec,
    domains: KeyDomains,
}

impl ViewStateCodec {
    pub fn new(keys: &DatasetKeys, options: &ViewStateOptions) -> ViewStateResult<Self> {
        let domains = KeyDomains::new(keys, options.sort_keys);
        let schema = view_state_schema(&domains, options);
        let codec = StateCodec::compile(&schema)?;
        tracing::debug!(
            row_keys = keys.row_keys.len(),
            col_keys = keys.col_keys.len(),
            gene_keys = keys.gene_keys.len(),
            version = options.schema_version,
            "built view-state codec"
        );
        Ok(Self {
            codec: VersionedCodec::new(options.schema_version, codec),
            domains,
        })
    }

    /// Keep decoding links written under an older schema version.
    pub fn with_legacy(mut self, version: u32, schema: &Schema) -> ViewStateResult<Self> {
        let legacy = StateCodec::compile(schema)?;
        self.codec = self.codec.with_legacy(version, legacy);
        Ok(self)
    }

    pub fn domains(&self) -> &KeyDomains {
        &self.domains
    }

    pub fn version(&self) -> u32 {
        self.codec.current_version()
    }

    pub fn versioned(&self) -> &VersionedCodec {
        &self.codec
    }

    /// Encode a view state into the `[version, body]` wire form.
    pub fn encode(&self, state: &Value) -> ViewStateResult<Value> {
        Ok(self.codec.encode(state)?)
    }

    /// Decode a wire value. `None` means the link carried no state.
    pub fn decode(&self, wire: &Value) -> ViewStateResult<Option<Value>> {
        Ok(self.codec.decode(wire)?)
    }

    pub fn encode_state<T: Serialize>(&self, state: &T) -> ViewStateResult<Value> {
        self.encode(&serde_json::to_value(state)?)
    }

    pub fn decode_state<T: DeserializeOwned>(&self, wire: &Value) -> ViewStateResult<Option<T>> {
        self.decode(wire)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Compact JSON text of an encoded state, ready for compression and URL
    /// embedding.
    pub fn to_link_text(&self, state: &Value) -> ViewStateResult<String> {
        Ok(serde_json::to_string(&self.encode(state)?)?)
    }

    pub fn from_link_text(&self, text: &str) -> ViewStateResult<Option<Value>> {
        let wire: Value = serde_json::from_str(text)?;
        self.decode(&wire)
    }

    /// Seed a session from a shared link.
    ///
    /// The decoded state is merged over `defaults`. A link that fails to
    /// decode is discarded and `defaults` returned unchanged; this never
    /// fails.
    pub fn hydrate(&self, wire: &Value, defaults: &Value) -> Value {
        match self.decode(wire) {
            Ok(Some(state)) => merge_over(defaults, &state),
            Ok(None) => defaults.clone(),
            Err(err) => {
                tracing::warn!(error = %err, "discarding shared view state, using dataset defaults");
                defaults.clone()
            }
        }
    }

    /// [`ViewStateCodec::hydrate`] from link text.
    pub fn hydrate_link(&self, text: &str, defaults: &Value) -> Value {
        match serde_json::from_str::<Value>(text) {
            Ok(wire) => self.hydrate(&wire, defaults),
            Err(err) => {
                tracing::warn!(error = %err, "shared view state is not valid JSON, using dataset defaults");
                defaults.clone()
            }
        }
    }
}
