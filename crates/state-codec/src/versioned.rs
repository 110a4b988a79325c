//! Versioned wire envelope.
//!
//! The wire form is `[version, body]`. Decoding reads the version first and
//! dispatches to the codec registered for it, so links produced under an
//! older schema keep decoding as long as that schema stays registered.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::codec::StateCodec;
use crate::error::{CodecError, CodecResult};

/// Codecs keyed by schema version, with one current version for encoding.
#[derive(Debug, Clone)]
pub struct VersionedCodec {
    current: u32,
    codecs: BTreeMap<u32, StateCodec>,
}

impl VersionedCodec {
    pub fn new(version: u32, codec: StateCodec) -> Self {
        let mut codecs = BTreeMap::new();
        codecs.insert(version, codec);
        Self {
            current: version,
            codecs,
        }
    }

    /// Keep decoding links produced under an older schema version.
    pub fn with_legacy(mut self, version: u32, codec: StateCodec) -> Self {
        if version != self.current {
            self.codecs.insert(version, codec);
        }
        self
    }

    pub fn current_version(&self) -> u32 {
        self.current
    }

    pub fn current(&self) -> &StateCodec {
        &self.codecs[&self.current]
    }

    pub fn supported_versions(&self) -> Vec<u32> {
        self.codecs.keys().copied().collect()
    }

    pub fn codec_for(&self, version: u32) -> Option<&StateCodec> {
        self.codecs.get(&version)
    }

    /// Encode with the current schema into `[version, body]`.
    pub fn encode(&self, value: &Value) -> CodecResult<Value> {
        let body = self.current().encode_wire(value)?;
        Ok(Value::Array(vec![Value::from(self.current), body]))
    }

    pub fn decode(&self, wire: &Value) -> CodecResult<Option<Value>> {
        let (version, body) = split_envelope(wire)?;
        let codec = u32::try_from(version)
            .ok()
            .and_then(|v| self.codecs.get(&v))
            .ok_or_else(|| CodecError::UnsupportedVersion {
                found: version,
                supported: self.supported_versions(),
            })?;
        tracing::debug!(version, "decoding versioned state");
        codec.decode_wire(body)
    }
}

/// Leading version of a wire envelope.
pub fn version_of(wire: &Value) -> CodecResult<u64> {
    split_envelope(wire).map(|(version, _)| version)
}

fn split_envelope(wire: &Value) -> CodecResult<(u64, &Value)> {
    let items = wire.as_array().ok_or(CodecError::MissingVersion)?;
    let version = items
        .first()
        .and_then(Value::as_u64)
        .ok_or(CodecError::MissingVersion)?;
    match items.len() {
        2 => Ok((version, &items[1])),
        found => Err(CodecError::ArityMismatch {
            path: "/".to_string(),
            expected: 2,
            found,
        }),
    }
}
