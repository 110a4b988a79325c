//! loom-state-codec - schema-driven compact codec for view-state.
//!
//! A [`Schema`] describes the shape of a JSON value with atomic codecs at the
//! leaves ([`Atom`]) and fixed objects, fixed arrays and cyclic vectors above
//! them. [`StateCodec::compile`] turns it into an immutable [`CodecNode`]
//! tree, and the codec's `encode`/`decode` turn values into positional
//! [`Compact`] values and back: field names disappear, enumerated values
//! become small indices.
//!
//! ```
//! use loom_state_codec::{Atom, Schema, StateCodec};
//! use serde_json::json;
//!
//! let keys = Atom::sorted_keys(["Name", "Age", "Class"]);
//! let codec = StateCodec::compile(&Schema::object([(
//!     "order",
//!     Schema::vector([Schema::object([
//!         ("key", keys.into()),
//!         ("asc", Schema::boolean()),
//!     ])]),
//! )]))
//! .unwrap();
//!
//! let state = json!({"order": [{"key": "Class", "asc": true}]});
//! let wire = codec.encode_wire(&state).unwrap();
//! assert_eq!(wire, json!([[[1, 1]]]));
//! assert_eq!(codec.decode_wire(&wire).unwrap(), Some(state));
//! ```

mod atom;
mod codec;
mod compact;
mod compile;
mod error;
mod node;
mod schema;
mod versioned;

pub use atom::{Atom, Domain};
pub use codec::{make_codec, DecoderFn, EncoderFn, StateCodec};
pub use compact::Compact;
pub use compile::compile;
pub use error::{CodecError, CodecResult, SchemaError};
pub use node::{CodecNode, Field};
pub use schema::Schema;
pub use versioned::{version_of, VersionedCodec};
