//! Error types for loom-viewstate.

use loom_state_codec::{CodecError, SchemaError};
use thiserror::Error;

/// Main error type for view-state operations.
#[derive(Error, Debug)]
pub enum ViewStateError {
    /// The view-state schema failed to compile
    #[error("invalid view-state schema: {0}")]
    Schema(#[from] SchemaError),

    /// Encoding or decoding a state failed
    #[error("view-state codec error: {0}")]
    Codec(#[from] CodecError),

    /// Typed state or link text could not be (de)serialized
    #[error("view-state serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for view-state operations.
pub type ViewStateResult<T> = Result<T, ViewStateError>;
