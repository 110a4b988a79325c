//! loom-viewstate - shareable view state for the loom dataset viewer.
//!
//! A dataset's row, column and gene keys become enumeration domains, and
//! the view-state schema built over them compiles into a
//! [`ViewStateCodec`]. Encoded states are small positional JSON values of
//! the form `[version, body]`, cheap to compress into a URL.
//!
//! ```
//! use loom_viewstate::{DatasetKeys, ViewStateCodec, ViewStateOptions};
//! use serde_json::json;
//!
//! let keys = DatasetKeys::new(["Gene"], ["Age", "Class", "Name"], Vec::<&str>::new());
//! let codec = ViewStateCodec::new(&keys, &ViewStateOptions::default()).unwrap();
//!
//! let state = json!({"col": {"order": [{"key": "Class", "asc": true}], "filter": []}});
//! let wire = codec.encode(&state).unwrap();
//! assert_eq!(wire, json!([1, [0, [0, [[1, 1]], 0], 0, 0, 0, 0]]));
//! assert_eq!(codec.decode(&wire).unwrap(), Some(state));
//! ```

mod codec;
mod error;
mod hydrate;
mod keys;
mod options;
mod schema;
mod state;

pub use codec::ViewStateCodec;
pub use error::{ViewStateError, ViewStateResult};
pub use hydrate::merge_over;
pub use keys::{DatasetKeys, KeyDomains};
pub use options::ViewStateOptions;
pub use schema::view_state_schema;
pub use state::{
    AxisState, FilterPredicate, HeatmapState, LatLng, PlotAxis, PlotConfig, ScatterPlots,
    SearchState, SortKey, SparklineState, ViewState,
};
