//! Persisted schema document.
//!
//! Mirrors the JSON written by MOUNT when no file exists yet. Field order in
//! the struct is the field order on disk, and the origin keeps JSON numbers
//! as-is so a fresh document reads `[0,0]` rather than `[0.0,0.0]`. Once
//! written the document belongs to whoever edits it; the hooks never check or
//! rewrite its contents.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// EPSG code for WGS 84, used when a schema is first created.
pub const DEFAULT_EPSG: i64 = 4326;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    pub name: String,
    pub epsg: i64,
    pub alignment_origin: [Number; 2],
    pub grid_info: Vec<Value>,
}

impl SchemaRecord {
    /// Default document for a freshly mounted schema called `name`.
    pub fn with_defaults(name: &str) -> Self {
        Self {
            name: name.to_string(),
            epsg: DEFAULT_EPSG,
            alignment_origin: [Number::from(0), Number::from(0)],
            grid_info: Vec::new(),
        }
    }

    /// Compact JSON bytes as written to disk.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
