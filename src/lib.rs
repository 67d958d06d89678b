//! Lifecycle hooks for schema resources.
//!
//! A mounting framework calls MOUNT with a dot-delimited node key before a
//! schema is used and UNMOUNT when it is released. The backing storage is one
//! JSON document per schema name at `<base>/resource/schemas/<name>.json`;
//! MOUNT creates it with defaults when missing and UNMOUNT deletes it again.
//!
//! The public surface is small: [`SchemaHooks`] carries the injected base
//! directory, [`ResourceHook`] is the seam frameworks program against, and
//! [`mount_schema`]/[`unmount_schema`] keep the working-directory convention
//! for callers that only have a raw key.

use anyhow::{Context, Result, bail};
use serde_json::Value;

pub mod hooks;
pub mod layout;
pub mod logging;
pub mod node_key;
pub mod record;

pub use hooks::{
    HookParams, MountBinding, MountOutcome, ResourceHook, SchemaHooks, mount_schema,
    unmount_schema,
};
pub use layout::SchemaLayout;
pub use node_key::{NodeKey, derive_name};
pub use record::{DEFAULT_EPSG, SchemaRecord};

/// Parse a `--params` style argument into hook parameters.
///
/// Frameworks hand parameters over as a JSON object; anything else (arrays,
/// scalars, malformed text) is rejected so a typo does not silently pass.
pub fn parse_params(raw: &str) -> Result<HookParams> {
    let value: Value = serde_json::from_str(raw.trim()).context("parsing hook params as JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(HookParams::new()),
        _ => bail!("hook params must be a JSON object"),
    }
}
