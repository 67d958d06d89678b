//! Node keys and the schema names derived from them.
//!
//! A node key is a dot-delimited identifier handed to the hooks by the
//! mounting framework (e.g., `crms.schema.Baz`). Only the final segment is
//! meaningful here: it names the schema and therefore the backing file.

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

/// Validated node key.
///
/// Construction rejects keys whose final segment could not name a file inside
/// the schemas directory, so every `NodeKey` maps to exactly one resource path.
/// A trailing dot leaves an empty name, which maps to `.json`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(invalid_key(raw, "node key must not be empty").into());
        }
        let name = derive_name(raw);
        if name.contains(['/', '\\', '\0']) {
            return Err(invalid_key(raw, "final segment is not a plain file name").into());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Schema name: the text after the last `.`, or the whole key.
    pub fn name(&self) -> &str {
        derive_name(&self.0)
    }
}

/// Substring after the last `.`; the whole input when there is none.
pub fn derive_name(node_key: &str) -> &str {
    node_key
        .rsplit_once('.')
        .map(|(_, last)| last)
        .unwrap_or(node_key)
}

fn invalid_key(raw: &str, reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid node key '{raw}': {reason}"),
    )
}

impl FromStr for NodeKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
