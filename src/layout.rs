//! Where schema resources live on disk.
//!
//! Every schema file sits at `<base>/resource/schemas/<name>.json`. The base
//! is injected by the caller; `from_current_dir` reproduces the classic
//! working-directory convention.

use crate::node_key::NodeKey;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const RESOURCE_DIR: &str = "resource";
pub const SCHEMAS_DIR: &str = "schemas";
pub const SCHEMA_EXTENSION: &str = "json";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaLayout {
    base: PathBuf,
}

impl SchemaLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Layout rooted at the process working directory, resolved once.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = env::current_dir().context("reading current working directory")?;
        Ok(Self::new(cwd))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Directory holding every schema file (`<base>/resource/schemas`).
    pub fn schemas_dir(&self) -> PathBuf {
        self.base.join(RESOURCE_DIR).join(SCHEMAS_DIR)
    }

    /// Resource space for `key`; pure function of the key and the base.
    pub fn resource_space(&self, key: &NodeKey) -> PathBuf {
        self.schemas_dir()
            .join(format!("{}.{SCHEMA_EXTENSION}", key.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_space_uses_final_segment() {
        let layout = SchemaLayout::new("/srv/noodle");
        let key = NodeKey::parse("foo.bar.Baz").unwrap();
        assert_eq!(
            layout.resource_space(&key),
            PathBuf::from("/srv/noodle/resource/schemas/Baz.json")
        );
    }

    #[test]
    fn keys_sharing_a_name_share_a_path() {
        let layout = SchemaLayout::new("base");
        let a = NodeKey::parse("one.Grid").unwrap();
        let b = NodeKey::parse("two.other.Grid").unwrap();
        assert_eq!(layout.resource_space(&a), layout.resource_space(&b));
    }

    #[test]
    fn current_dir_layout_is_absolute() {
        let layout = SchemaLayout::from_current_dir().expect("cwd available");
        assert!(layout.base().is_absolute());
        assert!(layout.schemas_dir().ends_with("resource/schemas"));
    }
}
