//! MOUNT/UNMOUNT lifecycle hooks for schema resources.
//!
//! MOUNT makes sure `<base>/resource/schemas/<name>.json` exists, writing a
//! default [`SchemaRecord`] when it does not, and hands back the path as a
//! [`MountBinding`]. UNMOUNT deletes that file and drops the schemas directory
//! once nothing else lives there. Both are idempotent and keep no state between
//! calls: the path is recomputed from the node key every time.
//!
//! Creation goes through a temporary file that is published with a no-clobber
//! rename, so concurrent mounts of one name leave exactly one complete file and
//! never overwrite an existing document. Removal acts first and treats
//! "already gone" as success instead of checking beforehand.

use crate::layout::SchemaLayout;
use crate::node_key::NodeKey;
use crate::record::SchemaRecord;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Optional parameters passed through by the mounting framework. Accepted and
/// ignored by the schema hooks.
pub type HookParams = Map<String, Value>;

/// Binding metadata returned by MOUNT.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MountBinding {
    pub resource_space: String,
}

impl MountBinding {
    fn for_path(path: &Path) -> Self {
        Self {
            resource_space: path.to_string_lossy().into_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.resource_space)
    }
}

/// Whether MOUNT wrote the document or found one already in place.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MountOutcome {
    Created,
    Existing,
}

/// Hook pair as seen by a mounting framework.
///
/// `on_mount` may legitimately bind nothing, hence the `Option`; the schema
/// hooks always bind.
pub trait ResourceHook {
    fn on_mount(&self, key: &NodeKey, params: Option<&HookParams>)
    -> Result<Option<MountBinding>>;

    fn on_unmount(&self, key: &NodeKey, params: Option<&HookParams>) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct SchemaHooks {
    layout: SchemaLayout,
}

impl SchemaHooks {
    pub fn new(layout: SchemaLayout) -> Self {
        Self { layout }
    }

    /// Hooks rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(SchemaLayout::from_current_dir()?))
    }

    pub fn layout(&self) -> &SchemaLayout {
        &self.layout
    }

    /// Path MOUNT and UNMOUNT use for `key`, without touching the filesystem.
    pub fn resource_space(&self, key: &NodeKey) -> PathBuf {
        self.layout.resource_space(key)
    }

    pub fn mount(&self, key: &NodeKey, params: Option<&HookParams>) -> Result<MountBinding> {
        self.mount_with_outcome(key, params)
            .map(|(binding, _)| binding)
    }

    /// MOUNT, also reporting whether the document was written by this call.
    pub fn mount_with_outcome(
        &self,
        key: &NodeKey,
        _params: Option<&HookParams>,
    ) -> Result<(MountBinding, MountOutcome)> {
        let path = self.resource_space(key);
        log::trace!("mount {key} -> {}", path.display());

        let exists = path
            .try_exists()
            .with_context(|| format!("checking schema file {}", path.display()))?;
        let outcome = if exists {
            MountOutcome::Existing
        } else {
            create_default_record(&path, key.name())?
        };

        match outcome {
            MountOutcome::Created => log::debug!("created schema {}", path.display()),
            MountOutcome::Existing => log::debug!("schema {} already present", path.display()),
        }
        Ok((MountBinding::for_path(&path), outcome))
    }

    pub fn unmount(&self, key: &NodeKey, _params: Option<&HookParams>) -> Result<()> {
        let path = self.resource_space(key);
        log::trace!("unmount {key} -> {}", path.display());

        match fs::remove_file(&path) {
            Ok(()) => log::debug!("removed schema {}", path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("schema {} not present; nothing to remove", path.display());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("removing schema file {}", path.display()));
            }
        }

        remove_dir_if_empty(&self.layout.schemas_dir())
    }
}

impl ResourceHook for SchemaHooks {
    fn on_mount(
        &self,
        key: &NodeKey,
        params: Option<&HookParams>,
    ) -> Result<Option<MountBinding>> {
        self.mount(key, params).map(Some)
    }

    fn on_unmount(&self, key: &NodeKey, params: Option<&HookParams>) -> Result<()> {
        self.unmount(key, params)
    }
}

/// MOUNT against the working directory, taking the node key as raw text.
pub fn mount_schema(node_key: &str, params: Option<&HookParams>) -> Result<MountBinding> {
    let key = NodeKey::parse(node_key)?;
    SchemaHooks::from_current_dir()?.mount(&key, params)
}

/// UNMOUNT against the working directory, taking the node key as raw text.
pub fn unmount_schema(node_key: &str, params: Option<&HookParams>) -> Result<()> {
    let key = NodeKey::parse(node_key)?;
    SchemaHooks::from_current_dir()?.unmount(&key, params)
}

fn create_default_record(path: &Path, name: &str) -> Result<MountOutcome> {
    let Some(dir) = path.parent() else {
        bail!("schema path {} has no parent directory", path.display());
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("creating schema directory {}", dir.display()))?;

    let bytes = SchemaRecord::with_defaults(name)
        .to_json_bytes()
        .context("serializing default schema record")?;

    let mut builder = Builder::new();
    builder.prefix(".").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let mut staged = builder
        .tempfile_in(dir)
        .with_context(|| format!("staging schema file in {}", dir.display()))?;
    staged
        .as_file_mut()
        .write_all(&bytes)
        .with_context(|| format!("writing staged schema for {}", path.display()))?;

    match staged.persist_noclobber(path) {
        Ok(_) => Ok(MountOutcome::Created),
        // Another mount published first; its document stands.
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => Ok(MountOutcome::Existing),
        Err(err) => {
            Err(err.error).with_context(|| format!("publishing schema file {}", path.display()))
        }
    }
}

fn remove_dir_if_empty(dir: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("listing schema directory {}", dir.display()));
        }
    };
    if entries.next().is_some() {
        return Ok(());
    }

    match fs::remove_dir(dir) {
        Ok(()) => {
            log::debug!("removed empty schema directory {}", dir.display());
            Ok(())
        }
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::DirectoryNotEmpty
            ) =>
        {
            Ok(())
        }
        Err(err) => {
            Err(err).with_context(|| format!("removing schema directory {}", dir.display()))
        }
    }
}
