use anyhow::{Context, Result, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// `schema-hook` built by Cargo for this test run.
pub fn helper_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_schema-hook"))
}

/// Invoke the helper with `base` as its working directory.
pub fn hook_command(base: &Path) -> Command {
    let mut cmd = Command::new(helper_binary());
    cmd.current_dir(base).env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Validate a freshly written document against `schema/schema_record.json`.
pub fn assert_matches_record_schema(document: &Value) -> Result<()> {
    static RECORD_SCHEMA: OnceLock<Value> = OnceLock::new();
    let schema_value = if let Some(existing) = RECORD_SCHEMA.get() {
        existing
    } else {
        let schema_path = repo_root().join("schema/schema_record.json");
        let loaded: Value = serde_json::from_reader(
            File::open(&schema_path)
                .with_context(|| format!("opening {}", schema_path.display()))?,
        )?;
        RECORD_SCHEMA.get_or_init(move || loaded)
    };

    let compiled = JSONSchema::compile(schema_value)?;
    if let Err(errors) = compiled.validate(document) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("schema document failed validation:\n{details}");
    }
    Ok(())
}
