// Exercises the working-directory entry points. Kept in its own test binary
// with a single test because it changes the process working directory.

use anyhow::Result;
use schema_hooks::{mount_schema, parse_params, unmount_schema};
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn raw_key_hooks_follow_current_dir() -> Result<()> {
    let temp = TempDir::new()?;
    let base = fs::canonicalize(temp.path())?;
    let previous = env::current_dir()?;
    env::set_current_dir(&base)?;

    let params = parse_params(r#"{"source": "framework"}"#)?;
    let outcome = (|| -> Result<()> {
        let binding = mount_schema("foo.bar.Baz", Some(&params))?;
        assert_eq!(
            binding.path(),
            base.join("resource/schemas/Baz.json").as_path()
        );
        assert!(binding.path().is_file());

        let again = mount_schema("other.Baz", None)?;
        assert_eq!(binding, again);

        unmount_schema("foo.bar.Baz", None)?;
        assert!(!base.join("resource/schemas").exists());
        assert!(mount_schema("", None).is_err());
        Ok(())
    })();

    env::set_current_dir(previous)?;
    outcome
}
