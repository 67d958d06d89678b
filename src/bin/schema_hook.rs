//! Process entry point for the schema lifecycle hooks.
//!
//! Frameworks that cannot link the library invoke `schema-hook mount <key>` or
//! `schema-hook unmount <key>`. MOUNT prints its binding as one line of JSON on
//! stdout; UNMOUNT prints nothing. Diagnostics go to stderr.

use anyhow::{Result, bail};
use schema_hooks::logging::init_logging;
use schema_hooks::{HookParams, NodeKey, SchemaHooks, SchemaLayout, parse_params};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let Some(action) = args.action else {
        print!("{}", usage());
        return Ok(());
    };

    let hooks = match args.root {
        Some(root) => SchemaHooks::new(SchemaLayout::new(root)),
        None => SchemaHooks::from_current_dir()?,
    };
    let params = args.params.as_ref();

    match action {
        Action::Mount(key) => {
            let binding = hooks.mount(&key, params)?;
            println!("{}", serde_json::to_string(&binding)?);
        }
        Action::Unmount(key) => hooks.unmount(&key, params)?,
        Action::Path(key) => println!("{}", hooks.resource_space(&key).display()),
    }
    Ok(())
}

#[derive(Debug)]
enum Action {
    Mount(NodeKey),
    Unmount(NodeKey),
    Path(NodeKey),
}

#[derive(Debug)]
struct CliArgs {
    /// `None` when help was requested.
    action: Option<Action>,
    root: Option<PathBuf>,
    params: Option<HookParams>,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut command: Option<String> = None;
        let mut node_key: Option<String> = None;
        let mut root = None;
        let mut params = None;

        while let Some(arg) = args.next() {
            let Some(text) = arg.to_str() else {
                bail!("arguments must be valid Unicode");
            };
            match text {
                "-h" | "--help" => {
                    return Ok(Self {
                        action: None,
                        root: None,
                        params: None,
                    });
                }
                "--root" => {
                    let Some(value) = args.next() else {
                        bail!("--root requires a directory");
                    };
                    root = Some(PathBuf::from(value));
                }
                "--params" => {
                    let Some(value) = args.next() else {
                        bail!("--params requires a JSON object");
                    };
                    let Some(value) = value.to_str() else {
                        bail!("--params must be valid Unicode");
                    };
                    params = Some(parse_params(value)?);
                }
                flag if flag.starts_with("--") => bail!("Unknown flag: {flag}\n\n{}", usage()),
                positional if command.is_none() => command = Some(positional.to_string()),
                positional if node_key.is_none() => node_key = Some(positional.to_string()),
                extra => bail!("Unexpected argument: {extra}"),
            }
        }

        let Some(command) = command else {
            bail!(usage());
        };
        let Some(node_key) = node_key else {
            bail!("{command} expects a node key");
        };
        let key = NodeKey::parse(&node_key)?;
        let action = match command.as_str() {
            "mount" => Action::Mount(key),
            "unmount" => Action::Unmount(key),
            "path" => Action::Path(key),
            other => bail!("Unknown subcommand: {other}"),
        };

        Ok(Self {
            action: Some(action),
            root,
            params,
        })
    }
}

fn usage() -> &'static str {
    "Usage: schema-hook <mount|unmount|path> <node_key> [--root DIR] [--params JSON]\n\nCommands:\n  mount <node_key>      Ensure the schema file exists and print {\"resource_space\": ...}.\n  unmount <node_key>    Delete the schema file and drop the schemas dir when empty.\n  path <node_key>       Print the schema file path without touching the filesystem.\n\nOptions:\n  --root DIR            Base directory holding resource/schemas (default: cwd).\n  --params JSON         Hook parameters as a JSON object (accepted, unused).\n"
}
