//! Logger setup for the `schema-hook` binary.

use env_logger::Env;
use std::io::Write;

/// Install the stderr logger used by the helper binary.
///
/// Filtering comes from `RUST_LOG` and defaults to `warn`, keeping stdout free
/// for the JSON the mounting framework reads.
pub fn init_logging() {
    match env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .try_init()
    {
        Ok(()) => (),
        Err(_) => {
            // A logger is already installed, e.g. by an embedding test harness
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_init_is_harmless() {
        init_logging();
        init_logging();
        log::debug!("logger initialised twice");
    }
}
