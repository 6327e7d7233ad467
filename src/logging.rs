//! Logging setup
//! `env_logger` on stderr so log lines never mix into the report on stdout.

use anyhow::{Context, Result};
use env_logger::{Env, Target};
use log::LevelFilter;

/// Level for the number of `-v` flags given.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize the global logger. `RUST_LOG` overrides `verbosity`.
///
/// # Errors
///
/// Fails if a logger was already installed.
pub fn init(verbosity: u8) -> Result<()> {
    let default = level_for(verbosity).to_string().to_lowercase();

    env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logging")?;

    log::debug!("Logging initialized at {}", level_for(verbosity));
    Ok(())
}
