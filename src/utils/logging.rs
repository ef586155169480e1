//! File-backed logger.
//!
//! The terminal is in raw mode on the alternate screen while the game runs,
//! so log output goes to a file instead of stderr. `RUST_LOG` overrides the
//! default `info` filter.

use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::persistence::{app_path, LOG_FILE};

/// Start logging to `path`, truncating any previous log.
pub fn init_logging_to(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

/// Start logging to ~/.droplet-catch/droplet-catch.log. Returns the log path.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = app_path(LOG_FILE)?;
    init_logging_to(&path)?;
    Ok(path)
}
