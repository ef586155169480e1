//! Locations of the files the game reads and writes under ~/.droplet-catch/.
//!
//! Nothing about a play session is saved; the directory only holds the
//! optional config file and the log.

use std::fs;
use std::io;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "droplet-catch.log";

/// Get the ~/.droplet-catch/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".droplet-catch");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.droplet-catch/.
pub fn app_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Default config file location.
pub fn default_config_path() -> io::Result<PathBuf> {
    app_path(CONFIG_FILE)
}
