//! Common paths for Wren data storage
//!
//! Wren keeps a single file, ~/.config/wren/config.toml, on all platforms.
//! Nothing else is written to disk.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the Wren config directory (~/.config/wren/)
pub fn wren_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("wren"))
}

/// Get the config file path (~/.config/wren/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(wren_dir()?.join("config.toml"))
}
