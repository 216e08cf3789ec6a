//! Path management for clipsy configuration and storage files.
//!
//! ```text
//! ~/.config/clipsy/
//! ├── config.toml     # Application configuration
//! └── storage.toml    # Persisted key-value store (refresh token)
//! ```

use std::path::PathBuf;

use clipsy_core::error::{ClipsyError, Result};

const APP_DIR: &str = "clipsy";

pub struct ClipsyPaths;

impl ClipsyPaths {
    /// Returns the clipsy configuration directory (e.g. `~/.config/clipsy/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ClipsyError::io("cannot determine config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn storage_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("storage.toml"))
    }
}
