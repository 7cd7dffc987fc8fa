//! Unified path management for freightline client files.
//!
//! All durable client state (the persisted session record and the
//! optional configuration file) lives under one platform config
//! directory so storage and config stay discoverable together.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/freightline/       # Config directory (platform-dependent)
//! ├── config.toml              # API configuration (optional)
//! └── session.json             # Persisted session record
//! ```

use freightline_core::error::{FreightlineError, Result};
use std::path::PathBuf;

/// Unified path management for the client core.
pub struct FreightlinePaths;

impl FreightlinePaths {
    /// Returns the freightline configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a config error if the platform config directory cannot
    /// be determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("freightline"))
            .ok_or_else(|| FreightlineError::config("cannot determine config directory"))
    }

    /// Returns the path to the optional API configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session record.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
