//! Unified path management for Mindful client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mindful/           # Config directory (platform equivalent elsewhere)
//! ├── config.toml              # Client configuration
//! └── token.json               # Persisted auth token
//! ```

use mindful_core::{MindfulError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "mindful";
const CONFIG_FILE: &str = "config.toml";
const TOKEN_FILE: &str = "token.json";

/// Resolves file locations, optionally rooted at a custom base directory.
#[derive(Debug, Clone, Default)]
pub struct MindfulPaths {
    base: Option<PathBuf>,
}

impl MindfulPaths {
    /// `base` replaces the platform config directory when given.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| MindfulError::config("Cannot determine config directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    pub fn token_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(TOKEN_FILE))
    }
}
