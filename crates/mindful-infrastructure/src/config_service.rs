//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `config.toml`, writing a default file on first
//! run, and applies environment overrides on top.

use mindful_core::Result;
use mindful_core::config::ClientConfig;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::MindfulPaths;

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "MINDFUL_API_URL";
/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "MINDFUL_LOG";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses the platform config location.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(MindfulPaths::default().config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load_or_create()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    fn load_or_create(&self) -> Result<ClientConfig> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            return ClientConfig::from_toml_str(&content);
        }

        tracing::info!("[ConfigService] Creating default config at {:?}", self.path);
        let config = ClientConfig::default();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, config.to_toml_string()?)?;
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
        tracing::debug!("[ConfigService] API URL overridden by {}", ENV_API_URL);
        config.api.base_url = url;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        config.logging.level = level;
    }
}
