//! Runtime configuration.
//!
//! Layered as: built-in defaults, then an optional `brandkit.toml`, then
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{BrandkitError, BrandkitResult};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "brandkit.toml";

/// Default Redis URL.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default model for brand classification.
pub const DEFAULT_AI_MODEL: &str = "claude-sonnet-4-20250514";

/// Where saved design systems live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Redis,
    Memory,
}

impl StorageBackend {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// AI classifier settings. The AI step is skipped when `api_key` is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandkitConfig {
    pub redis_url: String,
    pub storage: StorageBackend,
    pub ai: AiConfig,
    pub server: ServerConfig,
    /// Capacity of each memo cache in the palette generator.
    pub cache_capacity: usize,
    /// User ids allowed to read admin metrics.
    pub admin_users: Vec<String>,
}

impl Default for BrandkitConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            storage: StorageBackend::default(),
            ai: AiConfig::default(),
            server: ServerConfig::default(),
            cache_capacity: 512,
            admin_users: Vec::new(),
        }
    }
}

impl BrandkitConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; otherwise `brandkit.toml` in the current
    /// directory is used when present. Environment variables win over both.
    pub fn load(path: Option<&Path>) -> BrandkitResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> BrandkitResult<Self> {
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&text)
    }

    /// Parse TOML text.
    pub fn from_toml(text: &str) -> BrandkitResult<Self> {
        toml::from_str(text).map_err(|e| BrandkitError::config(e.to_string()))
    }

    /// Apply overrides from an environment lookup function.
    pub fn apply_env<F>(&mut self, lookup: F) -> BrandkitResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REDIS_URL") {
            self.redis_url = url;
        }
        if let Some(key) = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = lookup("BRANDKIT_AI_MODEL") {
            self.ai.model = model;
        }
        if let Some(host) = lookup("BRANDKIT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BRANDKIT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| BrandkitError::config(format!("BRANDKIT_PORT is not a port: {}", port)))?;
        }
        if let Some(storage) = lookup("BRANDKIT_STORAGE") {
            self.storage = StorageBackend::parse(&storage).ok_or_else(|| {
                BrandkitError::config(format!("Unknown BRANDKIT_STORAGE backend: {}", storage))
            })?;
        }
        if let Some(users) = lookup("BRANDKIT_ADMIN_USERS") {
            self.admin_users = users
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    /// Whether the given user may read admin metrics.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_users.iter().any(|u| u == user_id)
    }
}
