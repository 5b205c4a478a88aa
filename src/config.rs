use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Environment variable that overrides `guardian.api_key`.
pub const API_KEY_ENV: &str = "GUARDIAN_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub guardian: GuardianConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct GuardianConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Articles requested per upstream page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://content.guardianapis.com/search".to_string()
}

fn default_page_size() -> u32 {
    9
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Replace the API key when `key` is present and non-blank.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.guardian.api_key = Some(key);
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_api_key(std::env::var(API_KEY_ENV).ok())
    }
}

impl GuardianConfig {
    /// The configured key, trimmed, or `None` when missing or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
