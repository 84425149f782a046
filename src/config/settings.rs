//! Configuration settings for the aquifer service.
//!
//! Configuration is loaded once at process start and passed by reference
//! into each component constructor. There is no global configuration state.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("aquifer.toml"),
            dirs::config_dir()
                .map(|p| p.join("aquifer/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.llm.base_url.is_empty() {
            return Err(ConfigError::MissingField("llm.base_url".to_string()).into());
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()).into());
        }
        if self.database.max_connections == 0 {
            return Err(
                ConfigError::Invalid("database.max_connections must be > 0".to_string()).into(),
            );
        }
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the HTTP server listens on.
    pub http_port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8000,
            enable_cors: true,
        }
    }
}

/// Language model API configuration (OpenAI-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Model used for normalization, explanation, and formatting.
    pub model: String,
    /// Model used for SQL generation. Falls back to `model` when unset.
    pub sql_model: Option<String>,
    /// API key. Falls back to the LLM_API_KEY environment variable.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            sql_model: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("LLM_API_KEY").ok())
            .ok_or_else(|| ConfigError::MissingField("llm.api_key".to_string()).into())
    }

    /// Model used for SQL generation.
    pub fn sql_model(&self) -> &str {
        self.sql_model.as_deref().unwrap_or(&self.model)
    }
}

/// Relational store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL. Falls back to the DATABASE_URL environment
    /// variable.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// Resolve the connection URL from config or environment.
    pub fn resolve_url(&self) -> Result<String> {
        self.url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| ConfigError::MissingField("database.url".to_string()).into())
    }
}
