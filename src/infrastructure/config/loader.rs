//! Configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_retries: {0}. Must be between 1 and 10")]
    InvalidMaxRetries(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("llm.api_key is empty. Set it in the config file or via STWEAVE_LLM__API_KEY")]
    EmptyApiKey,

    #[error("llm.model cannot be empty")]
    EmptyModel,

    #[error("{0}.base_url cannot be empty")]
    EmptyBaseUrl(&'static str),

    #[error("{0}.timeout_secs must be greater than 0")]
    ZeroTimeout(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. stweave.yaml (project config)
    /// 3. Environment variables (STWEAVE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("stweave.yaml"))
            .merge(Env::prefixed("STWEAVE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("STWEAVE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.generation.max_retries == 0 || config.generation.max_retries > 10 {
            return Err(ConfigError::InvalidMaxRetries(config.generation.max_retries));
        }

        if config.llm.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if config.llm.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.llm.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("llm"));
        }
        if config.verifier.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("verifier"));
        }
        if config.retrieval.enabled && config.retrieval.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("retrieval"));
        }

        if config.llm.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("llm"));
        }
        if config.verifier.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("verifier"));
        }
        if config.retrieval.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("retrieval"));
        }

        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
        match config.logging.format.as_str() {
            "json" | "pretty" => {}
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        }

        Ok(())
    }
}
