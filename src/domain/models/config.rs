//! Service configuration.
//!
//! The whole tree is immutable after load: it is built once at startup by
//! the config loader and handed to the orchestrator and collaborator clients
//! by value. No module-level mutable state anywhere.

use serde::{Deserialize, Serialize};

/// Main configuration structure for Stweave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation backend (LLM) configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Syntax verifier configuration
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Knowledge-base retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Generate/verify/correct loop configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Chat-fallback policy for unparseable backend output
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Generation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LlmConfig {
    /// API key for the generation backend. Required; typically supplied via
    /// the `STWEAVE_LLM__API_KEY` environment variable.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the generation API
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

const fn default_llm_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Syntax verifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VerifierConfig {
    /// Base URL of the verification service
    #[serde(default = "default_verifier_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_verifier_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_verifier_base_url() -> String {
    "http://localhost:8002".to_string()
}

const fn default_verifier_timeout_secs() -> u64 {
    30
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_verifier_base_url(),
            timeout_secs: default_verifier_timeout_secs(),
        }
    }
}

/// Knowledge-base retrieval configuration
///
/// Retrieval is advisory: when disabled or unreachable the orchestrator
/// proceeds with the bare user prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Whether to query the knowledge base at all
    #[serde(default = "default_retrieval_enabled")]
    pub enabled: bool,

    /// Base URL of the retrieval service
    #[serde(default = "default_retrieval_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_retrieval_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_retrieval_enabled() -> bool {
    true
}

fn default_retrieval_base_url() -> String {
    "http://localhost:8001".to_string()
}

const fn default_retrieval_timeout_secs() -> u64 {
    10
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: default_retrieval_enabled(),
            base_url: default_retrieval_base_url(),
            timeout_secs: default_retrieval_timeout_secs(),
        }
    }
}

/// Generate/verify/correct loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Maximum verify/correct cycles per request (1-10)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_max_retries() -> u32 {
    2
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

/// Chat-fallback policy.
///
/// When the first generation returns unparseable text, a short or greeting
/// prompt is answered conversationally instead of failing the request. The
/// thresholds are explicit policy, not hidden magic; the defaults match the
/// behavior the service has always had.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FallbackConfig {
    /// Prompts with at most this many words qualify for chat fallback
    #[serde(default = "default_short_prompt_max_words")]
    pub short_prompt_max_words: usize,

    /// Greeting/courtesy keywords that qualify a prompt for chat fallback.
    /// Single words match whole words; entries with spaces match as phrases.
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,
}

const fn default_short_prompt_max_words() -> usize {
    3
}

fn default_greetings() -> Vec<String> {
    ["hi", "hello", "hey", "thanks", "thank you"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            short_prompt_max_words: default_short_prompt_max_words(),
            greetings: default_greetings(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json, pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
