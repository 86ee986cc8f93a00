//! Configuration management
//!
//! This module handles loading, validation, and management of the
//! commitreach configuration. Configuration is stored in TOML format at
//! ~/.commitreach/config.toml and every section falls back to defaults, so
//! a missing or empty file is valid.
//!
//! Secrets are never read from the config file: the GitHub token and the
//! provider API keys come from environment variables (see [`Credentials`]),
//! matching the contract that a missing `GITHUB_TOKEN` is a fatal startup
//! condition rather than a per-call error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration or credentials
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to write config file: {0}")]
    Write(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// GitHub API settings
    #[serde(default)]
    pub github: GithubConfig,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Memory service settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Campaign pitch settings
    #[serde(default)]
    pub campaign: CampaignConfig,
}

/// Core settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// GitHub API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL for the GitHub REST API
    #[serde(default = "default_github_base_url")]
    pub base_url: String,
}

/// LLM provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL for the Groq OpenAI-compatible API
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,
    // Note: API key comes from the GROQ_API_KEY environment variable
}

/// Memory service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Base URL for the Mem0 API
    #[serde(default = "default_memory_base_url")]
    pub base_url: String,

    /// User id under which campaign memories are stored
    #[serde(default = "default_memory_user_id")]
    pub user_id: String,
    // Note: API key comes from the MEM0_API_KEY environment variable
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for generated CSV files, created on demand
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

/// What the outreach emails pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Product name mentioned in every email
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Product website included by the edit pass
    #[serde(default = "default_product_url")]
    pub product_url: String,

    /// Numbered focus points for the email body prompt
    #[serde(default = "default_talking_points")]
    pub talking_points: Vec<String>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_github_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_memory_base_url() -> String {
    "https://api.mem0.ai".to_string()
}

fn default_memory_user_id() -> String {
    "commitreach".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_product_name() -> String {
    "Mem0.ai".to_string()
}

fn default_product_url() -> String {
    "https://mem0.ai".to_string()
}

fn default_talking_points() -> Vec<String> {
    vec![
        "How it provides a memory layer for LLM applications".to_string(),
        "Benefits of personalized AI experiences".to_string(),
        "Cost savings through intelligent data filtering".to_string(),
        "Easy integration with existing AI solutions".to_string(),
    ]
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: default_github_base_url(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_memory_base_url(),
            user_id: default_memory_user_id(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            product_url: default_product_url(),
            talking_points: default_talking_points(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    /// (~/.commitreach/config.toml), creating a default file if none exists.
    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn create_default(path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
        }

        let config = Config::default();
        let contents =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Write(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::Write(e.to_string()))?;

        Ok(config)
    }

    fn default_config_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".commitreach").join("config.toml"))
            .ok_or_else(|| ConfigError::Invalid("cannot determine home directory".to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.github.base_url.is_empty() {
            return Err(ConfigError::Invalid("github.base_url is empty".to_string()));
        }
        if self.llm.base_url.is_empty() {
            return Err(ConfigError::Invalid("llm.base_url is empty".to_string()));
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::Invalid("llm.model is empty".to_string()));
        }
        if self.memory.base_url.is_empty() {
            return Err(ConfigError::Invalid("memory.base_url is empty".to_string()));
        }
        Ok(())
    }
}

/// API credentials sourced from the environment.
///
/// The GitHub token is required unconditionally; the other keys are checked
/// by the commands that reach those services.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub github_token: String,
    pub groq_api_key: Option<String>,
    pub mem0_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the environment. A missing `GITHUB_TOKEN` is
    /// fatal; the other keys stay optional until a command needs them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let github_token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| ConfigError::MissingCredential("GITHUB_TOKEN"))?;

        Ok(Self {
            github_token,
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            mem0_api_key: std::env::var("MEM0_API_KEY").ok(),
        })
    }

    pub fn require_groq(&self) -> Result<&str, ConfigError> {
        self.groq_api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential("GROQ_API_KEY"))
    }

    pub fn require_mem0(&self) -> Result<&str, ConfigError> {
        self.mem0_api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential("MEM0_API_KEY"))
    }
}
