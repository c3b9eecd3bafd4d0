use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use llm_rewriter::{GeminiConfig, LlmError};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Settings for the AI-mode backend.  The API key itself never lives in the
/// file, only the name of the variable holding it.
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

impl LlmConfig {
    /// Client settings, with the API key read from `api_key_env`.
    pub fn gemini_config(&self) -> Result<GeminiConfig, LlmError> {
        let mut gemini = GeminiConfig::from_env(&self.api_key_env)?;
        gemini.model = self.model.clone();
        gemini.base_url = self.base_url.clone();
        gemini.timeout = Duration::from_secs(self.timeout_secs);
        gemini.temperature = self.temperature;
        gemini.top_p = self.top_p;
        gemini.top_k = self.top_k;
        Ok(gemini)
    }
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_listen() -> String {
    "127.0.0.1:5001".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    llm_rewriter::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    llm_rewriter::DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    llm_rewriter::DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.3
}

fn default_top_p() -> f32 {
    0.8
}

fn default_top_k() -> u32 {
    40
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// A loaded configuration and whether it came from a file.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    /// The file did not exist and `config` holds the defaults.  Reported by
    /// the caller once logging is up.
    pub missing: bool,
}

/// Load configuration from a YAML file.
///
/// A missing file yields the defaults, so the analyzer runs without any
/// configuration written.
pub fn load(path: &Path) -> anyhow::Result<Loaded> {
    if !path.exists() {
        return Ok(Loaded {
            config: Config::default(),
            missing: true,
        });
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let config = serde_yml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(Loaded {
        config,
        missing: false,
    })
}
