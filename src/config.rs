use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

/// Environment variables consulted when `llm.api_key` is left empty
pub const LLM_KEY_ENV_VARS: [&str; 2] = ["BIAS_LLM_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Sets `RUST_BACKTRACE=1` at startup unless the variable is already set
    #[serde(default)]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL profiles are fetched from (`{base_url}/@{username}`)
    #[serde(default = "default_scraper_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_scraper_timeout")]
    pub timeout_secs: u64,
}

fn default_scraper_base_url() -> String {
    "https://www.tiktok.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_scraper_timeout() -> u64 {
    15
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_scraper_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_scraper_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" (chat completions) or "ollama"
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    /// Empty disables the LLM path unless one of `LLM_KEY_ENV_VARS` is set
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_temperature() -> f32 {
    0.7
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            endpoint: default_llm_endpoint(),
            api_key: String::new(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            tracing::warn!("No config file found, using built-in defaults");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Fill an empty LLM key from the environment
    pub fn apply_env_overrides(&mut self) {
        if !self.llm.api_key.trim().is_empty() {
            return;
        }
        for var in LLM_KEY_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    self.llm.api_key = value.trim().to_string();
                    return;
                }
            }
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.scraper.timeout_secs == 0 {
            return Err(crate::BiasError::ConfigError(
                "scraper.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(crate::BiasError::ConfigError(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }
        url::Url::parse(&self.scraper.base_url).map_err(|e| {
            crate::BiasError::ConfigError(format!("Invalid scraper.base_url: {e}"))
        })?;
        Ok(())
    }

    /// Whether AI insights go through the LLM instead of the templated fallback
    pub fn llm_enabled(&self) -> bool {
        !self.llm.api_key.trim().is_empty()
    }

    /// API key with everything but the last four characters hidden
    pub fn masked_llm_key(&self) -> String {
        let key = self.llm.api_key.trim();
        if key.is_empty() {
            return "(not set)".to_string();
        }
        let visible: String = key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{visible}")
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
