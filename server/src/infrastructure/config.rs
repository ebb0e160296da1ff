use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::modules::chat::{ChatSettings, HistoryTrimmer, LLMProviderConfig};
use crate::shared::{AppError, AppResult};

/// Defaults for every setting read from the environment
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 3000;
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";
    pub const MAX_HISTORY: usize = 40;
    pub const TEMPERATURE: f32 = 0.8;
    pub const MAX_TOKENS: u32 = 800;
    pub const TIMEOUT_SECS: u64 = 60;
    pub const STATIC_DIR: &str = "public";
}

/// Server configuration
///
/// Read from the process environment once at startup. A missing
/// `OPENAI_API_KEY` is not an error; it selects offline mode.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub max_history: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let config = Self {
            host: parse_or(var("HOST"), "HOST", defaults::HOST.parse().ok())?,
            port: parse_or(var("PORT"), "PORT", Some(defaults::PORT))?,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| defaults::OPENAI_BASE_URL.to_string()),
            model: var("OPENAI_MODEL").unwrap_or_else(|| defaults::OPENAI_MODEL.to_string()),
            max_history: parse_or(
                var("CHAT_MAX_HISTORY"),
                "CHAT_MAX_HISTORY",
                Some(defaults::MAX_HISTORY),
            )?,
            temperature: parse_or(
                var("CHAT_TEMPERATURE"),
                "CHAT_TEMPERATURE",
                Some(defaults::TEMPERATURE),
            )?,
            max_tokens: parse_or(
                var("CHAT_MAX_TOKENS"),
                "CHAT_MAX_TOKENS",
                Some(defaults::MAX_TOKENS),
            )?,
            timeout_secs: parse_or(
                var("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                Some(defaults::TIMEOUT_SECS),
            )?,
            static_dir: var("STATIC_DIR")
                .unwrap_or_else(|| defaults::STATIC_DIR.to_string())
                .into(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.max_history < crate::modules::chat::domain::services::MIN_MAX_HISTORY {
            return Err(AppError::ConfigError(format!(
                "CHAT_MAX_HISTORY must be at least 2, got {}",
                self.max_history
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::ConfigError(format!(
                "CHAT_TEMPERATURE must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(AppError::ConfigError(
                "CHAT_MAX_TOKENS must be positive".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "LLM_TIMEOUT_SECS must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Provider settings, or `None` in offline mode
    pub fn provider_config(&self) -> Option<LLMProviderConfig> {
        let api_key = self.openai_api_key.clone()?;
        Some(LLMProviderConfig {
            id: "openai".to_string(),
            base_url: self.openai_base_url.clone(),
            api_key,
            timeout_secs: self.timeout_secs,
        })
    }

    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            ..ChatSettings::default()
        }
    }

    pub fn trimmer(&self) -> HistoryTrimmer {
        HistoryTrimmer::new(self.max_history)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: Option<T>) -> AppResult<T> {
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::ConfigError(format!("Invalid value for {}: {:?}", key, raw))),
        None => default.ok_or_else(|| AppError::ConfigError(format!("Missing {}", key))),
    }
}
