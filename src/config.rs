//! Configuration management for TgRelay
//!
//! All configuration is sourced from the environment at startup and held in
//! a single immutable [`Config`] that is passed explicitly to the components
//! that need it. There is no configuration file and no CLI surface.

use crate::error::{Result, TgRelayError};

/// Environment variable holding the Telegram bot token.
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the completion-backend API key.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the comma-separated chat allow-list.
pub const ENV_VALID_CHAT_ID: &str = "VALID_CHAT_ID";
/// Optional override for the completion API base URL.
pub const ENV_API_BASE: &str = "OPENAI_API_BASE";
/// Optional override for the completion model.
pub const ENV_MODEL: &str = "OPENAI_MODEL";
/// Optional override for the context store capacity.
pub const ENV_CONTEXT_CAPACITY: &str = "TGRELAY_CONTEXT_CAPACITY";

/// Main configuration structure for TgRelay
///
/// Built once at process entry via [`Config::from_env`] and never mutated.
/// Holds the bot token and backend key, so it is deliberately not
/// serializable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram client configuration
    pub telegram: TelegramConfig,
    /// Completion-backend configuration
    pub provider: ProviderConfig,
    /// Chat allow-list; empty means every chat is permitted
    pub allowed_chat_ids: Vec<i64>,
    /// Maximum number of reply threads retained in the context store
    pub context_capacity: usize,
}

/// Telegram client configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,

    /// Base URL for the Bot API (overridable for tests and local mocks)
    pub api_base: String,

    /// Long-poll wait budget for getUpdates (seconds)
    pub poll_timeout_seconds: u64,
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    10
}

/// Completion-backend configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key for the completion backend
    pub api_key: String,

    /// Base URL for completion endpoints (overridable for tests and mocks)
    pub api_base: String,

    /// Fixed model selector sent with every completion request
    pub model: String,

    /// Deadline for a single completion call (seconds)
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_completion_timeout() -> u64 {
    10
}

fn default_context_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `TgRelayError::Config` if a required variable is missing or
    /// if `VALID_CHAT_ID` is not a comma-separated list of integers. Such
    /// errors are fatal; the process must not serve traffic.
    pub fn from_env() -> Result<Self> {
        let bot_token = require_env(ENV_BOT_TOKEN)?;
        let api_key = require_env(ENV_API_KEY)?;
        let allowed_chat_ids =
            parse_chat_ids(&std::env::var(ENV_VALID_CHAT_ID).unwrap_or_default())?;
        let context_capacity = match std::env::var(ENV_CONTEXT_CAPACITY) {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
                TgRelayError::Config(format!(
                    "{} must be a positive integer, got {:?}",
                    ENV_CONTEXT_CAPACITY, raw
                ))
            })?,
            Err(_) => default_context_capacity(),
        };

        let config = Self {
            telegram: TelegramConfig {
                bot_token,
                api_base: default_telegram_api_base(),
                poll_timeout_seconds: default_poll_timeout(),
            },
            provider: ProviderConfig {
                api_key,
                api_base: std::env::var(ENV_API_BASE).unwrap_or_else(|_| default_api_base()),
                model: std::env::var(ENV_MODEL).unwrap_or_else(|_| default_model()),
                timeout_seconds: default_completion_timeout(),
            },
            allowed_chat_ids,
            context_capacity,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `TgRelayError::Config` if any value is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.is_empty() {
            return Err(TgRelayError::Config(format!("{} must not be empty", ENV_BOT_TOKEN)).into());
        }
        if self.provider.api_key.is_empty() {
            return Err(TgRelayError::Config(format!("{} must not be empty", ENV_API_KEY)).into());
        }
        if self.provider.model.is_empty() {
            return Err(TgRelayError::Config("model must not be empty".to_string()).into());
        }
        if self.context_capacity == 0 {
            return Err(
                TgRelayError::Config("context capacity must be at least 1".to_string()).into(),
            );
        }
        if self.provider.timeout_seconds == 0 {
            return Err(
                TgRelayError::Config("completion timeout must be at least 1s".to_string()).into(),
            );
        }
        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(TgRelayError::Config(format!("{} must be set", name)).into()),
    }
}

/// Parse a comma-separated chat allow-list
///
/// An empty or whitespace-only string yields an empty list (open mode).
/// Blank entries between commas are tolerated; anything that is not an
/// integer is a fatal configuration error.
///
/// # Examples
///
/// ```
/// use tgrelay::config::parse_chat_ids;
///
/// assert_eq!(parse_chat_ids("").unwrap(), Vec::<i64>::new());
/// assert_eq!(parse_chat_ids("100,-42").unwrap(), vec![100, -42]);
/// assert!(parse_chat_ids("100,abc").is_err());
/// ```
pub fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part.parse::<i64>().map_err(|_| {
            TgRelayError::Config(format!(
                "{} must be a comma-separated list of chat IDs, got {:?}",
                ENV_VALID_CHAT_ID, part
            ))
        })?;
        ids.push(id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            telegram: TelegramConfig {
                bot_token: "token".to_string(),
                api_base: default_telegram_api_base(),
                poll_timeout_seconds: default_poll_timeout(),
            },
            provider: ProviderConfig {
                api_key: "key".to_string(),
                api_base: default_api_base(),
                model: default_model(),
                timeout_seconds: default_completion_timeout(),
            },
            allowed_chat_ids: Vec::new(),
            context_capacity: default_context_capacity(),
        }
    }

    #[test]
    fn test_parse_chat_ids_empty_is_open_mode() {
        assert_eq!(parse_chat_ids("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_chat_ids("   ").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_chat_ids_single() {
        assert_eq!(parse_chat_ids("100").unwrap(), vec![100]);
    }

    #[test]
    fn test_parse_chat_ids_multiple_with_spaces() {
        assert_eq!(
            parse_chat_ids("100, 200 ,-300").unwrap(),
            vec![100, 200, -300]
        );
    }

    #[test]
    fn test_parse_chat_ids_tolerates_blank_entries() {
        assert_eq!(parse_chat_ids("100,,200,").unwrap(), vec![100, 200]);
    }

    #[test]
    fn test_parse_chat_ids_rejects_garbage() {
        let err = parse_chat_ids("100,abc").unwrap_err();
        assert!(err.to_string().contains("VALID_CHAT_ID"));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let mut config = test_config();
        config.telegram.bot_token = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let mut config = test_config();
        config.provider.api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = test_config();
        config.context_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = test_config();
        config.provider.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        let config = test_config();
        assert_eq!(config.provider.model, "gpt-3.5-turbo");
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(config.telegram.poll_timeout_seconds, 10);
        assert_eq!(config.context_capacity, 1024);
    }
}
