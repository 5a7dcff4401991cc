//! Error types for TgRelay
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use std::time::Duration;
use thiserror::Error;

/// Main error type for TgRelay operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, completion-backend calls, and Telegram API
/// interactions.
#[derive(Error, Debug)]
pub enum TgRelayError {
    /// Configuration-related errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion-backend errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Telegram Bot API errors (non-ok envelopes, delivery failures)
    #[error("Telegram error: {0}")]
    Telegram(String),

    /// Completion call exceeded its deadline
    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for TgRelay operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error =
            TgRelayError::Config("VALID_CHAT_ID must be a comma-separated list".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: VALID_CHAT_ID must be a comma-separated list"
        );
    }

    #[test]
    fn test_provider_error_display() {
        let error = TgRelayError::Provider("completion returned no choices".to_string());
        assert_eq!(
            error.to_string(),
            "Provider error: completion returned no choices"
        );
    }

    #[test]
    fn test_telegram_error_display() {
        let error = TgRelayError::Telegram("chat not found".to_string());
        assert_eq!(error.to_string(), "Telegram error: chat not found");
    }

    #[test]
    fn test_timeout_error_display() {
        let error = TgRelayError::Timeout(Duration::from_secs(10));
        assert_eq!(error.to_string(), "Completion timed out after 10s");
    }

    #[test]
    fn test_timeout_error_display_subsecond() {
        let error = TgRelayError::Timeout(Duration::from_millis(20));
        assert_eq!(error.to_string(), "Completion timed out after 20ms");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: TgRelayError = json_error.into();
        assert!(matches!(error, TgRelayError::Serialization(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TgRelayError>();
    }
}
