//! Telegram Bot API client
//!
//! Long-polls getUpdates for inbound messages and sends replies via
//! sendMessage with Markdown rendering. The base URL is overridable so
//! tests can point the client at a mock server.

use crate::config::TelegramConfig;
use crate::error::{Result, TgRelayError};
use crate::relay::{ChatClient, Inbound};
use crate::telegram::types::{
    ApiEnvelope, GetUpdatesRequest, SendMessageRequest, TelegramMessage, Update,
};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// Slack on top of the long-poll wait so the server closes the request
// before the client gives up on it.
const HTTP_TIMEOUT_SLACK_SECS: u64 = 5;

/// Telegram Bot API client
///
/// # Examples
///
/// ```no_run
/// use tgrelay::config::TelegramConfig;
/// use tgrelay::telegram::TelegramClient;
///
/// # async fn example() -> tgrelay::error::Result<()> {
/// let config = TelegramConfig {
///     bot_token: "123:abc".to_string(),
///     api_base: "https://api.telegram.org".to_string(),
///     poll_timeout_seconds: 10,
/// };
/// let client = TelegramClient::new(config)?;
/// let updates = client.get_updates(0).await?;
/// # Ok(())
/// # }
/// ```
pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    /// Create a new Bot API client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(
                config.poll_timeout_seconds + HTTP_TIMEOUT_SLACK_SECS,
            ))
            .user_agent("tgrelay/0.1.0")
            .build()
            .map_err(|e| TgRelayError::Telegram(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base, self.config.bot_token, method
        )
    }

    /// Long-poll for message updates
    ///
    /// # Arguments
    ///
    /// * `offset` - update id to confirm up to (one past the last handled)
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-ok API envelope
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.config.poll_timeout_seconds,
            allowed_updates: &["message"],
        };

        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .json(&request)
            .send()
            .await
            .map_err(|e| TgRelayError::Telegram(format!("getUpdates failed: {}", e)))?;

        let envelope: ApiEnvelope<Vec<Update>> = response.json().await.map_err(|e| {
            TgRelayError::Telegram(format!("Failed to parse getUpdates response: {}", e))
        })?;

        unwrap_envelope(envelope, "getUpdates")
    }

    /// Send a Markdown-rendered reply to a message
    ///
    /// The text is passed through unmodified for rendering.
    ///
    /// # Returns
    ///
    /// Returns the message id Telegram assigned to the outbound reply
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-ok API envelope
    pub async fn send_reply(
        &self,
        chat_id: i64,
        reply_to_message_id: i64,
        text: &str,
    ) -> Result<i64> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
            reply_to_message_id,
        };

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await
            .map_err(|e| TgRelayError::Telegram(format!("sendMessage failed: {}", e)))?;

        let envelope: ApiEnvelope<TelegramMessage> = response.json().await.map_err(|e| {
            TgRelayError::Telegram(format!("Failed to parse sendMessage response: {}", e))
        })?;

        let message = unwrap_envelope(envelope, "sendMessage")?;
        tracing::debug!(
            "Sent reply {} to message {} in chat {}",
            message.message_id,
            reply_to_message_id,
            chat_id
        );
        Ok(message.message_id)
    }
}

#[async_trait]
impl ChatClient for TelegramClient {
    async fn reply(&self, inbound: &Inbound, text: &str) -> Result<i64> {
        self.send_reply(inbound.chat_id, inbound.message_id, text)
            .await
    }
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, method: &str) -> Result<T> {
    if !envelope.ok {
        let description = envelope
            .description
            .unwrap_or_else(|| "no description".to_string());
        return Err(TgRelayError::Telegram(format!("{}: {}", method, description)).into());
    }
    envelope.result.ok_or_else(|| {
        TgRelayError::Telegram(format!("{}: ok response without result", method)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::types::Chat;

    fn test_client(api_base: &str) -> TelegramClient {
        TelegramClient::new(TelegramConfig {
            bot_token: "123:abc".to_string(),
            api_base: api_base.to_string(),
            poll_timeout_seconds: 10,
        })
        .unwrap()
    }

    #[test]
    fn test_method_url_includes_token() {
        let client = test_client("https://api.telegram.org");
        assert_eq!(
            client.method_url("getUpdates"),
            "https://api.telegram.org/bot123:abc/getUpdates"
        );
    }

    #[test]
    fn test_unwrap_envelope_ok() {
        let envelope = ApiEnvelope {
            ok: true,
            result: Some(7),
            description: None,
        };
        assert_eq!(unwrap_envelope(envelope, "getUpdates").unwrap(), 7);
    }

    #[test]
    fn test_unwrap_envelope_error_carries_description() {
        let envelope: ApiEnvelope<i64> = ApiEnvelope {
            ok: false,
            result: None,
            description: Some("Unauthorized".to_string()),
        };
        let err = unwrap_envelope(envelope, "getUpdates").unwrap_err();
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[test]
    fn test_unwrap_envelope_ok_without_result() {
        let envelope: ApiEnvelope<Chat> = ApiEnvelope {
            ok: true,
            result: None,
            description: None,
        };
        assert!(unwrap_envelope(envelope, "sendMessage").is_err());
    }

    #[tokio::test]
    async fn test_get_updates_unreachable_server() {
        let client = test_client("http://127.0.0.1:9");
        assert!(client.get_updates(0).await.is_err());
    }
}
