//! OpenAI provider implementation for TgRelay
//!
//! This module implements the Provider trait against the OpenAI
//! chat-completions API. One request per invocation, fixed model, no
//! extra parameters, bounded by the configured deadline.

use crate::config::ProviderConfig;
use crate::error::{Result, TgRelayError};
use crate::providers::{Message, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat-completions provider
///
/// Connects to an OpenAI-compatible endpoint to generate completions. The
/// HTTP client carries a request timeout equal to the configured deadline,
/// so a hung transport fails the call instead of stalling the handler.
///
/// # Examples
///
/// ```no_run
/// use tgrelay::config::ProviderConfig;
/// use tgrelay::providers::{Message, OpenAiProvider, Provider};
///
/// # async fn example() -> tgrelay::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: "sk-test".to_string(),
///     api_base: "https://api.openai.com/v1".to_string(),
///     model: "gpt-3.5-turbo".to_string(),
///     timeout_seconds: 10,
/// };
/// let provider = OpenAiProvider::new(config)?;
/// let reply = provider.complete(&[Message::user("Hello!")]).await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response body from the chat-completions endpoint
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

/// One completion choice; the relay only ever reads the first
#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChoiceMessage,
}

/// Message payload inside a completion choice
///
/// The role is accepted as a raw string for input tolerance; the relay
/// always records the turn as an assistant message.
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    #[allow(dead_code)]
    role: String,
    #[serde(default)]
    content: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Provider configuration with key, base URL, model, and deadline
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("tgrelay/0.1.0")
            .build()
            .map_err(|e| TgRelayError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized OpenAI provider: base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<Message> {
        let url = format!("{}/chat/completions", self.config.api_base);
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!(
            "Sending completion request: {} messages, model={}",
            messages.len(),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TgRelayError::Timeout(Duration::from_secs(self.config.timeout_seconds))
                } else {
                    tracing::warn!("Completion request failed: {}", e);
                    TgRelayError::Provider(format!("Failed to reach completion backend: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Completion backend returned {}: {}", status, error_text);
            return Err(TgRelayError::Provider(format!(
                "Completion backend returned {}: {}",
                status, error_text
            ))
            .into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse completion response: {}", e);
            TgRelayError::Provider(format!("Failed to parse completion response: {}", e))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TgRelayError::Provider("completion returned no choices".to_string()))?;

        // Empty content would violate the history invariant downstream.
        if choice.message.content.is_empty() {
            return Err(
                TgRelayError::Provider("completion returned empty content".to_string()).into(),
            );
        }

        Ok(Message::assistant(choice.message.content))
    }
}
