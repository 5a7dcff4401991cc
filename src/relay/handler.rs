//! Conversation handling
//!
//! Orchestrates one inbound message end to end: access gate, context
//! resolution, the single completion call, outbound reply, and the context
//! store write keyed by the new outbound message id. Per-message outcomes
//! are terminal; only a successful reply mutates the store.

use crate::error::{Result, TgRelayError};
use crate::providers::{last_content, Provider};
use crate::relay::{resolve, AccessGate, ContextStore, Inbound};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Outbound side of the chat platform
///
/// The seam between the relay core and message delivery. The production
/// implementation is the Telegram client; tests substitute an in-memory
/// double.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `text` as a reply to the inbound message
    ///
    /// The completion output is passed through unmodified for rendering.
    ///
    /// # Returns
    ///
    /// Returns the platform-assigned identifier of the created message
    ///
    /// # Errors
    ///
    /// Returns error if delivery fails
    async fn reply(&self, inbound: &Inbound, text: &str) -> Result<i64>;
}

/// Terminal state of one handled message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The chat is not on the allow-list; a denial reply was sent
    Denied,
    /// The message carried no user intent; nothing was sent or stored
    Ignored,
    /// A completion reply was sent and its history stored
    Replied {
        /// Identifier of the outbound reply message
        message_id: i64,
    },
}

/// Handles inbound messages against the completion backend
///
/// Shared across concurrently dispatched message tasks; the only shared
/// mutable state is the [`ContextStore`], which is internally locked.
pub struct ConversationHandler {
    gate: AccessGate,
    store: Arc<ContextStore>,
    provider: Arc<dyn Provider>,
    chat: Arc<dyn ChatClient>,
    completion_deadline: Duration,
}

impl ConversationHandler {
    /// Create a handler
    ///
    /// # Arguments
    ///
    /// * `gate` - configured access gate
    /// * `store` - shared context store
    /// * `provider` - completion backend
    /// * `chat` - outbound message delivery
    /// * `completion_deadline` - upper bound on one completion call
    pub fn new(
        gate: AccessGate,
        store: Arc<ContextStore>,
        provider: Arc<dyn Provider>,
        chat: Arc<dyn ChatClient>,
        completion_deadline: Duration,
    ) -> Self {
        Self {
            gate,
            store,
            provider,
            chat,
            completion_deadline,
        }
    }

    /// Handle one inbound message
    ///
    /// # Errors
    ///
    /// Returns error if the completion call or the outbound delivery fails.
    /// Failures leave the context store untouched and send nothing to the
    /// user; they are local to this message.
    pub async fn handle(&self, inbound: Inbound) -> Result<Outcome> {
        if !self.gate.permitted(inbound.chat_id) {
            let denial = format!(
                "Sorry, I'm not allowed to talk to you :(. Add your chat ID: {} to the VALID_CHAT_ID env var.",
                inbound.chat_id
            );
            self.chat.reply(&inbound, &denial).await?;
            tracing::info!("Denied chat {}", inbound.chat_id);
            return Ok(Outcome::Denied);
        }

        let Some(mut history) = resolve(&inbound, &self.store) else {
            return Ok(Outcome::Ignored);
        };

        let response = tokio::time::timeout(
            self.completion_deadline,
            self.provider.complete(&history),
        )
        .await
        .map_err(|_| TgRelayError::Timeout(self.completion_deadline))??;
        history.push(response);

        // The appended assistant turn is the reply text.
        let reply_text = last_content(&history)
            .ok_or_else(|| TgRelayError::Provider("completion produced no message".to_string()))?
            .to_string();

        let outbound_id = self.chat.reply(&inbound, &reply_text).await?;
        self.store.insert(outbound_id, history);
        tracing::info!(
            "Replied to message {} in chat {} as message {}",
            inbound.message_id,
            inbound.chat_id,
            outbound_id
        );

        Ok(Outcome::Replied {
            message_id: outbound_id,
        })
    }
}
