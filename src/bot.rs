//! Bot run loop
//!
//! Wires the Telegram client, the completion provider, and the
//! conversation handler together, then long-polls for updates and
//! dispatches one task per inbound message. Per-message failures are
//! logged and never affect other in-flight messages.

use crate::config::Config;
use crate::error::Result;
use crate::providers::OpenAiProvider;
use crate::relay::{AccessGate, ContextStore, ConversationHandler};
use crate::telegram::{TelegramClient, Update};

use std::sync::Arc;
use std::time::Duration;

// Pause before re-polling after a failed getUpdates call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Run the relay until the process is terminated
///
/// # Errors
///
/// Returns error if a client cannot be constructed; polling errors are
/// logged and retried rather than propagated.
pub async fn run(config: Config) -> Result<()> {
    let telegram = Arc::new(TelegramClient::new(config.telegram.clone())?);
    let provider = Arc::new(OpenAiProvider::new(config.provider.clone())?);
    let store = Arc::new(ContextStore::new(config.context_capacity));
    let handler = Arc::new(ConversationHandler::new(
        AccessGate::new(config.allowed_chat_ids.clone()),
        store,
        provider,
        Arc::clone(&telegram) as Arc<dyn crate::relay::ChatClient>,
        Duration::from_secs(config.provider.timeout_seconds),
    ));

    tracing::info!("Starting bot");

    let mut offset = 0i64;
    loop {
        let updates = match telegram.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("getUpdates failed: {:#}", e);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        offset = next_offset(offset, &updates);
        for update in updates {
            let Some(message) = update.message else {
                continue;
            };
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                let inbound = message.into_inbound();
                let (message_id, chat_id) = (inbound.message_id, inbound.chat_id);
                if let Err(e) = handler.handle(inbound).await {
                    tracing::error!(
                        "Failed to handle message {} in chat {}: {:#}",
                        message_id,
                        chat_id,
                        e
                    );
                }
            });
        }
    }
}

/// Compute the next getUpdates offset from a batch of updates
///
/// The offset confirms everything up to and including the highest update
/// id seen, so the next poll only delivers newer updates.
fn next_offset(current: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .fold(current, i64::max)
}
