//! Reply-chain context resolution
//!
//! Given an inbound message, determines whether it starts a fresh
//! conversation or continues an existing reply chain, and reconstructs the
//! message history to submit to the completion backend. Messages that carry
//! no user intent resolve to nothing: no backend call, no reply, no store
//! write.

use crate::providers::{History, Message};
use crate::relay::ContextStore;

/// Inbound message descriptor
///
/// The platform-independent view of one delivered chat message. `payload`
/// is the text following the invocation command (empty when the message
/// carried no command); `text` is the full message text.
#[derive(Debug, Clone, Default)]
pub struct Inbound {
    /// Platform identifier of this message
    pub message_id: i64,
    /// Identifier of the chat the message arrived on
    pub chat_id: i64,
    /// Full message text
    pub text: String,
    /// Text following the invocation command, if any
    pub payload: String,
    /// The message this one replies to, if it is a reply
    pub reply_to: Option<ReplyTarget>,
}

/// The message an inbound message replies to
#[derive(Debug, Clone)]
pub struct ReplyTarget {
    /// Platform identifier of the replied-to message
    pub id: i64,
    /// Text of the replied-to message
    pub text: String,
}

impl Inbound {
    /// Returns true if this message is a reply to another message
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

/// Resolve the history to submit for an inbound message
///
/// Returns `None` when the message should be ignored. Otherwise returns the
/// reconstructed history ending with the new user turn:
///
/// - A reply to a message the relay produced resumes the stored history.
/// - A reply to any other message seeds a fresh history from the
///   replied-to text as a single assistant turn; this never fails.
/// - A non-reply starts an empty history.
///
/// Resolution is read-only against the store apart from the recency touch
/// a lookup performs, so resolving the same ignored message twice yields
/// the same outcome.
///
/// # Examples
///
/// ```
/// use tgrelay::relay::{resolve, ContextStore, Inbound};
///
/// let store = ContextStore::new(8);
/// let inbound = Inbound {
///     message_id: 1,
///     chat_id: 100,
///     text: "/gpt tell me a joke".to_string(),
///     payload: "tell me a joke".to_string(),
///     reply_to: None,
/// };
/// let history = resolve(&inbound, &store).unwrap();
/// assert_eq!(history.len(), 1);
/// assert_eq!(history[0].content, "tell me a joke");
/// ```
pub fn resolve(inbound: &Inbound, store: &ContextStore) -> Option<History> {
    let is_reply = inbound.is_reply();
    tracing::debug!("isReply: {}", is_reply);

    // A bare, non-reply message with no command payload carries no intent.
    if !is_reply && inbound.payload.is_empty() {
        return None;
    }

    let mut history: History = match &inbound.reply_to {
        Some(target) => match store.get(target.id) {
            Some(stored) => stored,
            // The target is not a reply the relay produced; seed context
            // from the arbitrary message being replied to.
            None => vec![Message::assistant(target.text.clone())],
        },
        None => Vec::new(),
    };

    let content = if is_reply {
        inbound.text.as_str()
    } else {
        inbound.payload.as_str()
    };
    tracing::debug!("user content: {}", content);

    if content.is_empty() {
        tracing::debug!("empty content, ignoring");
        return None;
    }

    history.push(Message::user(content));
    Some(history)
}
