//! Base provider trait and message types for TgRelay
//!
//! This module defines the Provider trait that completion backends must
//! implement, along with the role-tagged message type and the history type
//! submitted to the backend on every turn.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a conversation turn
///
/// The relay only ever produces `user` and `assistant` turns; the wire
/// format uses lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Turn produced by the human on the chat platform
    User,
    /// Turn produced by the completion backend
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn in a conversation
///
/// Invariant: `content` is never empty once the message is stored in a
/// history. Construction sites are responsible for filtering empty text
/// before building a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the turn
    pub role: Role,
    /// Text of the turn
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use tgrelay::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use tgrelay::providers::{Message, Role};
    ///
    /// let msg = Message::assistant("Hello, user!");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered message history, oldest first
///
/// Represents the full context sent to the completion backend on the next
/// turn. Append-only while a single turn is being handled; replaced
/// wholesale in the context store once the assistant turn is appended.
pub type History = Vec<Message>;

/// Returns the content of the last message in a history, if any
///
/// # Examples
///
/// ```
/// use tgrelay::providers::{last_content, Message};
///
/// let history = vec![Message::user("hi"), Message::assistant("hello")];
/// assert_eq!(last_content(&history), Some("hello"));
/// assert_eq!(last_content(&[]), None);
/// ```
pub fn last_content(history: &[Message]) -> Option<&str> {
    history.last().map(|m| m.content.as_str())
}

/// Provider trait for completion backends
///
/// Implementations send the history verbatim (in order) with a fixed model
/// selector and return the backend's single response message. Exactly one
/// backend call per invocation; no internal retry.
///
/// # Examples
///
/// ```no_run
/// use tgrelay::providers::{Message, Provider};
/// use tgrelay::error::Result;
/// use async_trait::async_trait;
///
/// struct CannedProvider;
///
/// #[async_trait]
/// impl Provider for CannedProvider {
///     async fn complete(&self, _messages: &[Message]) -> Result<Message> {
///         Ok(Message::assistant("Response"))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation with the given message history
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation history, oldest first
    ///
    /// # Returns
    ///
    /// Returns the assistant's response message
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails, the deadline elapses, or the
    /// response is malformed. No partial state is produced on failure.
    async fn complete(&self, messages: &[Message]) -> Result<Message>;
}
