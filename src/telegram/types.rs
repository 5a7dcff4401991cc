//! Telegram Bot API payload types
//!
//! Serde structures for the subset of the Bot API the relay uses, plus the
//! mapping from a delivered message to the platform-independent [`Inbound`]
//! descriptor, including invocation-command payload extraction.

use crate::relay::{Inbound, ReplyTarget};
use serde::{Deserialize, Serialize};

/// The command that invokes the relay in a non-reply message
pub const INVOCATION_COMMAND: &str = "/gpt";

/// Bot API response envelope
///
/// Every method returns `{ok, result, description}`; `result` is present
/// on success and `description` on failure.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One long-poll update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

/// A delivered chat message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub reply_to_message: Option<Box<TelegramMessage>>,
}

/// The chat a message arrived on
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Request body for the sendMessage method
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'a str,
    pub reply_to_message_id: i64,
}

/// Request body for the getUpdates method
#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest<'a> {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

/// Extract the payload following the invocation command
///
/// Returns the text after `/gpt` (a bot-name suffix like `/gpt@mybot` is
/// tolerated), or an empty string when the message does not start with the
/// command. Leading whitespace of the payload is trimmed.
///
/// # Examples
///
/// ```
/// use tgrelay::telegram::command_payload;
///
/// assert_eq!(command_payload("/gpt tell me a joke"), "tell me a joke");
/// assert_eq!(command_payload("/gpt@mybot hi"), "hi");
/// assert_eq!(command_payload("/gpt"), "");
/// assert_eq!(command_payload("just chatting"), "");
/// ```
pub fn command_payload(text: &str) -> String {
    let Some(rest) = text.strip_prefix(INVOCATION_COMMAND) else {
        return String::new();
    };
    // Reject e.g. "/gptx": the command must be followed by end of text,
    // whitespace, or a bot-name mention.
    let rest = match rest.chars().next() {
        None => "",
        Some('@') => match rest.split_once(char::is_whitespace) {
            Some((_mention, payload)) => payload,
            None => "",
        },
        Some(c) if c.is_whitespace() => rest,
        Some(_) => return String::new(),
    };
    rest.trim_start().to_string()
}

impl TelegramMessage {
    /// Map a delivered message to the relay's inbound descriptor
    ///
    /// Messages without text map with empty `text` and `payload`, which the
    /// resolver then ignores.
    pub fn into_inbound(self) -> Inbound {
        let text = self.text.unwrap_or_default();
        let payload = command_payload(&text);
        let reply_to = self.reply_to_message.map(|target| ReplyTarget {
            id: target.message_id,
            text: target.text.unwrap_or_default(),
        });
        Inbound {
            message_id: self.message_id,
            chat_id: self.chat.id,
            text,
            payload,
            reply_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_payload_basic() {
        assert_eq!(command_payload("/gpt tell me a joke"), "tell me a joke");
    }

    #[test]
    fn test_command_payload_bare_command() {
        assert_eq!(command_payload("/gpt"), "");
        assert_eq!(command_payload("/gpt   "), "");
    }

    #[test]
    fn test_command_payload_with_bot_mention() {
        assert_eq!(command_payload("/gpt@mybot hi there"), "hi there");
        assert_eq!(command_payload("/gpt@mybot"), "");
    }

    #[test]
    fn test_command_payload_non_command() {
        assert_eq!(command_payload("just chatting"), "");
        assert_eq!(command_payload(""), "");
    }

    #[test]
    fn test_command_payload_rejects_prefix_collision() {
        assert_eq!(command_payload("/gpts are great"), "");
    }

    #[test]
    fn test_update_deserialization() {
        let json = r#"{
            "update_id": 900,
            "message": {
                "message_id": 10,
                "chat": {"id": 100, "type": "private"},
                "text": "/gpt hello",
                "from": {"id": 7, "is_bot": false, "first_name": "a"}
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 900);
        let message = update.message.unwrap();
        assert_eq!(message.message_id, 10);
        assert_eq!(message.chat.id, 100);
        assert_eq!(message.text.as_deref(), Some("/gpt hello"));
        assert!(message.reply_to_message.is_none());
    }

    #[test]
    fn test_update_without_message() {
        let update: Update = serde_json::from_str(r#"{"update_id": 901}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_into_inbound_command() {
        let message = TelegramMessage {
            message_id: 10,
            chat: Chat { id: 100 },
            text: Some("/gpt tell me a joke".to_string()),
            reply_to_message: None,
        };
        let inbound = message.into_inbound();
        assert_eq!(inbound.message_id, 10);
        assert_eq!(inbound.chat_id, 100);
        assert_eq!(inbound.text, "/gpt tell me a joke");
        assert_eq!(inbound.payload, "tell me a joke");
        assert!(inbound.reply_to.is_none());
    }

    #[test]
    fn test_into_inbound_reply() {
        let message = TelegramMessage {
            message_id: 11,
            chat: Chat { id: 100 },
            text: Some("and you?".to_string()),
            reply_to_message: Some(Box::new(TelegramMessage {
                message_id: 42,
                chat: Chat { id: 100 },
                text: Some("Hello".to_string()),
                reply_to_message: None,
            })),
        };
        let inbound = message.into_inbound();
        assert_eq!(inbound.text, "and you?");
        assert_eq!(inbound.payload, "");
        let target = inbound.reply_to.unwrap();
        assert_eq!(target.id, 42);
        assert_eq!(target.text, "Hello");
    }

    #[test]
    fn test_into_inbound_without_text() {
        let message = TelegramMessage {
            message_id: 12,
            chat: Chat { id: 100 },
            text: None,
            reply_to_message: None,
        };
        let inbound = message.into_inbound();
        assert_eq!(inbound.text, "");
        assert_eq!(inbound.payload, "");
    }

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{"ok": false, "description": "Unauthorized"}"#;
        let envelope: ApiEnvelope<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(envelope.description.as_deref(), Some("Unauthorized"));
    }
}
