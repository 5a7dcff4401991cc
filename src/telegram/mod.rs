//! Telegram Bot API integration
//!
//! Thin pass-through between the Bot API and the relay core: the client
//! long-polls for updates and delivers replies; the types map wire payloads
//! to the platform-independent inbound descriptor.

pub mod client;
pub mod types;

pub use client::TelegramClient;
pub use types::{command_payload, ApiEnvelope, Chat, TelegramMessage, Update, INVOCATION_COMMAND};
