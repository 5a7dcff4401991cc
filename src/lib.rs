//! TgRelay - Telegram chat relay library
//!
//! This library relays Telegram messages to an LLM completion API and
//! preserves multi-turn context through Telegram's reply threading: a reply
//! to one of the bot's messages resumes the conversation that produced it.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `relay`: Access gating, context store, history resolution, and the
//!   per-message conversation handler
//! - `providers`: Completion-backend abstraction and the OpenAI client
//! - `telegram`: Bot API client and payload types
//! - `bot`: Long-poll run loop and per-message dispatch
//! - `config`: Environment-sourced configuration
//! - `error`: Error types and result alias
//!
//! # Example
//!
//! ```no_run
//! use tgrelay::{bot, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     bot::run(config).await
//! }
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod providers;
pub mod relay;
pub mod telegram;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TgRelayError};
pub use providers::{History, Message, Provider, Role};
pub use relay::{AccessGate, ContextStore, ConversationHandler, Inbound, Outcome};
