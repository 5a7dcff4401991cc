//! Conversation-context management and request authorization
//!
//! This module is the stateful core of the relay: the access gate over the
//! chat allow-list, the context store mapping outbound replies to the
//! histories that produced them, the resolver that reconstructs a reply
//! chain's history, and the handler that orchestrates one inbound message
//! from gate to store write.

pub mod access;
pub mod context;
pub mod handler;
pub mod resolver;

pub use access::AccessGate;
pub use context::ContextStore;
pub use handler::{ChatClient, ConversationHandler, Outcome};
pub use resolver::{resolve, Inbound, ReplyTarget};
