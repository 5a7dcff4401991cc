//! Completion-backend abstraction for TgRelay
//!
//! The [`Provider`] trait is the seam between the relay core and the
//! completion API; [`OpenAiProvider`] is the production implementation.

pub mod base;
pub mod openai;

pub use base::{last_content, History, Message, Provider, Role};
pub use openai::OpenAiProvider;
