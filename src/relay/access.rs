//! Chat allow-list gate
//!
//! Decides whether an inbound conversation is permitted to use the relay.
//! An empty allow-list means open mode: every chat is permitted.

/// Access gate over a configured chat allow-list
///
/// # Examples
///
/// ```
/// use tgrelay::relay::AccessGate;
///
/// let open = AccessGate::new(Vec::new());
/// assert!(open.permitted(12345));
///
/// let gated = AccessGate::new(vec![100]);
/// assert!(gated.permitted(100));
/// assert!(!gated.permitted(200));
/// ```
#[derive(Debug, Clone)]
pub struct AccessGate {
    allowed: Vec<i64>,
}

impl AccessGate {
    /// Create a gate from the configured allow-list
    pub fn new(allowed: Vec<i64>) -> Self {
        Self { allowed }
    }

    /// Returns true if the chat is permitted to use the relay
    ///
    /// No side effects; a well-formed allow-list and identifier always
    /// yield a boolean.
    pub fn permitted(&self, chat_id: i64) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&chat_id)
    }
}
