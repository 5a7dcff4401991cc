//! Conversation context store
//!
//! Maps the Telegram identifier of an outbound reply to the message history
//! that produced it, so a future reply-to-that-reply can resume the same
//! context. The store is process-wide shared state guarded by a mutex and
//! bounded by capacity-based LRU eviction: `get` refreshes recency, and an
//! insert at capacity evicts the least-recently-used thread.

use crate::providers::History;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Bounded store of reply-thread histories
///
/// Entries are created exactly once per successful completion (keyed by the
/// outbound reply's message id) and replaced wholesale when the same thread
/// is resumed and re-stored under a new outbound id. Concurrent same-key
/// writes resolve last-writer-wins.
///
/// # Examples
///
/// ```
/// use tgrelay::providers::Message;
/// use tgrelay::relay::ContextStore;
///
/// let store = ContextStore::new(16);
/// store.insert(42, vec![Message::user("a"), Message::assistant("b")]);
/// assert_eq!(store.get(42).unwrap().len(), 2);
/// assert!(store.get(7).is_none());
/// ```
#[derive(Debug)]
pub struct ContextStore {
    inner: Mutex<StoreInner>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct StoreInner {
    histories: HashMap<i64, History>,
    // Recency order, least-recently-used at the front.
    order: VecDeque<i64>,
}

impl StoreInner {
    fn touch(&mut self, message_id: i64) {
        if let Some(pos) = self.order.iter().position(|&id| id == message_id) {
            self.order.remove(pos);
        }
        self.order.push_back(message_id);
    }
}

impl ContextStore {
    /// Create a store bounded at `capacity` histories
    ///
    /// Capacity 0 is coerced to 1 so an insert is always possible.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            capacity: capacity.max(1),
        }
    }

    /// Look up the history stored under an outbound message id
    ///
    /// Returns a clone of the stored history and refreshes its recency, so
    /// active threads survive eviction pressure. Returns `None` for ids
    /// the relay never produced.
    pub fn get(&self, message_id: i64) -> Option<History> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.histories.contains_key(&message_id) {
            inner.touch(message_id);
        }
        inner.histories.get(&message_id).cloned()
    }

    /// Store a history under the outbound message id that produced it
    ///
    /// Evicts the least-recently-used entry when the store is at capacity
    /// and the key is new.
    pub fn insert(&self, message_id: i64, history: History) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !inner.histories.contains_key(&message_id) && inner.histories.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.histories.remove(&evicted);
                tracing::debug!("Evicted context for outbound message {}", evicted);
            }
        }
        inner.histories.insert(message_id, history);
        inner.touch(message_id);
    }

    /// Number of histories currently stored
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .histories
            .len()
    }

    /// Returns true if the store holds no histories
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
