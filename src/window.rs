//! Bounded message window with oldest-first eviction.

use crate::types::Message;
use std::collections::VecDeque;

/// Insertion-ordered buffer of received messages, bounded by a fixed
/// capacity. Appending at capacity evicts exactly one oldest item, so
/// length never exceeds capacity and memory use stays bounded without a
/// failure mode.
pub struct MessageWindow {
    capacity: usize,
    items: VecDeque<Message>,
}

impl MessageWindow {
    /// Create a window. Capacity must be positive; validated at namespace
    /// creation before this is reached.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "window capacity must be positive");
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a message, evicting the oldest first when at capacity.
    /// O(1) amortized, always succeeds.
    pub fn append(&mut self, msg: Message) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(msg);
    }

    /// Drop all retained messages. Subscription state and pause flag are
    /// untouched (they live elsewhere).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All currently retained messages, oldest first. Returns a copy so
    /// callers cannot reach window internals.
    pub fn snapshot(&self) -> Vec<Message> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageId, Payload, Timestamp};
    use proptest::prelude::*;

    fn make_message(id: u64, topic: &str) -> Message {
        Message {
            id: MessageId(id),
            topic: topic.to_string(),
            payload: Payload::Raw(Vec::new()),
            received_at: Timestamp::now(),
            size_bytes: 0,
        }
    }

    #[test]
    fn test_append_below_capacity() {
        let mut window = MessageWindow::new(3);
        window.append(make_message(1, "a"));
        window.append(make_message(2, "b"));
        assert_eq!(window.len(), 2);
        let snapshot = window.snapshot();
        assert_eq!(snapshot[0].id, MessageId(1));
        assert_eq!(snapshot[1].id, MessageId(2));
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut window = MessageWindow::new(3);
        for (i, topic) in ["t1", "t2", "t3", "t4"].iter().enumerate() {
            window.append(make_message(i as u64 + 1, topic));
        }
        let snapshot = window.snapshot();
        let topics: Vec<&str> = snapshot.iter().map(|m| m.topic.as_str()).collect();
        assert_eq!(topics, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn test_clear() {
        let mut window = MessageWindow::new(3);
        window.append(make_message(1, "a"));
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 3);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut window = MessageWindow::new(2);
        window.append(make_message(1, "a"));
        let mut snapshot = window.snapshot();
        snapshot.clear();
        assert_eq!(window.len(), 1);
    }

    proptest! {
        /// len == min(N, C), and the retained items are exactly the most
        /// recent C insertions in arrival order.
        #[test]
        fn prop_capacity_invariant(capacity in 1usize..50, appends in 0usize..200) {
            let mut window = MessageWindow::new(capacity);
            for i in 0..appends {
                window.append(make_message(i as u64, "t"));
            }

            prop_assert_eq!(window.len(), appends.min(capacity));

            let snapshot = window.snapshot();
            let first_retained = appends.saturating_sub(capacity);
            for (offset, msg) in snapshot.iter().enumerate() {
                prop_assert_eq!(msg.id.0, (first_retained + offset) as u64);
            }
        }
    }
}
