//! Bounded, most-recent-first buffer of execution output.

use std::collections::VecDeque;

pub const DEFAULT_LOG_CAPACITY: usize = 300;

/// Payload the service emits for blank output lines; never stored.
const BARE_NEWLINE: &str = "\n";

#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends `item`, evicting the oldest entry once over capacity.
    ///
    /// Returns `false` when the item was suppressed.
    pub fn push(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if item == BARE_NEWLINE || self.capacity == 0 {
            return false;
        }

        self.entries.push_front(item);
        self.entries.truncate(self.capacity);
        true
    }

    /// Replaces the contents from a service-side window ordered oldest first.
    pub fn resync<I>(&mut self, oldest_first: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries.clear();
        for item in oldest_first {
            self.push(item);
        }
    }

    pub fn front(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_comes_first() {
        let mut logs = LogBuffer::default();
        logs.push("A");
        logs.push("B");
        assert_eq!(logs.iter().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut logs = LogBuffer::default();
        for i in 1..=301 {
            logs.push(format!("L{i}"));
        }

        assert_eq!(logs.len(), 300);
        assert_eq!(logs.front(), Some("L301"));
        assert_eq!(logs.iter().last(), Some("L2"));
        assert!(!logs.iter().any(|entry| entry == "L1"));
    }

    #[test]
    fn bare_newline_is_suppressed() {
        let mut logs = LogBuffer::new(3);
        assert!(!logs.push("\n"));
        assert!(logs.is_empty());

        assert!(logs.push("\n\n"));
        assert!(logs.push(""));
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn never_exceeds_capacity_under_mixed_pushes() {
        let mut logs = LogBuffer::new(5);
        for i in 0..40 {
            if i % 3 == 0 {
                logs.push("\n");
            } else {
                logs.push(i.to_string());
            }
            assert!(logs.len() <= 5);
        }
        assert!(logs.iter().all(|entry| entry != "\n"));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut logs = LogBuffer::new(0);
        assert!(!logs.push("x"));
        assert!(logs.is_empty());
    }

    #[test]
    fn resync_keeps_newest_window() {
        let mut logs = LogBuffer::new(2);
        logs.push("stale");
        logs.resync(["a", "b", "c"].map(String::from));

        assert_eq!(logs.iter().collect::<Vec<_>>(), vec!["c", "b"]);
    }
}
