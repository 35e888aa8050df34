// ============================================
// File: crates/freia-client/src/log.rs
// ============================================
//! # Message Log
//!
//! ## Creation Reason
//! The chat window's only data source: an ordered, append-only list of
//! display lines written by `send` (local echo, errors) and by the
//! receive worker (peer messages, notices).
//!
//! ## Main Functionality
//! - `MessageLog::push`: Append one whole line under the lock
//! - `MessageLog::snapshot`: Copy out every line under the lock
//! - `MessageLog::since`: Copy out the lines after an offset
//!
//! ## ⚠️ Important Note for Next Developer
//! - Readers always get an owned copy; never hand out a guard or a
//!   reference into the vector
//! - Order is arrival order; do not sort
//!
//! ## Last Modified
//! v0.1.0 - Initial message log

use std::sync::Arc;

use parking_lot::Mutex;

// ============================================
// Notice Lines
// ============================================

/// Appended when a connection is established.
pub const NOTICE_CONNECTED: &str = "[Connected to server]";

/// Appended when the peer closes the stream or a read fails.
pub const NOTICE_DISCONNECTED: &str = "[Disconnected from server]";

/// Appended when a frame declares a length outside `1..=10 MiB`.
pub const NOTICE_INVALID_LENGTH: &str = "[Error] Invalid message length received.";

/// Appended when a frame arrives but no transport key is configured.
pub const NOTICE_NO_TRANSPORT_KEY: &str =
    "[Error] Received encrypted message but no password is set.";

/// Appended when writing an outgoing frame to the socket fails.
pub const NOTICE_SEND_FAILED: &str = "[Error] Failed to send message.";

// ============================================
// MessageLog
// ============================================

/// Thread-safe, append-only log of display lines.
///
/// Clones share the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&self, line: impl Into<String>) {
        self.entries.lock().push(line.into());
    }

    /// Returns a copy of every line, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Returns a copy of the lines after the first `offset`.
    #[must_use]
    pub fn since(&self, offset: usize) -> Vec<String> {
        let entries = self.entries.lock();
        entries.get(offset..).map(<[String]>::to_vec).unwrap_or_default()
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if no line has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_push_and_snapshot() {
        let log = MessageLog::new();
        assert!(log.is_empty());

        log.push(NOTICE_CONNECTED);
        log.push(String::from("alice: hi"));

        assert_eq!(log.snapshot(), vec![NOTICE_CONNECTED, "alice: hi"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let log = MessageLog::new();
        log.push("one");
        let snap = log.snapshot();
        log.push("two");
        assert_eq!(snap.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_since() {
        let log = MessageLog::new();
        for line in ["a", "b", "c"] {
            log.push(line);
        }
        assert_eq!(log.since(1), vec!["b", "c"]);
        assert!(log.since(3).is_empty());
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn test_concurrent_appends_stay_whole() {
        const WRITERS: usize = 8;
        const LINES: usize = 500;

        let log = MessageLog::new();
        let handles: Vec<_> = (0..WRITERS)
            .map(|w| {
                let log = log.clone();
                thread::spawn(move || {
                    for i in 0..LINES {
                        log.push(format!("writer{w}: line {i}"));
                    }
                })
            })
            .collect();

        // Read concurrently with the writers.
        for _ in 0..50 {
            for line in log.snapshot() {
                assert!(line.starts_with("writer") && line.contains(": line "));
            }
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let lines = log.snapshot();
        assert_eq!(lines.len(), WRITERS * LINES);

        // Each writer's lines appear in the order it wrote them.
        for w in 0..WRITERS {
            let prefix = format!("writer{w}: ");
            let own: Vec<usize> = lines
                .iter()
                .filter_map(|l| l.strip_prefix(&prefix))
                .map(|rest| rest.trim_start_matches("line ").parse().unwrap())
                .collect();
            assert_eq!(own, (0..LINES).collect::<Vec<_>>());
        }
    }
}
