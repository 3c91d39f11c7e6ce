//! Immutable journal of applied subscription transitions.
//!
//! Callers persist one log entry per successful transition; this module
//! supplies the in-memory value types. The journal is immutable: `record`
//! returns a new journal with the entry appended, leaving the original
//! untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::model::{SubscriptionAction, SubscriptionLogCode};

/// Record of a single applied transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The action that was resolved.
    pub action: SubscriptionAction,
    /// The log code returned by the engine.
    pub code: SubscriptionLogCode,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

/// Ordered journal of applied transitions for one (persona, list) pair.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use subman::journal::{Journal, LogEntry};
/// use subman::SubscriptionAction;
///
/// let journal = Journal::new();
/// let entry = LogEntry {
///     action: SubscriptionAction::Subscribe,
///     code: SubscriptionAction::Subscribe.log_code(),
///     timestamp: Utc::now(),
/// };
///
/// let journal = journal.record(entry);
/// assert_eq!(journal.entries().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<LogEntry>,
}

impl Journal {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an entry, returning a new journal.
    ///
    /// This is a pure function: the existing journal is not mutated.
    pub fn record(&self, entry: LogEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// All recorded entries, in order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// The log codes in recording order.
    pub fn codes(&self) -> Vec<SubscriptionLogCode> {
        self.entries.iter().map(|entry| entry.code).collect()
    }

    /// Time between the first and the last entry.
    ///
    /// Returns `None` for a journal with fewer than one entry.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
