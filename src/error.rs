//! Declared subscription errors.
//!
//! Every condition the engine can signal is a declared value from the
//! error matrix or a list-level precondition, carrying a message and a
//! severity kind. Benign no-op outcomes ("User already subscribed.")
//! travel the same `Err` channel as hard violations so callers cannot
//! forget to classify them; they differ only in `kind`.

use thiserror::Error;

/// Severity of a declared subscription error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// A hard domain violation; must always be surfaced to the caller.
    Error,
    /// A benign no-op; presentable to end users as informational.
    Info,
}

/// A declared outcome of an illegal or no-op transition attempt.
///
/// # Example
///
/// ```rust
/// use subman::{ErrorKind, SubscriptionError};
///
/// let err = SubscriptionError::info("User already subscribed.");
/// assert!(err.is_info());
/// assert_eq!(err.kind, ErrorKind::Info);
/// assert_eq!(err.to_string(), "User already subscribed.");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("{message}")]
pub struct SubscriptionError {
    /// Severity tag callers classify by.
    pub kind: ErrorKind,
    /// Human-readable description of the condition.
    pub message: &'static str,
}

impl SubscriptionError {
    /// A hard domain violation.
    pub const fn error(message: &'static str) -> Self {
        Self {
            kind: ErrorKind::Error,
            message,
        }
    }

    /// A benign no-op outcome.
    pub const fn info(message: &'static str) -> Self {
        Self {
            kind: ErrorKind::Info,
            message,
        }
    }

    /// Whether this is informational rather than a hard violation.
    pub fn is_info(&self) -> bool {
        self.kind == ErrorKind::Info
    }
}
