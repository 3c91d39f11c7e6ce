//! Log codes recorded alongside successful transitions.

use serde::{Deserialize, Serialize};

/// What gets written to the list's audit log when a transition succeeds.
///
/// Each action maps to exactly one code via
/// [`SubscriptionAction::log_code`](crate::SubscriptionAction::log_code).
/// The integer codes are part of the persistence contract.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum SubscriptionLogCode {
    /// A persona was subscribed, by themselves or a moderator.
    Subscribed = 1,
    /// A persona was unsubscribed, by themselves or a moderator.
    Unsubscribed = 2,
    /// A subscription override was placed.
    MarkedOverride = 10,
    /// A subscription override was lifted.
    UnmarkedOverride = 11,
    /// An unsubscription override was placed.
    MarkedBlocked = 12,
    /// An unsubscription override was lifted.
    UnmarkedBlocked = 13,
    /// A persona requested subscription to a moderated list.
    SubscriptionRequested = 20,
    /// A moderator approved a pending request.
    RequestApproved = 21,
    /// A moderator denied a pending request.
    RequestDenied = 22,
    /// The persona withdrew their pending request.
    RequestCancelled = 23,
    /// A moderator blocked a pending request with an override.
    RequestBlocked = 24,
    /// A manual subscription state was wiped by a moderator.
    Reset = 30,
    /// A record was removed by the cleanup reconciliation.
    AutomaticallyRemoved = 40,
}

impl SubscriptionLogCode {
    /// The stable integer code persisted by callers.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Get the code's name for display/logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::MarkedOverride => "marked_override",
            Self::UnmarkedOverride => "unmarked_override",
            Self::MarkedBlocked => "marked_blocked",
            Self::UnmarkedBlocked => "unmarked_blocked",
            Self::SubscriptionRequested => "subscription_requested",
            Self::RequestApproved => "request_approved",
            Self::RequestDenied => "request_denied",
            Self::RequestCancelled => "request_cancelled",
            Self::RequestBlocked => "request_blocked",
            Self::Reset => "reset",
            Self::AutomaticallyRemoved => "automatically_removed",
        }
    }
}
