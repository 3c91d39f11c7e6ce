//! Subscription states recorded for a (persona, list) pair.
//!
//! A state is a pure value with a stable integer code. The absence of a
//! record is itself a reachable logical state and is modelled as
//! `Option<SubscriptionState>` being `None` throughout the crate.

use serde::{Deserialize, Serialize};

/// The recorded relationship between a persona and a mailing list.
///
/// States are totally ordered by their integer code; declaration order
/// matches numeric order. The codes are part of the persistence contract
/// and must never change.
///
/// # Example
///
/// ```rust
/// use subman::SubscriptionState;
///
/// assert_eq!(SubscriptionState::Subscribed.code(), 1);
/// assert!(SubscriptionState::Subscribed.is_subscribed());
/// assert!(!SubscriptionState::Pending.is_subscribed());
/// assert_eq!(SubscriptionState::from_code(30), Some(SubscriptionState::Implicit));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum SubscriptionState {
    /// Explicit opt-in by the persona.
    Subscribed = 1,
    /// Explicit opt-out, meaningful mainly on opt-out lists.
    Unsubscribed = 2,
    /// Moderator force-subscribed; immune to automatic removal.
    SubscriptionOverride = 10,
    /// Moderator force-blocked; immune to automatic addition.
    UnsubscriptionOverride = 11,
    /// Awaiting a moderator decision on a subscription request.
    Pending = 20,
    /// Derived from external group membership, not a manual choice.
    Implicit = 30,
}

impl SubscriptionState {
    /// All states, in code order. Useful for iterating the full vocabulary.
    pub const ALL: [SubscriptionState; 6] = [
        SubscriptionState::Subscribed,
        SubscriptionState::Unsubscribed,
        SubscriptionState::SubscriptionOverride,
        SubscriptionState::UnsubscriptionOverride,
        SubscriptionState::Pending,
        SubscriptionState::Implicit,
    ];

    /// The stable integer code persisted by callers.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look a state up by its persisted integer code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.code() == code)
    }

    /// Get the state's name for display/logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::SubscriptionOverride => "subscription_override",
            Self::UnsubscriptionOverride => "unsubscription_override",
            Self::Pending => "pending",
            Self::Implicit => "implicit",
        }
    }

    /// Whether a persona in this state receives list mail.
    ///
    /// True exactly for `Subscribed`, `SubscriptionOverride` and `Implicit`.
    pub fn is_subscribed(self) -> bool {
        matches!(
            self,
            Self::Subscribed | Self::SubscriptionOverride | Self::Implicit
        )
    }
}
