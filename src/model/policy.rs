//! List-level subscription policies.
//!
//! A policy is attached to a mailing list by the caller and consumed
//! read-only here. `Option<SubscriptionPolicy>` being `None` means the
//! persona has no means of accessing the list at all.

use serde::{Deserialize, Serialize};

/// What a mailing list permits for a given persona.
///
/// # Example
///
/// ```rust
/// use subman::SubscriptionPolicy;
///
/// assert!(SubscriptionPolicy::Subscribable.may_subscribe());
/// assert!(SubscriptionPolicy::ModeratedOptIn.may_request());
/// assert!(SubscriptionPolicy::ImplicitsOnly.is_implicit());
/// assert!(!SubscriptionPolicy::InvitationOnly.may_subscribe());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SubscriptionPolicy {
    /// Free self-service subscribe.
    Subscribable,
    /// Self-service requires moderator approval.
    ModeratedOptIn,
    /// No self-service at all; only moderators add subscribers.
    InvitationOnly,
    /// Only group-derived membership is permitted.
    ImplicitsOnly,
}

impl SubscriptionPolicy {
    /// All policies, for iterating the full vocabulary.
    pub const ALL: [SubscriptionPolicy; 4] = [
        SubscriptionPolicy::Subscribable,
        SubscriptionPolicy::ModeratedOptIn,
        SubscriptionPolicy::InvitationOnly,
        SubscriptionPolicy::ImplicitsOnly,
    ];

    /// Get the policy's name for display/logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Subscribable => "subscribable",
            Self::ModeratedOptIn => "moderated_opt_in",
            Self::InvitationOnly => "invitation_only",
            Self::ImplicitsOnly => "implicits_only",
        }
    }

    /// Whether subscription is exclusively group-derived.
    pub fn is_implicit(self) -> bool {
        matches!(self, Self::ImplicitsOnly)
    }

    /// Whether a persona may subscribe without moderator involvement.
    pub fn may_subscribe(self) -> bool {
        matches!(self, Self::Subscribable)
    }

    /// Whether a persona may place a subscription request.
    pub fn may_request(self) -> bool {
        matches!(self, Self::ModeratedOptIn)
    }
}
