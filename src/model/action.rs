//! The verbs a caller may invoke against a subscription record.
//!
//! Every action carries two total, table-attached functions: the state it
//! writes on success (`None` meaning "delete the record") and the log code
//! it records. Legality against the current state lives in the error
//! matrix, not here.

use serde::{Deserialize, Serialize};

use super::log::SubscriptionLogCode;
use super::state::SubscriptionState;

/// A verb of the subscription state machine.
///
/// # Example
///
/// ```rust
/// use subman::{SubscriptionAction, SubscriptionLogCode, SubscriptionState};
///
/// let action = SubscriptionAction::Subscribe;
/// assert_eq!(action.target_state(), Some(SubscriptionState::Subscribed));
/// assert_eq!(action.log_code(), SubscriptionLogCode::Subscribed);
/// assert!(!action.is_managing());
///
/// // Unsubscribing deletes the record on an opt-in list.
/// assert_eq!(SubscriptionAction::Unsubscribe.target_state(), None);
/// assert!(SubscriptionAction::Unsubscribe.is_unsubscribing());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SubscriptionAction {
    /// Self-service opt-in on a subscribable list.
    Subscribe,
    /// Self-service opt-out.
    Unsubscribe,
    /// Self-service request on a moderated opt-in list.
    RequestSubscription,
    /// The persona withdraws their own pending request.
    CancelRequest,
    /// A moderator approves a pending request.
    ApproveRequest,
    /// A moderator denies a pending request.
    DenyRequest,
    /// A moderator denies a pending request and blocks future ones.
    BlockRequest,
    /// A moderator manually subscribes a persona.
    AddSubscriber,
    /// A moderator manually unsubscribes a persona.
    RemoveSubscriber,
    /// A moderator force-subscribes, protecting against automatic removal.
    AddSubscriptionOverride,
    /// A moderator lifts a subscription override, leaving the persona subscribed.
    RemoveSubscriptionOverride,
    /// A moderator blocks a persona, protecting against automatic addition.
    AddUnsubscriptionOverride,
    /// A moderator lifts an unsubscription override, leaving the persona unsubscribed.
    RemoveUnsubscriptionOverride,
    /// A moderator wipes a manual state back to "no record".
    Reset,
    /// The reconciliation sweep removes a record the persona can no longer hold.
    CleanupSubscription,
    /// The reconciliation sweep removes an implicit record no longer implied.
    CleanupImplicit,
}

impl SubscriptionAction {
    /// All actions. Useful for iterating the full vocabulary.
    pub const ALL: [SubscriptionAction; 16] = [
        SubscriptionAction::Subscribe,
        SubscriptionAction::Unsubscribe,
        SubscriptionAction::RequestSubscription,
        SubscriptionAction::CancelRequest,
        SubscriptionAction::ApproveRequest,
        SubscriptionAction::DenyRequest,
        SubscriptionAction::BlockRequest,
        SubscriptionAction::AddSubscriber,
        SubscriptionAction::RemoveSubscriber,
        SubscriptionAction::AddSubscriptionOverride,
        SubscriptionAction::RemoveSubscriptionOverride,
        SubscriptionAction::AddUnsubscriptionOverride,
        SubscriptionAction::RemoveUnsubscriptionOverride,
        SubscriptionAction::Reset,
        SubscriptionAction::CleanupSubscription,
        SubscriptionAction::CleanupImplicit,
    ];

    /// The state written on success, or `None` to delete the record.
    pub fn target_state(self) -> Option<SubscriptionState> {
        match self {
            Self::Subscribe => Some(SubscriptionState::Subscribed),
            Self::Unsubscribe => None,
            Self::RequestSubscription => Some(SubscriptionState::Pending),
            Self::CancelRequest => None,
            Self::ApproveRequest => Some(SubscriptionState::Subscribed),
            Self::DenyRequest => None,
            Self::BlockRequest => Some(SubscriptionState::UnsubscriptionOverride),
            Self::AddSubscriber => Some(SubscriptionState::Subscribed),
            Self::RemoveSubscriber => None,
            Self::AddSubscriptionOverride => Some(SubscriptionState::SubscriptionOverride),
            Self::RemoveSubscriptionOverride => Some(SubscriptionState::Subscribed),
            Self::AddUnsubscriptionOverride => Some(SubscriptionState::UnsubscriptionOverride),
            Self::RemoveUnsubscriptionOverride => Some(SubscriptionState::Unsubscribed),
            Self::Reset => None,
            Self::CleanupSubscription => None,
            Self::CleanupImplicit => None,
        }
    }

    /// The log code recorded on success.
    pub fn log_code(self) -> SubscriptionLogCode {
        match self {
            Self::Subscribe => SubscriptionLogCode::Subscribed,
            Self::Unsubscribe => SubscriptionLogCode::Unsubscribed,
            Self::RequestSubscription => SubscriptionLogCode::SubscriptionRequested,
            Self::CancelRequest => SubscriptionLogCode::RequestCancelled,
            Self::ApproveRequest => SubscriptionLogCode::RequestApproved,
            Self::DenyRequest => SubscriptionLogCode::RequestDenied,
            Self::BlockRequest => SubscriptionLogCode::RequestBlocked,
            Self::AddSubscriber => SubscriptionLogCode::Subscribed,
            Self::RemoveSubscriber => SubscriptionLogCode::Unsubscribed,
            Self::AddSubscriptionOverride => SubscriptionLogCode::MarkedOverride,
            Self::RemoveSubscriptionOverride => SubscriptionLogCode::UnmarkedOverride,
            Self::AddUnsubscriptionOverride => SubscriptionLogCode::MarkedBlocked,
            Self::RemoveUnsubscriptionOverride => SubscriptionLogCode::UnmarkedBlocked,
            Self::Reset => SubscriptionLogCode::Reset,
            Self::CleanupSubscription => SubscriptionLogCode::AutomaticallyRemoved,
            Self::CleanupImplicit => SubscriptionLogCode::AutomaticallyRemoved,
        }
    }

    /// Whether success represents an active opt-out.
    ///
    /// Cleanup actions also remove rows but are deliberately excluded:
    /// cleanup is environmental consequence, not a user choice.
    pub fn is_unsubscribing(self) -> bool {
        matches!(
            self,
            Self::Unsubscribe | Self::RemoveSubscriber | Self::AddUnsubscriptionOverride
        )
    }

    /// Whether invoking this action requires moderator privilege.
    ///
    /// Privilege enforcement itself belongs to the caller; only the
    /// classification is provided here.
    pub fn is_managing(self) -> bool {
        matches!(
            self,
            Self::ApproveRequest
                | Self::DenyRequest
                | Self::BlockRequest
                | Self::AddSubscriber
                | Self::RemoveSubscriber
                | Self::AddSubscriptionOverride
                | Self::RemoveSubscriptionOverride
                | Self::AddUnsubscriptionOverride
                | Self::RemoveUnsubscriptionOverride
                | Self::Reset
        )
    }

    /// Whether this is a cleanup action, invoked only via the
    /// reconciliation helper, never chosen by a caller directly.
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::CleanupSubscription | Self::CleanupImplicit)
    }

    /// Get the action's name for display/logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
            Self::RequestSubscription => "request_subscription",
            Self::CancelRequest => "cancel_request",
            Self::ApproveRequest => "approve_request",
            Self::DenyRequest => "deny_request",
            Self::BlockRequest => "block_request",
            Self::AddSubscriber => "add_subscriber",
            Self::RemoveSubscriber => "remove_subscriber",
            Self::AddSubscriptionOverride => "add_subscription_override",
            Self::RemoveSubscriptionOverride => "remove_subscription_override",
            Self::AddUnsubscriptionOverride => "add_unsubscription_override",
            Self::RemoveUnsubscriptionOverride => "remove_unsubscription_override",
            Self::Reset => "reset",
            Self::CleanupSubscription => "cleanup_subscription",
            Self::CleanupImplicit => "cleanup_implicit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribing_actions_exclude_cleanup() {
        let unsubscribing: Vec<_> = SubscriptionAction::ALL
            .into_iter()
            .filter(|a| a.is_unsubscribing())
            .collect();
        assert_eq!(
            unsubscribing,
            vec![
                SubscriptionAction::Unsubscribe,
                SubscriptionAction::RemoveSubscriber,
                SubscriptionAction::AddUnsubscriptionOverride,
            ]
        );
        assert!(!SubscriptionAction::CleanupSubscription.is_unsubscribing());
        assert!(!SubscriptionAction::CleanupImplicit.is_unsubscribing());
    }

    #[test]
    fn managing_and_automatic_are_disjoint() {
        for action in SubscriptionAction::ALL {
            assert!(!(action.is_managing() && action.is_automatic()));
        }
    }

    #[test]
    fn self_service_actions_are_not_managing() {
        for action in [
            SubscriptionAction::Subscribe,
            SubscriptionAction::Unsubscribe,
            SubscriptionAction::RequestSubscription,
            SubscriptionAction::CancelRequest,
        ] {
            assert!(!action.is_managing());
        }
    }

    #[test]
    fn unsubscribing_actions_never_write_a_subscribing_state() {
        for action in SubscriptionAction::ALL.into_iter().filter(|a| a.is_unsubscribing()) {
            if let Some(target) = action.target_state() {
                assert!(!target.is_subscribed());
            }
        }
    }

    #[test]
    fn cleanup_actions_always_delete() {
        for action in SubscriptionAction::ALL.into_iter().filter(|a| a.is_automatic()) {
            assert_eq!(action.target_state(), None);
            assert_eq!(action.log_code(), SubscriptionLogCode::AutomaticallyRemoved);
        }
    }
}
