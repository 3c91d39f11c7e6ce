//! The transition entry point.
//!
//! `apply_action` enforces the list-level preconditions that cannot live
//! in the static matrix (they depend on external policy and flags, not on
//! the current state), then delegates to the matrix for state-dependent
//! legality and computes the outcome. It is a pure function of its five
//! arguments; the caller persists the result.

use crate::error::SubscriptionError;
use crate::model::{
    error_matrix, SubscriptionAction, SubscriptionLogCode, SubscriptionPolicy, SubscriptionState,
};

use super::cleanup::do_cleanup;

const CAN_NOT_SUBSCRIBE: &str = "Can not subscribe.";
const CAN_NOT_UNSUBSCRIBE: &str = "Can not unsubscribe.";
const CAN_NOT_ADD_SUBSCRIBER: &str = "Can not add subscriber.";
const CAN_NOT_REQUEST: &str = "Can not request subscription.";

/// Resolve one action against one (persona, list) pair.
///
/// On success, returns the state the caller should write (`None` meaning
/// "delete the record") and the log code to record alongside it, ideally
/// in the same atomic unit as the read of `old_state`. Declared errors,
/// informational no-ops included, come back as `Err`; callers classify
/// them by [`ErrorKind`](crate::ErrorKind).
///
/// Cleanup actions are routed through [`do_cleanup`], which is the only
/// consumer of `is_implied`.
///
/// # Example
///
/// ```rust
/// use subman::{
///     apply_action, SubscriptionAction, SubscriptionLogCode, SubscriptionPolicy,
///     SubscriptionState,
/// };
///
/// let outcome = apply_action(
///     SubscriptionAction::Subscribe,
///     Some(SubscriptionPolicy::Subscribable),
///     true,
///     None,
///     false,
/// );
/// assert_eq!(
///     outcome,
///     Ok((
///         Some(SubscriptionState::Subscribed),
///         SubscriptionLogCode::Subscribed,
///     ))
/// );
/// ```
pub fn apply_action(
    action: SubscriptionAction,
    policy: Option<SubscriptionPolicy>,
    allow_unsub: bool,
    old_state: Option<SubscriptionState>,
    is_implied: bool,
) -> Result<(Option<SubscriptionState>, SubscriptionLogCode), SubscriptionError> {
    if action.is_automatic() {
        return do_cleanup(policy, old_state, is_implied);
    }

    check_transition_requirements(action, policy, allow_unsub)?;

    if let Some(error) = error_matrix().check(action, old_state) {
        return Err(*error);
    }

    Ok((action.target_state(), action.log_code()))
}

/// List-level preconditions, checked before `old_state` is consulted.
fn check_transition_requirements(
    action: SubscriptionAction,
    policy: Option<SubscriptionPolicy>,
    allow_unsub: bool,
) -> Result<(), SubscriptionError> {
    // Some lists forbid even voluntary unsubscription.
    if action.is_unsubscribing() && !allow_unsub {
        return Err(SubscriptionError::error(CAN_NOT_UNSUBSCRIBE));
    }

    match action {
        SubscriptionAction::Subscribe if !policy.is_some_and(|p| p.may_subscribe()) => {
            Err(SubscriptionError::error(CAN_NOT_SUBSCRIBE))
        }
        SubscriptionAction::RequestSubscription if !policy.is_some_and(|p| p.may_request()) => {
            Err(SubscriptionError::error(CAN_NOT_REQUEST))
        }
        // Moderators cannot manually add a subscriber to a list where
        // subscription is exclusively group-derived, or where the persona
        // has no means of access at all.
        SubscriptionAction::AddSubscriber if policy.map_or(true, |p| p.is_implicit()) => {
            Err(SubscriptionError::error(CAN_NOT_ADD_SUBSCRIBER))
        }
        _ => Ok(()),
    }
}
