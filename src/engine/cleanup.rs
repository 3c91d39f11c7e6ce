//! Cleanup reconciliation of implicit versus explicit subscriptions.
//!
//! `do_cleanup` decides whether a single written record should be removed
//! given the list's current policy and whether the persona is still
//! implied by external group membership. `is_obsolete` is the predicate
//! form used by the reconciliation sweep.

use crate::error::SubscriptionError;
use crate::model::{
    error_matrix, SubscriptionAction, SubscriptionLogCode, SubscriptionPolicy, SubscriptionState,
};

const NO_CLEANUP_NECESSARY: &str = "No cleanup necessary.";

/// Decide whether an automatic removal applies to one record.
///
/// With no policy the persona has no means of access and any removable
/// record goes; on an implicits-only list a record whose persona is no
/// longer implied goes. Everything else is "no cleanup necessary", an
/// expected informational outcome when sweeping all subscribers.
///
/// Success is always `(None, AutomaticallyRemoved)`: cleanup only ever
/// deletes.
pub fn do_cleanup(
    policy: Option<SubscriptionPolicy>,
    old_state: Option<SubscriptionState>,
    is_implied: bool,
) -> Result<(Option<SubscriptionState>, SubscriptionLogCode), SubscriptionError> {
    let action = match policy {
        None => SubscriptionAction::CleanupSubscription,
        Some(p) if !is_implied && p.is_implicit() => SubscriptionAction::CleanupImplicit,
        Some(_) => return Err(SubscriptionError::info(NO_CLEANUP_NECESSARY)),
    };

    if let Some(error) = error_matrix().check(action, old_state) {
        return Err(*error);
    }

    Ok((None, action.log_code()))
}

/// Whether a written record should be deleted by the reconciliation sweep.
///
/// Pure predicate wrapping [`do_cleanup`]: `true` if cleanup would
/// succeed, `false` if it declines for any reason, protection and "no
/// cleanup necessary" included.
///
/// # Example
///
/// ```rust
/// use subman::{is_obsolete, SubscriptionPolicy, SubscriptionState};
///
/// let policy = Some(SubscriptionPolicy::ImplicitsOnly);
/// let state = Some(SubscriptionState::Implicit);
///
/// // Still implied by group membership: keep the record.
/// assert!(!is_obsolete(policy, state, true));
/// // No longer implied: remove it.
/// assert!(is_obsolete(policy, state, false));
/// ```
pub fn is_obsolete(
    policy: Option<SubscriptionPolicy>,
    old_state: Option<SubscriptionState>,
    is_implied: bool,
) -> bool {
    do_cleanup(policy, old_state, is_implied).is_ok()
}
