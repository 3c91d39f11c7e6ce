//! Property-based tests for the subscription state machine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs, alongside the literal regression
//! scenarios the persistence contract depends on.

use proptest::prelude::*;
use subman::{
    apply_action, cleanup_protected_states, do_cleanup, error_matrix, is_obsolete, ErrorKind,
    SubscriptionAction, SubscriptionLogCode, SubscriptionPolicy, SubscriptionState,
};

prop_compose! {
    fn arbitrary_action()(index in 0..SubscriptionAction::ALL.len()) -> SubscriptionAction {
        SubscriptionAction::ALL[index]
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..7u8) -> Option<SubscriptionState> {
        if variant == 6 {
            None
        } else {
            Some(SubscriptionState::ALL[variant as usize])
        }
    }
}

prop_compose! {
    fn arbitrary_policy()(variant in 0..5u8) -> Option<SubscriptionPolicy> {
        if variant == 4 {
            None
        } else {
            Some(SubscriptionPolicy::ALL[variant as usize])
        }
    }
}

proptest! {
    #[test]
    fn matrix_is_total_over_all_pairs(
        action in arbitrary_action(),
        state in arbitrary_state(),
    ) {
        // check() panics on a missing cell; any populated cell carries a
        // known kind and a message.
        if let Some(error) = error_matrix().check(action, state) {
            prop_assert!(matches!(error.kind, ErrorKind::Error | ErrorKind::Info));
            prop_assert!(!error.message.is_empty());
        }
    }

    #[test]
    fn apply_action_is_deterministic(
        action in arbitrary_action(),
        policy in arbitrary_policy(),
        allow_unsub in any::<bool>(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        let first = apply_action(action, policy, allow_unsub, old_state, is_implied);
        let second = apply_action(action, policy, allow_unsub, old_state, is_implied);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn success_matches_the_action_tables(
        action in arbitrary_action(),
        policy in arbitrary_policy(),
        allow_unsub in any::<bool>(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        if let Ok((new_state, log_code)) = apply_action(action, policy, allow_unsub, old_state, is_implied) {
            prop_assert_eq!(new_state, action.target_state());
            prop_assert_eq!(log_code, action.log_code());
        }
    }

    #[test]
    fn success_implies_matrix_legality(
        action in arbitrary_action(),
        policy in arbitrary_policy(),
        allow_unsub in any::<bool>(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        if !action.is_automatic()
            && apply_action(action, policy, allow_unsub, old_state, is_implied).is_ok()
        {
            prop_assert!(error_matrix().is_legal(action, old_state));
        }
    }

    #[test]
    fn protected_states_are_never_obsolete(
        policy in arbitrary_policy(),
        is_implied in any::<bool>(),
    ) {
        for state in cleanup_protected_states() {
            prop_assert!(!is_obsolete(policy, Some(state), is_implied));
        }
    }

    #[test]
    fn reached_protected_states_survive_cleanup(
        action in arbitrary_action(),
        policy in arbitrary_policy(),
        allow_unsub in any::<bool>(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        // Applying any action and immediately re-deriving obsolescence for
        // the same policy and implication must respect the protected set.
        if let Ok((Some(new_state), _)) =
            apply_action(action, policy, allow_unsub, old_state, is_implied)
        {
            if cleanup_protected_states().contains(&new_state) {
                prop_assert!(!is_obsolete(policy, Some(new_state), is_implied));
            }
        }
    }

    #[test]
    fn is_obsolete_agrees_with_do_cleanup(
        policy in arbitrary_policy(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        prop_assert_eq!(
            is_obsolete(policy, old_state, is_implied),
            do_cleanup(policy, old_state, is_implied).is_ok()
        );
    }

    #[test]
    fn cleanup_only_ever_deletes(
        policy in arbitrary_policy(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        if let Ok((new_state, log_code)) = do_cleanup(policy, old_state, is_implied) {
            prop_assert_eq!(new_state, None);
            prop_assert_eq!(log_code, SubscriptionLogCode::AutomaticallyRemoved);
        }
    }

    #[test]
    fn unsubscribing_actions_honor_allow_unsub(
        policy in arbitrary_policy(),
        old_state in arbitrary_state(),
        is_implied in any::<bool>(),
    ) {
        for action in SubscriptionAction::ALL {
            if action.is_unsubscribing() {
                let outcome = apply_action(action, policy, false, old_state, is_implied);
                prop_assert!(outcome.is_err());
            }
        }
    }
}

#[test]
fn state_codes_are_pinned_exactly() {
    // Callers and persistence rely on these exact integers.
    let expected = [
        ("subscribed", 1),
        ("unsubscribed", 2),
        ("subscription_override", 10),
        ("unsubscription_override", 11),
        ("pending", 20),
        ("implicit", 30),
    ];
    assert_eq!(SubscriptionState::ALL.len(), expected.len());
    for (state, (name, code)) in SubscriptionState::ALL.into_iter().zip(expected) {
        assert_eq!(state.name(), name);
        assert_eq!(state.code(), code);
    }
}

#[test]
fn protected_set_matches_the_published_contract() {
    let expected: std::collections::BTreeSet<_> = [
        SubscriptionState::Unsubscribed,
        SubscriptionState::SubscriptionOverride,
        SubscriptionState::UnsubscriptionOverride,
        SubscriptionState::Pending,
    ]
    .into_iter()
    .collect();
    assert_eq!(cleanup_protected_states(), expected);
}

#[test]
fn is_subscribed_matches_the_published_contract() {
    for state in SubscriptionState::ALL {
        let expected = matches!(
            state,
            SubscriptionState::Subscribed
                | SubscriptionState::SubscriptionOverride
                | SubscriptionState::Implicit
        );
        assert_eq!(state.is_subscribed(), expected);
    }
}

#[test]
fn scenario_subscribe_from_no_record() {
    let outcome = apply_action(
        SubscriptionAction::Subscribe,
        Some(SubscriptionPolicy::Subscribable),
        true,
        None,
        false,
    );
    assert_eq!(
        outcome,
        Ok((
            Some(SubscriptionState::Subscribed),
            SubscriptionLogCode::Subscribed,
        ))
    );
}

#[test]
fn scenario_subscribe_on_moderated_list_fails_before_the_matrix() {
    let outcome = apply_action(
        SubscriptionAction::Subscribe,
        Some(SubscriptionPolicy::ModeratedOptIn),
        true,
        None,
        false,
    );
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Error);
    assert_eq!(error.message, "Can not subscribe.");
}

#[test]
fn scenario_unsubscribe_forbidden_by_the_list() {
    let outcome = apply_action(
        SubscriptionAction::Unsubscribe,
        Some(SubscriptionPolicy::Subscribable),
        false,
        Some(SubscriptionState::Subscribed),
        false,
    );
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Error);
    assert_eq!(error.message, "Can not unsubscribe.");
}

#[test]
fn scenario_implied_implicit_record_is_kept() {
    assert!(!is_obsolete(
        Some(SubscriptionPolicy::ImplicitsOnly),
        Some(SubscriptionState::Implicit),
        true,
    ));
}

#[test]
fn scenario_stale_implicit_record_is_removed() {
    assert!(is_obsolete(
        Some(SubscriptionPolicy::ImplicitsOnly),
        Some(SubscriptionState::Implicit),
        false,
    ));
}

#[test]
fn scenario_override_bypasses_missing_policy() {
    let outcome = apply_action(
        SubscriptionAction::AddSubscriptionOverride,
        None,
        true,
        None,
        false,
    );
    assert_eq!(
        outcome,
        Ok((
            Some(SubscriptionState::SubscriptionOverride),
            SubscriptionLogCode::MarkedOverride,
        ))
    );
}

#[test]
fn scenario_resubscribing_is_informational() {
    let outcome = apply_action(
        SubscriptionAction::Subscribe,
        Some(SubscriptionPolicy::Subscribable),
        true,
        Some(SubscriptionState::Subscribed),
        false,
    );
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Info);
    assert_eq!(error.message, "User already subscribed.");
}
