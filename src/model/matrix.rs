//! The legality matrix: the single source of truth for whether an action
//! is permitted from a given state.
//!
//! The matrix is data, not a chain of conditionals: one cell per
//! (action, logical state) pair, including the "no record" state, built
//! once at first use and never mutated. A populated cell is the declared
//! error for that pair; an empty cell means the transition is legal.
//! Looking up a pair with no cell is a programming error and panics.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::error::SubscriptionError;

use super::action::SubscriptionAction;
use super::state::SubscriptionState;

type Cell = Option<SubscriptionError>;

const ALREADY_SUBSCRIBED: &str = "User already subscribed.";
const ALREADY_UNSUBSCRIBED: &str = "User already unsubscribed.";
const ALREADY_REQUESTED: &str = "User already requested subscription.";
const PENDING_REQUEST: &str = "User has pending subscription request.";
const NO_PENDING_REQUEST: &str = "User has no pending subscription request.";
const BLOCKED: &str = "Can not change subscription because user is blocked.";
const HAS_SUBSCRIPTION_OVERRIDE: &str = "User already has subscription override.";
const HAS_UNSUBSCRIPTION_OVERRIDE: &str = "User already has unsubscription override.";
const NO_SUBSCRIPTION_OVERRIDE: &str = "User has no subscription override.";
const NO_UNSUBSCRIPTION_OVERRIDE: &str = "User has no unsubscription override.";
const OVERRIDE_BLOCKS_REMOVAL: &str = "User has subscription override. Remove it first.";
const OVERRIDES_NOT_RESET: &str = "Overrides can not be reset.";
const NO_STATE: &str = "User has no subscription state.";
const NO_RECORD: &str = "User has no subscription record.";
const PROTECTED_OVERRIDE: &str = "Overrides are protected against automatic cleanup.";
const PROTECTED_UNSUBSCRIPTION: &str = "Unsubscriptions are protected against automatic cleanup.";
const PROTECTED_PENDING: &str = "Pending requests are protected against automatic cleanup.";
const NOT_IMPLICIT: &str = "Subscription is not implicit.";

const fn ok() -> Cell {
    None
}

const fn err(message: &'static str) -> Cell {
    Some(SubscriptionError::error(message))
}

const fn info(message: &'static str) -> Cell {
    Some(SubscriptionError::info(message))
}

/// Column order of every row literal below.
const COLUMNS: [Option<SubscriptionState>; 7] = [
    Some(SubscriptionState::Subscribed),
    Some(SubscriptionState::Unsubscribed),
    Some(SubscriptionState::SubscriptionOverride),
    Some(SubscriptionState::UnsubscriptionOverride),
    Some(SubscriptionState::Pending),
    Some(SubscriptionState::Implicit),
    None,
];

/// The full (action, state) legality table.
pub struct ErrorMatrix {
    cells: HashMap<(SubscriptionAction, Option<SubscriptionState>), Cell>,
}

impl ErrorMatrix {
    /// The declared error for attempting `action` from `state`, or `None`
    /// if the transition is legal.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has no cell for the pair. That indicates an
    /// incomplete table, which is a bug, never a domain condition.
    pub fn check(
        &self,
        action: SubscriptionAction,
        state: Option<SubscriptionState>,
    ) -> Option<&SubscriptionError> {
        match self.cells.get(&(action, state)) {
            Some(cell) => cell.as_ref(),
            None => panic!(
                "error matrix is missing a cell for ({}, {:?})",
                action.name(),
                state.map(SubscriptionState::name),
            ),
        }
    }

    /// Whether `action` is legal from `state`.
    pub fn is_legal(&self, action: SubscriptionAction, state: Option<SubscriptionState>) -> bool {
        self.check(action, state).is_none()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the matrix is empty. Never true in practice.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn insert_row(
    cells: &mut HashMap<(SubscriptionAction, Option<SubscriptionState>), Cell>,
    action: SubscriptionAction,
    outcomes: [Cell; 7],
) {
    for (state, cell) in COLUMNS.into_iter().zip(outcomes) {
        cells.insert((action, state), cell);
    }
}

static MATRIX: LazyLock<ErrorMatrix> = LazyLock::new(|| {
    use SubscriptionAction::*;

    let mut cells = HashMap::with_capacity(SubscriptionAction::ALL.len() * COLUMNS.len());

    // Columns: subscribed, unsubscribed, subscription_override,
    // unsubscription_override, pending, implicit, no record.
    insert_row(
        &mut cells,
        Subscribe,
        [
            info(ALREADY_SUBSCRIBED),
            ok(),
            info(ALREADY_SUBSCRIBED),
            err(BLOCKED),
            err(PENDING_REQUEST),
            info(ALREADY_SUBSCRIBED),
            ok(),
        ],
    );
    insert_row(
        &mut cells,
        Unsubscribe,
        [
            ok(),
            info(ALREADY_UNSUBSCRIBED),
            ok(),
            info(ALREADY_UNSUBSCRIBED),
            err(PENDING_REQUEST),
            ok(),
            info(ALREADY_UNSUBSCRIBED),
        ],
    );
    insert_row(
        &mut cells,
        RequestSubscription,
        [
            info(ALREADY_SUBSCRIBED),
            ok(),
            info(ALREADY_SUBSCRIBED),
            err(BLOCKED),
            info(ALREADY_REQUESTED),
            info(ALREADY_SUBSCRIBED),
            ok(),
        ],
    );
    // The four request decisions are only meaningful against a pending
    // request.
    for action in [CancelRequest, ApproveRequest, DenyRequest, BlockRequest] {
        insert_row(
            &mut cells,
            action,
            [
                err(NO_PENDING_REQUEST),
                err(NO_PENDING_REQUEST),
                err(NO_PENDING_REQUEST),
                err(NO_PENDING_REQUEST),
                ok(),
                err(NO_PENDING_REQUEST),
                err(NO_PENDING_REQUEST),
            ],
        );
    }
    insert_row(
        &mut cells,
        AddSubscriber,
        [
            info(ALREADY_SUBSCRIBED),
            ok(),
            info(ALREADY_SUBSCRIBED),
            err(BLOCKED),
            err(PENDING_REQUEST),
            ok(),
            ok(),
        ],
    );
    insert_row(
        &mut cells,
        RemoveSubscriber,
        [
            ok(),
            info(ALREADY_UNSUBSCRIBED),
            err(OVERRIDE_BLOCKS_REMOVAL),
            info(ALREADY_UNSUBSCRIBED),
            err(PENDING_REQUEST),
            ok(),
            info(ALREADY_UNSUBSCRIBED),
        ],
    );
    insert_row(
        &mut cells,
        AddSubscriptionOverride,
        [
            ok(),
            ok(),
            info(HAS_SUBSCRIPTION_OVERRIDE),
            ok(),
            err(PENDING_REQUEST),
            ok(),
            ok(),
        ],
    );
    insert_row(
        &mut cells,
        RemoveSubscriptionOverride,
        [
            err(NO_SUBSCRIPTION_OVERRIDE),
            err(NO_SUBSCRIPTION_OVERRIDE),
            ok(),
            err(NO_SUBSCRIPTION_OVERRIDE),
            err(NO_SUBSCRIPTION_OVERRIDE),
            err(NO_SUBSCRIPTION_OVERRIDE),
            err(NO_SUBSCRIPTION_OVERRIDE),
        ],
    );
    insert_row(
        &mut cells,
        AddUnsubscriptionOverride,
        [
            ok(),
            ok(),
            ok(),
            info(HAS_UNSUBSCRIPTION_OVERRIDE),
            err(PENDING_REQUEST),
            ok(),
            ok(),
        ],
    );
    insert_row(
        &mut cells,
        RemoveUnsubscriptionOverride,
        [
            err(NO_UNSUBSCRIPTION_OVERRIDE),
            err(NO_UNSUBSCRIPTION_OVERRIDE),
            err(NO_UNSUBSCRIPTION_OVERRIDE),
            ok(),
            err(NO_UNSUBSCRIPTION_OVERRIDE),
            err(NO_UNSUBSCRIPTION_OVERRIDE),
            err(NO_UNSUBSCRIPTION_OVERRIDE),
        ],
    );
    insert_row(
        &mut cells,
        Reset,
        [
            ok(),
            ok(),
            err(OVERRIDES_NOT_RESET),
            err(OVERRIDES_NOT_RESET),
            err(PENDING_REQUEST),
            ok(),
            info(NO_STATE),
        ],
    );
    insert_row(
        &mut cells,
        CleanupSubscription,
        [
            ok(),
            err(PROTECTED_UNSUBSCRIPTION),
            err(PROTECTED_OVERRIDE),
            err(PROTECTED_OVERRIDE),
            err(PROTECTED_PENDING),
            ok(),
            err(NO_RECORD),
        ],
    );
    insert_row(
        &mut cells,
        CleanupImplicit,
        [
            err(NOT_IMPLICIT),
            err(PROTECTED_UNSUBSCRIPTION),
            err(PROTECTED_OVERRIDE),
            err(PROTECTED_OVERRIDE),
            err(PROTECTED_PENDING),
            ok(),
            err(NO_RECORD),
        ],
    );

    ErrorMatrix { cells }
});

/// The process-wide legality matrix.
pub fn error_matrix() -> &'static ErrorMatrix {
    &MATRIX
}

/// States protected from any automatic removal.
///
/// Derived from the matrix (the states whose `CleanupSubscription` cell is
/// populated) rather than hand-maintained, so it cannot drift from the
/// legality table.
pub fn cleanup_protected_states() -> BTreeSet<SubscriptionState> {
    SubscriptionState::ALL
        .into_iter()
        .filter(|state| {
            error_matrix()
                .check(SubscriptionAction::CleanupSubscription, Some(*state))
                .is_some()
        })
        .collect()
}
