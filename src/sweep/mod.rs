//! The reconciliation sweep over a consistent snapshot of one list.
//!
//! A sweep reconducts implicit (group-derived) subscriptions against the
//! written records: obsolete records are deleted, implied personas without
//! a surviving record gain an `Implicit` one. The decision runs entirely
//! against a [`ListSnapshot`] taken as one consistent read, so deletions
//! and insertions within a sweep can never race each other's view of the
//! current set. Persona identities are opaque to this crate; any ordered
//! key type works.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::engine::is_obsolete;
use crate::model::{SubscriptionPolicy, SubscriptionState};

pub mod error;

pub use error::SweepError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Consistent view of one list at one point in time.
///
/// Holds the written subscription records, the set of personas currently
/// implied by external group membership, and the policy that was in force
/// when the snapshot was taken. All three must come from the same
/// consistent read.
///
/// # Example
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
/// use subman::sweep::ListSnapshot;
/// use subman::{SubscriptionPolicy, SubscriptionState};
///
/// let states = BTreeMap::from([(1u64, SubscriptionState::Implicit)]);
/// let implied = BTreeSet::from([2u64]);
/// let snapshot = ListSnapshot::new(Some(SubscriptionPolicy::ImplicitsOnly), states, implied);
///
/// let plan = snapshot.plan();
/// // Persona 1 is no longer implied: its record goes.
/// assert!(plan.deletions.contains(&1));
/// // Persona 2 is implied but has no record: it gets one.
/// assert!(plan.insertions.contains(&2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot<P: Ord> {
    /// Snapshot format version
    version: u32,
    /// When the snapshot was taken
    taken_at: DateTime<Utc>,
    /// The policy in force for the swept personas
    policy: Option<SubscriptionPolicy>,
    /// All currently-written records
    states: BTreeMap<P, SubscriptionState>,
    /// All personas currently implied by group membership
    implied: BTreeSet<P>,
}

/// Outcome of planning a sweep: which records to delete and which
/// personas to write an `Implicit` record for. The two sets are disjoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupPlan<P: Ord> {
    /// Personas whose written record is obsolete and should be deleted.
    pub deletions: BTreeSet<P>,
    /// Implied personas without a surviving record; write `Implicit`.
    pub insertions: BTreeSet<P>,
}

impl<P: Ord> CleanupPlan<P> {
    /// Whether the sweep has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.insertions.is_empty()
    }
}

impl<P: Ord> ListSnapshot<P> {
    /// Create a snapshot from one consistent read of a list.
    pub fn new(
        policy: Option<SubscriptionPolicy>,
        states: BTreeMap<P, SubscriptionState>,
        implied: BTreeSet<P>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            taken_at: Utc::now(),
            policy,
            states,
            implied,
        }
    }

    /// The policy in force when the snapshot was taken.
    pub fn policy(&self) -> Option<SubscriptionPolicy> {
        self.policy
    }

    /// When the snapshot was taken.
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// The written records captured by the snapshot.
    pub fn states(&self) -> &BTreeMap<P, SubscriptionState> {
        &self.states
    }

    /// The implied personas captured by the snapshot.
    pub fn implied(&self) -> &BTreeSet<P> {
        &self.implied
    }

    fn check_version(&self) -> Result<(), SweepError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SweepError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

impl<P: Ord + Clone> ListSnapshot<P> {
    /// Compute the two-pass reconciliation plan.
    ///
    /// Pass one marks every written record found obsolete by
    /// [`is_obsolete`], with `is_implied` resolved against the snapshot's
    /// implied set. Pass two grants an `Implicit` record to every implied
    /// persona without a surviving one. Without a policy nothing is
    /// inserted: a persona with no means of access gets no record.
    pub fn plan(&self) -> CleanupPlan<P> {
        let deletions: BTreeSet<P> = self
            .states
            .iter()
            .filter(|(persona, state)| {
                is_obsolete(self.policy, Some(**state), self.implied.contains(*persona))
            })
            .map(|(persona, _)| persona.clone())
            .collect();

        let insertions: BTreeSet<P> = if self.policy.is_some() {
            self.implied
                .iter()
                .filter(|persona| {
                    !self.states.contains_key(*persona) || deletions.contains(*persona)
                })
                .cloned()
                .collect()
        } else {
            BTreeSet::new()
        };

        CleanupPlan {
            deletions,
            insertions,
        }
    }
}

impl<P: Ord + Serialize> ListSnapshot<P> {
    /// Encode the snapshot as JSON for handoff between the read and write
    /// phases of a sweep.
    pub fn to_json(&self) -> Result<String, SweepError> {
        serde_json::to_string(self).map_err(|e| SweepError::SerializationFailed(e.to_string()))
    }

    /// Encode the snapshot in a compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SweepError> {
        bincode::serialize(self).map_err(|e| SweepError::SerializationFailed(e.to_string()))
    }
}

impl<P: Ord + DeserializeOwned> ListSnapshot<P> {
    /// Decode a snapshot from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SweepError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SweepError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Decode a snapshot from its binary format, rejecting unsupported
    /// versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SweepError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SweepError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        policy: Option<SubscriptionPolicy>,
        states: &[(u64, SubscriptionState)],
        implied: &[u64],
    ) -> ListSnapshot<u64> {
        ListSnapshot::new(
            policy,
            states.iter().copied().collect(),
            implied.iter().copied().collect(),
        )
    }

    #[test]
    fn stale_implicit_records_are_deleted_and_reconducted() {
        let snapshot = snapshot(
            Some(SubscriptionPolicy::ImplicitsOnly),
            &[
                (1, SubscriptionState::Implicit), // still implied, keep
                (2, SubscriptionState::Implicit), // no longer implied, delete
            ],
            &[1, 3],
        );

        let plan = snapshot.plan();
        assert_eq!(plan.deletions, BTreeSet::from([2]));
        assert_eq!(plan.insertions, BTreeSet::from([3]));
    }

    #[test]
    fn protected_records_survive_and_suppress_insertion() {
        // Persona 1 is implied but blocked by a moderator: the override
        // survives the sweep and no implicit record is written over it.
        let snapshot = snapshot(
            Some(SubscriptionPolicy::ImplicitsOnly),
            &[(1, SubscriptionState::UnsubscriptionOverride)],
            &[1],
        );

        let plan = snapshot.plan();
        assert!(plan.is_empty());
    }

    #[test]
    fn no_policy_deletes_without_reconducting() {
        let snapshot = snapshot(
            None,
            &[
                (1, SubscriptionState::Subscribed),
                (2, SubscriptionState::Unsubscribed),
            ],
            &[1],
        );

        let plan = snapshot.plan();
        // The manual subscription goes; the unsubscription is protected.
        assert_eq!(plan.deletions, BTreeSet::from([1]));
        // No means of access, so nothing is written back.
        assert!(plan.insertions.is_empty());
    }

    #[test]
    fn deletions_and_insertions_are_disjoint_sets_of_decisions() {
        let snapshot = snapshot(
            Some(SubscriptionPolicy::Subscribable),
            &[
                (1, SubscriptionState::Subscribed),
                (2, SubscriptionState::Implicit),
            ],
            &[2, 3],
        );

        let plan = snapshot.plan();
        // On an accessible non-implicit list nothing is obsolete.
        assert!(plan.deletions.is_empty());
        // Implied personas without records still gain one.
        assert_eq!(plan.insertions, BTreeSet::from([3]));
        assert!(plan.deletions.is_disjoint(&plan.insertions) || plan.is_empty());
    }

    #[test]
    fn planning_is_deterministic() {
        let snapshot = snapshot(
            Some(SubscriptionPolicy::ImplicitsOnly),
            &[(1, SubscriptionState::Implicit)],
            &[2],
        );

        assert_eq!(snapshot.plan(), snapshot.plan());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = snapshot(
            Some(SubscriptionPolicy::ImplicitsOnly),
            &[(1, SubscriptionState::Implicit)],
            &[1, 2],
        );

        let json = snapshot.to_json().unwrap();
        let decoded: ListSnapshot<u64> = ListSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn snapshot_round_trips_through_binary() {
        let snapshot = snapshot(
            Some(SubscriptionPolicy::Subscribable),
            &[(7, SubscriptionState::Subscribed)],
            &[],
        );

        let bytes = snapshot.to_bytes().unwrap();
        let decoded: ListSnapshot<u64> = ListSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn unsupported_versions_are_rejected() {
        let mut snapshot = snapshot(None, &[], &[]);
        snapshot.version = SNAPSHOT_VERSION + 1;

        let json = serde_json::to_string(&snapshot).unwrap();
        let result: Result<ListSnapshot<u64>, _> = ListSnapshot::from_json(&json);
        assert!(matches!(
            result,
            Err(SweepError::UnsupportedVersion { found, supported })
                if found == SNAPSHOT_VERSION + 1 && supported == SNAPSHOT_VERSION
        ));
    }
}
