//! Subman: a pure mailing-list subscription state machine
//!
//! Subman governs how a persona's relationship to a mailing list evolves:
//! subscribed, unsubscribed, pending request, moderator overrides and
//! implicit (group-derived) membership, under a fixed vocabulary of
//! actions with an explicit legality matrix. The companion cleanup
//! algorithm reconducts automatically-implied subscriptions against
//! manual ones.
//!
//! The crate is a pure core: every function is deterministic and
//! side-effect free given its arguments, so it is trivially safe to call
//! concurrently. Persistence, privilege enforcement and mail transport
//! are the caller's imperative shell; the caller reads the current
//! record, calls in, and persists the returned state and log code as one
//! atomic unit.
//!
//! # Core Concepts
//!
//! - **States**: [`SubscriptionState`] values with stable integer codes;
//!   "no record" is the seventh logical state, modelled as `None`
//! - **Policies**: what a list permits, consumed read-only
//! - **Actions**: the verbs of the machine, each with a fixed target
//!   state and log code
//! - **Error matrix**: the single source of truth for legality, one cell
//!   per (action, state) pair
//!
//! # Example
//!
//! ```rust
//! use subman::{
//!     apply_action, SubscriptionAction, SubscriptionLogCode, SubscriptionPolicy,
//!     SubscriptionState,
//! };
//!
//! // A persona with no record subscribes to a subscribable list.
//! let outcome = apply_action(
//!     SubscriptionAction::Subscribe,
//!     Some(SubscriptionPolicy::Subscribable),
//!     true,
//!     None,
//!     false,
//! );
//! assert_eq!(
//!     outcome,
//!     Ok((
//!         Some(SubscriptionState::Subscribed),
//!         SubscriptionLogCode::Subscribed,
//!     ))
//! );
//!
//! // Subscribing again is a benign no-op, reported as an info-kind error.
//! let outcome = apply_action(
//!     SubscriptionAction::Subscribe,
//!     Some(SubscriptionPolicy::Subscribable),
//!     true,
//!     Some(SubscriptionState::Subscribed),
//!     false,
//! );
//! assert!(outcome.unwrap_err().is_info());
//! ```

pub mod engine;
pub mod error;
pub mod journal;
pub mod model;
pub mod sweep;

// Re-export commonly used types
pub use engine::{apply_action, do_cleanup, is_obsolete};
pub use error::{ErrorKind, SubscriptionError};
pub use model::{
    cleanup_protected_states, error_matrix, SubscriptionAction, SubscriptionLogCode,
    SubscriptionPolicy, SubscriptionState,
};
