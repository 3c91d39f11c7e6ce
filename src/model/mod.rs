//! Vocabulary of the subscription state machine.
//!
//! This module defines the closed sets of states, policies, actions and
//! log codes, plus the legality matrix mapping every (action, state) pair
//! to either "legal" or a declared error. Everything here is pure data;
//! the transition logic lives in [`crate::engine`].

mod action;
mod log;
mod matrix;
mod policy;
mod state;

pub use action::SubscriptionAction;
pub use log::SubscriptionLogCode;
pub use matrix::{cleanup_protected_states, error_matrix, ErrorMatrix};
pub use policy::SubscriptionPolicy;
pub use state::SubscriptionState;
