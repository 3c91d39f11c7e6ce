//! The transition engine.
//!
//! Pure resolution of actions against the legality matrix plus the
//! cleanup reconciliation helpers. Nothing here performs I/O or holds
//! state; callers read the current record, call in, and persist the
//! outcome as one atomic unit.

mod cleanup;
mod transition;

pub use cleanup::{do_cleanup, is_obsolete};
pub use transition::apply_action;
