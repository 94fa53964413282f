#![forbid(unsafe_code)]

//! Binding errors and contract violations.
//!
//! Field access and mutation are total over a record's declared fields, so
//! there is no recoverable error path in normal use. What remains is misuse:
//! naming a field the record never declared, touching a subscription after it
//! was torn down, or wiring observers into a feedback loop that never settles.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown field | Name outside the declared field set | Panic via [`contract_violation`] |
//! | Stale subscription | `refresh()` after `unsubscribe()` | Panic via [`contract_violation`] |
//! | Runaway notification | Observers re-set each other | Panic once the pass limit is hit |
//! | Borrow conflict | `set()` from inside a `with()` closure | Panic via [`contract_violation`] |
//!
//! The `try_*` accessors return these errors as values instead.

use std::fmt;

/// Misuse of an observable record, value, or subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A field name that is not part of the record's declared field set.
    UnknownField {
        record: &'static str,
        field: String,
    },
    /// A subscription handle used after it was unsubscribed.
    StaleSubscription { id: u64 },
    /// Re-entrant mutations queued more notification passes than allowed.
    RunawayNotification { passes: usize, limit: usize },
    /// The record was mutated while a `with()` borrow was still open.
    BorrowConflict { record: &'static str },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { record, field } => {
                write!(f, "record '{record}' has no field named '{field}'")
            }
            Self::StaleSubscription { id } => {
                write!(f, "subscription #{id} used after unsubscribe")
            }
            Self::RunawayNotification { passes, limit } => write!(
                f,
                "notification did not settle: {passes} passes exceeds limit of {limit}"
            ),
            Self::BorrowConflict { record } => {
                write!(f, "record '{record}' mutated while borrowed for reading")
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// Report a programming-contract violation and abort the current operation.
///
/// The error is logged at `error` level before panicking so that binding bugs
/// surface in traces even when the panic is caught higher up.
#[track_caller]
pub fn contract_violation(err: BindingError) -> ! {
    tracing::error!(error = %err, "binding contract violation");
    panic!("binding contract violation: {err}");
}
