#![forbid(unsafe_code)]

//! Subscription handles.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{BindingError, contract_violation};
use crate::reactive::notifier::{Callback, Notifier};

/// Handle for one observer attached to a record or value.
///
/// The observer stays attached until [`unsubscribe`](Self::unsubscribe) is
/// called or the handle is dropped, whichever comes first. Unsubscribing is
/// idempotent. The handle does not keep the observed record alive.
pub struct Subscription {
    id: u64,
    live: Rc<Cell<bool>>,
    notifier: Weak<Notifier>,
    callback: Callback,
}

impl Subscription {
    pub(crate) fn new(
        id: u64,
        live: Rc<Cell<bool>>,
        notifier: Weak<Notifier>,
        callback: Callback,
    ) -> Self {
        Self {
            id,
            live,
            notifier,
            callback,
        }
    }

    /// Identifier, unique per record or value.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the observer still receives notifications.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.live.get()
    }

    /// Detach the observer. Later mutations will not reach it, including
    /// the remainder of a notification pass that is currently running.
    pub fn unsubscribe(&self) {
        if !self.live.replace(false) {
            return;
        }
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.remove(self.id);
        }
    }

    /// Invoke the observer once, outside any mutation.
    ///
    /// # Panics
    ///
    /// Panics if the subscription was already unsubscribed.
    pub fn refresh(&self) {
        if let Err(err) = self.try_refresh() {
            contract_violation(err);
        }
    }

    /// Like [`refresh`](Self::refresh), returning the misuse as an error.
    pub fn try_refresh(&self) -> Result<(), BindingError> {
        if !self.live.get() {
            return Err(BindingError::StaleSubscription { id: self.id });
        }
        (self.callback)();
        Ok(())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.live.get())
            .finish_non_exhaustive()
    }
}
