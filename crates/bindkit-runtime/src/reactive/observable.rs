#![forbid(unsafe_code)]

//! Observable single-value cell for view-local state.
//!
//! # Design
//!
//! [`Observable<T>`] wraps one value in shared, reference-counted storage
//! (`Rc`). It uses the same notifier as [`ObservableRecord`](super::ObservableRecord),
//! so the policies match: every assignment notifies, observers run in
//! registration order, and re-entrant assignments are queued.
//!
//! Unlike record observers, value observers receive a reference to the value
//! current at the moment they are called.
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: allowed; queued as one extra notification pass.
//! - **Feedback loop**: observers that keep re-assigning each other panic once
//!   [`ReactiveConfig::max_notify_passes`] is exceeded.
//! - **Assign inside `with`**: a contract violation
//!   ([`BindingError::BorrowConflict`]).

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::config::ReactiveConfig;
use crate::error::{BindingError, contract_violation};
use crate::reactive::binding::{Binding, TwoWayBinding};
use crate::reactive::notifier::Notifier;
use crate::reactive::subscription::Subscription;

struct ObservableInner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    notifier: Rc<Notifier>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state.
pub struct Observable<T> {
    inner: Rc<ObservableInner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Observable");
        match self.inner.value.try_borrow() {
            Ok(value) => out.field("value", &*value),
            Err(_) => out.field("value", &format_args!("<borrowed>")),
        };
        out.field("version", &self.inner.version.get())
            .field("subscriber_count", &self.inner.notifier.len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a new observable with the process-wide config.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_config(value, ReactiveConfig::global())
    }

    #[must_use]
    pub fn with_config(value: T, config: ReactiveConfig) -> Self {
        Self {
            inner: Rc::new(ObservableInner {
                value: RefCell::new(value),
                version: Cell::new(0),
                notifier: Notifier::new(std::any::type_name::<T>(), config),
            }),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.borrow().clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        *self.borrow_mut() = value;
        self.commit();
    }

    /// Modify the value in place and notify every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.borrow_mut());
        self.commit();
    }

    /// Subscribe to assignments. The callback runs once immediately with the
    /// current value, then after every `set`/`update`.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let weak = Rc::downgrade(&self.inner);
        self.inner.notifier.subscribe(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                // No borrow may be held while the callback runs; it may assign.
                let value = match inner.value.try_borrow() {
                    Ok(value) => value.clone(),
                    Err(_) => contract_violation(BindingError::BorrowConflict {
                        record: std::any::type_name::<T>(),
                    }),
                };
                callback(&value);
            }
        }))
    }

    /// Number of assignments so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.notifier.len()
    }

    /// Read/write binding onto this value.
    #[must_use]
    pub fn binding(&self) -> TwoWayBinding<T> {
        let reader = self.clone();
        let writer = self.clone();
        TwoWayBinding::new(move || reader.get(), move |value| writer.set(value))
    }

    /// Read-only projection of this value.
    #[must_use]
    pub fn projection(&self) -> Binding<T> {
        let reader = self.clone();
        Binding::new(move || reader.get())
    }

    fn commit(&self) {
        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);
        trace!(
            value_type = std::any::type_name::<T>(),
            version,
            re_entrant = self.inner.notifier.is_notifying(),
            "value set"
        );
        self.inner.notifier.notify();
    }

    fn borrow(&self) -> Ref<'_, T> {
        match self.inner.value.try_borrow() {
            Ok(value) => value,
            Err(_) => contract_violation(BindingError::BorrowConflict {
                record: std::any::type_name::<T>(),
            }),
        }
    }

    fn borrow_mut(&self) -> RefMut<'_, T> {
        match self.inner.value.try_borrow_mut() {
            Ok(value) => value,
            Err(_) => contract_violation(BindingError::BorrowConflict {
                record: std::any::type_name::<T>(),
            }),
        }
    }
}

impl Observable<bool> {
    /// Flip a boolean flag, e.g. to present or dismiss a sheet.
    pub fn toggle(&self) {
        self.update(|flag| *flag = !*flag);
    }
}
