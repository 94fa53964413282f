#![forbid(unsafe_code)]

//! Observable records: a fixed set of named fields behind one notifier.
//!
//! # Design
//!
//! A record type implements [`Record`] to declare its name and field set, and
//! exposes one typed [`Field`] lens per field. [`ObservableRecord<R>`] wraps
//! the value in shared storage (`Rc`), so every clone of the handle reads and
//! writes the same record and shares its subscribers.
//!
//! Observers are zero-argument callbacks. A notification carries no payload;
//! observers re-read whatever fields they render through [`ObservableRecord::get`]
//! (typically via a [`WeakRecord`] captured in the callback).
//!
//! # Invariants
//!
//! 1. Every `set`/`update` notifies, even when the new value equals the old.
//! 2. `version` increments by exactly 1 per `set`/`update`.
//! 3. Observers run in subscription order, synchronously, before `set`
//!    returns.
//! 4. A `set` issued from inside an observer is applied at once and queues
//!    one extra notification pass (see [`notifier`](super::notifier)).
//!
//! # Performance
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(1) + clone of the field  |
//! | `set()`       | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//! | `unsubscribe()` | O(S)                     |

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::config::ReactiveConfig;
use crate::error::{BindingError, contract_violation};
use crate::reactive::binding::{Binding, TwoWayBinding};
use crate::reactive::notifier::Notifier;
use crate::reactive::subscription::Subscription;

/// A record type with a statically known set of named fields.
pub trait Record: 'static {
    /// Human-readable type name used in logs and errors.
    const TYPE_NAME: &'static str;

    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Display form of the named field, or `None` if the name is not declared.
    fn describe_field(&self, name: &str) -> Option<String>;
}

/// Typed accessor for one field of a record.
pub struct Field<R, V> {
    name: &'static str,
    read: fn(&R) -> &V,
    write: fn(&mut R) -> &mut V,
}

impl<R, V> Field<R, V> {
    /// Build a lens from the field name and its accessors.
    pub const fn new(name: &'static str, read: fn(&R) -> &V, write: fn(&mut R) -> &mut V) -> Self {
        Self { name, read, write }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn read<'a>(&self, record: &'a R) -> &'a V {
        (self.read)(record)
    }

    pub fn write<'a>(&self, record: &'a mut R) -> &'a mut V {
        (self.write)(record)
    }
}

impl<R, V> Clone for Field<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for Field<R, V> {}

impl<R, V> fmt::Debug for Field<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

struct RecordInner<R> {
    value: RefCell<R>,
    version: Cell<u64>,
    notifier: Rc<Notifier>,
}

/// Shared, observable record.
///
/// Cloning the handle shares the same value and subscribers.
pub struct ObservableRecord<R> {
    inner: Rc<RecordInner<R>>,
}

/// Non-owning handle to an [`ObservableRecord`].
pub struct WeakRecord<R> {
    inner: Weak<RecordInner<R>>,
}

impl<R> Clone for ObservableRecord<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R> Clone for WeakRecord<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<R> WeakRecord<R> {
    /// Upgrade to a strong handle if the record is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<ObservableRecord<R>> {
        self.inner.upgrade().map(|inner| ObservableRecord { inner })
    }
}

impl<R: fmt::Debug> fmt::Debug for ObservableRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ObservableRecord");
        match self.inner.value.try_borrow() {
            Ok(value) => s.field("value", &*value),
            Err(_) => s.field("value", &"<borrowed>"),
        };
        s.field("version", &self.inner.version.get())
            .field("subscriber_count", &self.inner.notifier.len())
            .finish()
    }
}

impl<R: Record> ObservableRecord<R> {
    /// Create a record with the process-wide [`ReactiveConfig`].
    #[must_use]
    pub fn new(value: R) -> Self {
        Self::with_config(value, ReactiveConfig::global())
    }

    /// Create a record with an explicit config.
    #[must_use]
    pub fn with_config(value: R, config: ReactiveConfig) -> Self {
        Self {
            inner: Rc::new(RecordInner {
                value: RefCell::new(value),
                version: Cell::new(0),
                notifier: Notifier::new(R::TYPE_NAME, config),
            }),
        }
    }

    /// Clone of the current value of `field`.
    #[must_use]
    pub fn get<V: Clone>(&self, field: &Field<R, V>) -> V {
        self.check_field(field.name());
        field.read(&self.borrow()).clone()
    }

    /// Read the whole record by reference.
    ///
    /// Mutating the record from inside `f` is a contract violation.
    pub fn with<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.borrow())
    }

    /// Replace the value of `field` and notify every subscriber.
    pub fn set<V>(&self, field: &Field<R, V>, value: V) {
        self.check_field(field.name());
        {
            let mut record = self.borrow_mut();
            *field.write(&mut record) = value;
        }
        self.commit(field.name());
    }

    /// Mutate `field` in place and notify every subscriber.
    pub fn update<V>(&self, field: &Field<R, V>, f: impl FnOnce(&mut V)) {
        self.check_field(field.name());
        {
            let mut record = self.borrow_mut();
            f(field.write(&mut record));
        }
        self.commit(field.name());
    }

    /// Attach an observer. It runs once immediately, then after every
    /// mutation until the returned handle is unsubscribed or dropped.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> Subscription {
        self.inner.notifier.subscribe(Rc::new(observer))
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.notifier.len()
    }

    /// Whether a notification pass is currently running.
    #[must_use]
    pub fn is_notifying(&self) -> bool {
        self.inner.notifier.is_notifying()
    }

    #[must_use]
    pub fn config(&self) -> ReactiveConfig {
        self.inner.notifier.config()
    }

    #[must_use]
    pub fn field_names(&self) -> &'static [&'static str] {
        R::FIELDS
    }

    /// Display form of the field called `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not one of the record's declared fields.
    #[must_use]
    pub fn describe(&self, name: &str) -> String {
        match self.try_describe(name) {
            Ok(text) => text,
            Err(err) => contract_violation(err),
        }
    }

    pub fn try_describe(&self, name: &str) -> Result<String, BindingError> {
        self.borrow()
            .describe_field(name)
            .ok_or_else(|| BindingError::UnknownField {
                record: R::TYPE_NAME,
                field: name.to_string(),
            })
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakRecord<R> {
        WeakRecord {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles point at the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Read/write binding onto one field. Writes go through [`set`](Self::set).
    #[must_use]
    pub fn binding<V: Clone + 'static>(&self, field: Field<R, V>) -> TwoWayBinding<V> {
        let reader = self.clone();
        let writer = self.clone();
        TwoWayBinding::new(
            move || reader.get(&field),
            move |value| writer.set(&field, value),
        )
    }

    /// Read-only projection of one field.
    #[must_use]
    pub fn projection<V: Clone + 'static>(&self, field: Field<R, V>) -> Binding<V> {
        let reader = self.clone();
        Binding::new(move || reader.get(&field))
    }

    fn commit(&self, field: &'static str) {
        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);
        trace!(
            record = R::TYPE_NAME,
            field,
            version,
            re_entrant = self.inner.notifier.is_notifying(),
            "field set"
        );
        self.inner.notifier.notify();
    }

    fn check_field(&self, name: &'static str) {
        if !R::FIELDS.contains(&name) {
            contract_violation(BindingError::UnknownField {
                record: R::TYPE_NAME,
                field: name.to_string(),
            });
        }
    }

    fn borrow(&self) -> Ref<'_, R> {
        match self.inner.value.try_borrow() {
            Ok(value) => value,
            Err(_) => contract_violation(BindingError::BorrowConflict {
                record: R::TYPE_NAME,
            }),
        }
    }

    fn borrow_mut(&self) -> RefMut<'_, R> {
        match self.inner.value.try_borrow_mut() {
            Ok(value) => value,
            Err(_) => contract_violation(BindingError::BorrowConflict {
                record: R::TYPE_NAME,
            }),
        }
    }
}
