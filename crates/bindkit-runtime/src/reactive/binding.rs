#![forbid(unsafe_code)]

//! Bindings between view state and observable storage.
//!
//! - [`Binding<V>`]: a read-only projection (one-way binding).
//! - [`TwoWayBinding<V>`]: a read/write handle onto one field or value, the
//!   shape a text field or picker needs.
//! - [`BindingScope`]: the subscriptions owned by one mounted view subtree.
//!
//! Bindings are plain closures over shared handles. Reading never notifies;
//! writing goes through the owner's `set`, so every write notifies the
//! owner's subscribers.

use std::fmt;
use std::rc::Rc;

use crate::reactive::observable::Observable;
use crate::reactive::record::{ObservableRecord, Record};
use crate::reactive::subscription::Subscription;

/// Read-only projection of some observable state.
pub struct Binding<V> {
    read: Rc<dyn Fn() -> V>,
}

impl<V> Clone for Binding<V> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
        }
    }
}

impl<V> fmt::Debug for Binding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}

impl<V: 'static> Binding<V> {
    pub fn new(read: impl Fn() -> V + 'static) -> Self {
        Self {
            read: Rc::new(read),
        }
    }

    /// A binding that always yields `value`.
    pub fn constant(value: V) -> Self
    where
        V: Clone,
    {
        Self::new(move || value.clone())
    }

    #[must_use]
    pub fn get(&self) -> V {
        (self.read)()
    }

    /// Derive a projection of this binding.
    pub fn map<U: 'static>(&self, f: impl Fn(V) -> U + 'static) -> Binding<U> {
        let read = Rc::clone(&self.read);
        Binding::new(move || f(read()))
    }
}

/// Read/write binding onto some observable state.
pub struct TwoWayBinding<V> {
    read: Rc<dyn Fn() -> V>,
    write: Rc<dyn Fn(V)>,
}

impl<V> Clone for TwoWayBinding<V> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
            write: Rc::clone(&self.write),
        }
    }
}

impl<V> fmt::Debug for TwoWayBinding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoWayBinding").finish_non_exhaustive()
    }
}

impl<V: 'static> TwoWayBinding<V> {
    pub fn new(read: impl Fn() -> V + 'static, write: impl Fn(V) + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: V) -> Self
    where
        V: Clone,
    {
        Self::new(move || value.clone(), |_| {})
    }

    #[must_use]
    pub fn get(&self) -> V {
        (self.read)()
    }

    pub fn set(&self, value: V) {
        (self.write)(value);
    }

    /// Drop the write half.
    #[must_use]
    pub fn read_only(&self) -> Binding<V> {
        Binding {
            read: Rc::clone(&self.read),
        }
    }
}

/// Subscriptions owned by one mounted view subtree.
///
/// Mounting a subtree pushes its subscriptions here; unmounting (or dropping
/// the scope) unsubscribes all of them at once.
#[derive(Debug, Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing subscription.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Subscribe to `record` for the lifetime of this scope.
    pub fn observe<R: Record>(
        &mut self,
        record: &ObservableRecord<R>,
        observer: impl Fn() + 'static,
    ) {
        self.hold(record.subscribe(observer));
    }

    /// Subscribe to `value` for the lifetime of this scope.
    pub fn observe_value<T: Clone + 'static>(
        &mut self,
        value: &Observable<T>,
        observer: impl Fn(&T) + 'static,
    ) {
        self.hold(value.subscribe(observer));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Unsubscribe everything held so far. The scope can be reused.
    pub fn unmount(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}
