#![forbid(unsafe_code)]

//! Reactive data bindings.
//!
//! This module provides change-notification primitives for view layers:
//!
//! - [`ObservableRecord`]: a shared record with a fixed set of named fields,
//!   addressed through typed [`Field`] lenses.
//! - [`Observable`]: a shared single-value cell for view-local state.
//! - [`Subscription`]: handle that unsubscribes on request or on drop.
//! - [`Binding`] / [`TwoWayBinding`]: one-way and two-way bindings.
//! - [`BindingScope`]: subscriptions owned by one mounted view subtree.
//!
//! # Architecture
//!
//! Records and values use `Rc<..>` with interior mutability for
//! single-threaded shared ownership. Each owns a notifier holding an ordered
//! observer list; unsubscribing removes the entry eagerly.
//!
//! # Invariants
//!
//! 1. Every mutation notifies every live subscriber exactly once, before the
//!    mutating call returns. There is no equality short-circuit.
//! 2. Subscribers are notified in registration order.
//! 3. Subscribing invokes the observer once immediately.
//! 4. A mutation made from inside an observer is applied immediately and
//!    queues one more notification pass after the current one.
//! 5. An unsubscribed observer is never called again, even mid-pass.

pub mod binding;
pub(crate) mod notifier;
pub mod observable;
pub mod record;
pub mod subscription;

pub use binding::{Binding, BindingScope, TwoWayBinding};
pub use observable::Observable;
pub use record::{Field, ObservableRecord, Record, WeakRecord};
pub use subscription::Subscription;
