#![forbid(unsafe_code)]

//! Runtime: observable state and bindings for single-threaded view layers.
//!
//! # Role in bindkit
//! `bindkit-runtime` owns the model side of a declarative UI. A record is
//! created once by whoever owns the application flow, handed down the view
//! tree by reference, and observed by every subtree that renders it. Views
//! subscribe on mount, unsubscribe on unmount, and push user edits back with
//! `set`.
//!
//! # Primary responsibilities
//! - **ObservableRecord**: named fields with synchronous, ordered notification.
//! - **Observable**: single-value cells for flags, indices and text input.
//! - **Bindings**: read-only and read/write handles onto either of the above.
//! - **ReactiveConfig**: runaway-notification limit, read from the environment.
//!
//! Everything here is `!Send`: a record and its observers live on one thread.

pub mod config;
pub mod error;
pub mod reactive;

pub use config::{ConfigError, ReactiveConfig};
pub use error::{BindingError, contract_violation};
pub use reactive::{
    Binding, BindingScope, Field, Observable, ObservableRecord, Record, Subscription,
    TwoWayBinding, WeakRecord,
};
