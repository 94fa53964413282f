#![forbid(unsafe_code)]

//! Ordered observer list with queued re-entrant notification.
//!
//! # Design
//!
//! The notifier owns an ordered `Vec` of entries, one per live subscription.
//! A notification pass snapshots the list and calls every entry whose live
//! flag is still set, in registration order. No borrow of the list is held
//! while a callback runs, so callbacks may subscribe, unsubscribe, or mutate
//! the owning record freely.
//!
//! # Re-entrancy
//!
//! A `notify()` issued while a pass is already running does not recurse. It
//! bumps a pending counter and returns; the outermost `notify()` drains the
//! counter by running one more full pass per queued request, in order. The
//! mutation that triggered the queued request has already been applied, so
//! every later observer in the current pass already reads the new value.
//!
//! The outermost call bounds the total number of passes by
//! [`ReactiveConfig::max_notify_passes`]. Exceeding the bound is a contract
//! violation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, debug_span, trace, warn};

use crate::config::{DEFAULT_MAX_NOTIFY_PASSES, ReactiveConfig};
use crate::error::{BindingError, contract_violation};
use crate::reactive::subscription::Subscription;

pub(crate) type Callback = Rc<dyn Fn()>;

struct Entry {
    id: u64,
    live: Rc<Cell<bool>>,
    callback: Callback,
}

pub(crate) struct Notifier {
    owner: &'static str,
    config: ReactiveConfig,
    entries: RefCell<Vec<Entry>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    pending: Cell<usize>,
}

/// Clears the in-pass state even if an observer panics mid-pass.
struct PassGuard<'a> {
    notifier: &'a Notifier,
}

impl<'a> PassGuard<'a> {
    fn enter(notifier: &'a Notifier) -> Self {
        notifier.notifying.set(true);
        Self { notifier }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.notifier.notifying.set(false);
        self.notifier.pending.set(0);
    }
}

impl Notifier {
    /// An invalid config falls back to the default pass limit.
    pub(crate) fn new(owner: &'static str, config: ReactiveConfig) -> Rc<Self> {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(owner, error = %err, "ignoring invalid reactive config value");
                config.with_max_notify_passes(DEFAULT_MAX_NOTIFY_PASSES)
            }
        };
        Rc::new(Self {
            owner,
            config,
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            notifying: Cell::new(false),
            pending: Cell::new(0),
        })
    }

    pub(crate) fn config(&self) -> ReactiveConfig {
        self.config
    }

    /// Register `callback`, then invoke it once so the observer starts from
    /// the current state.
    pub(crate) fn subscribe(self: &Rc<Self>, callback: Callback) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let live = Rc::new(Cell::new(true));
        self.entries.borrow_mut().push(Entry {
            id,
            live: Rc::clone(&live),
            callback: Rc::clone(&callback),
        });
        debug!(
            owner = self.owner,
            id,
            subscribers = self.len(),
            "subscribed"
        );

        let subscription = Subscription::new(id, live, Rc::downgrade(self), Rc::clone(&callback));
        callback();
        subscription
    }

    pub(crate) fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|entry| entry.id != id);
        debug!(
            owner = self.owner,
            id,
            subscribers = self.len(),
            "unsubscribed"
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn is_notifying(&self) -> bool {
        self.notifying.get()
    }

    pub(crate) fn notify(&self) {
        if self.notifying.get() {
            let pending = self.pending.get() + 1;
            self.pending.set(pending);
            trace!(owner = self.owner, pending, "queued re-entrant notification");
            return;
        }

        let _guard = PassGuard::enter(self);
        let limit = self.config.max_notify_passes;
        let mut passes = 0usize;
        loop {
            passes += 1;
            if passes > limit {
                contract_violation(BindingError::RunawayNotification { passes, limit });
            }
            self.run_pass(passes);

            let pending = self.pending.get();
            if pending == 0 {
                break;
            }
            self.pending.set(pending - 1);
        }
    }

    fn run_pass(&self, pass: usize) {
        let snapshot: Vec<(Rc<Cell<bool>>, Callback)> = self
            .entries
            .borrow()
            .iter()
            .map(|entry| (Rc::clone(&entry.live), Rc::clone(&entry.callback)))
            .collect();

        let _span = debug_span!(
            "notify_pass",
            owner = self.owner,
            pass,
            subscribers = snapshot.len()
        )
        .entered();

        for (live, callback) in &snapshot {
            // Unsubscribed earlier in this same pass.
            if live.get() {
                callback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, Callback) {
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let cb: Callback = Rc::new(move || count_clone.set(count_clone.get() + 1));
        (count, cb)
    }

    #[test]
    fn subscribe_fires_immediately() {
        let notifier = Notifier::new("test", ReactiveConfig::default());
        let (count, cb) = counter();
        let _sub = notifier.subscribe(cb);
        assert_eq!(count.get(), 1);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn notify_reaches_every_entry() {
        let notifier = Notifier::new("test", ReactiveConfig::default());
        let (a, cb_a) = counter();
        let (b, cb_b) = counter();
        let _sa = notifier.subscribe(cb_a);
        let _sb = notifier.subscribe(cb_b);

        notifier.notify();
        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 2);
        assert!(!notifier.is_notifying());
    }

    #[test]
    fn removal_is_eager() {
        let notifier = Notifier::new("test", ReactiveConfig::default());
        let (_count, cb) = counter();
        let sub = notifier.subscribe(cb);
        sub.unsubscribe();
        assert_eq!(notifier.len(), 0);
    }

    #[test]
    fn zero_pass_limit_falls_back_to_default() {
        let notifier = Notifier::new("test", ReactiveConfig::default().with_max_notify_passes(0));
        assert_eq!(notifier.config().max_notify_passes, DEFAULT_MAX_NOTIFY_PASSES);

        let (count, cb) = counter();
        let _sub = notifier.subscribe(cb);
        notifier.notify();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let notifier = Notifier::new("test", ReactiveConfig::default());
        let s1 = notifier.subscribe(Rc::new(|| {}));
        let s2 = notifier.subscribe(Rc::new(|| {}));
        assert!(s2.id() > s1.id());
    }

    #[test]
    fn re_entrant_notify_is_queued_not_nested() {
        let notifier = Notifier::new("test", ReactiveConfig::default());
        let depth = Rc::new(Cell::new(0u32));
        let max_depth = Rc::new(Cell::new(0u32));
        let calls = Rc::new(Cell::new(0u32));

        let weak = Rc::downgrade(&notifier);
        let (d, m, c) = (Rc::clone(&depth), Rc::clone(&max_depth), Rc::clone(&calls));
        let _sub = notifier.subscribe(Rc::new(move || {
            d.set(d.get() + 1);
            m.set(m.get().max(d.get()));
            c.set(c.get() + 1);
            // Second call (the first notify-driven one) re-notifies once.
            if c.get() == 2 {
                if let Some(n) = weak.upgrade() {
                    n.notify();
                }
            }
            d.set(d.get() - 1);
        }));

        notifier.notify();
        // initial + pass 1 + queued pass 2
        assert_eq!(calls.get(), 3);
        assert_eq!(max_depth.get(), 1);
    }

    #[test]
    #[should_panic(expected = "notification did not settle")]
    fn runaway_loop_panics() {
        let notifier = Notifier::new("test", ReactiveConfig::default().with_max_notify_passes(4));
        let weak = Rc::downgrade(&notifier);
        let armed = Rc::new(Cell::new(false));
        let armed_clone = Rc::clone(&armed);
        let _sub = notifier.subscribe(Rc::new(move || {
            if armed_clone.get() {
                if let Some(n) = weak.upgrade() {
                    n.notify();
                }
            }
        }));
        armed.set(true);
        notifier.notify();
    }

    #[test]
    fn state_resets_after_observer_panic() {
        let notifier = Notifier::new("test", ReactiveConfig::default());
        let armed = Rc::new(Cell::new(false));
        let armed_clone = Rc::clone(&armed);
        let _sub = notifier.subscribe(Rc::new(move || {
            if armed_clone.get() {
                panic!("observer failed");
            }
        }));
        armed.set(true);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| notifier.notify()));
        assert!(result.is_err());
        assert!(!notifier.is_notifying());
        assert_eq!(notifier.pending.get(), 0);
    }
}
