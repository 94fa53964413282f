//! End-to-end scenarios for a shared record observed by several view subtrees.
//!
//! Each observer records the `name` it reads at notification time, standing
//! in for a view that re-renders from the record.

use std::cell::RefCell;
use std::rc::Rc;

use bindkit_runtime::{
    BindingScope, Field, Observable, ObservableRecord, ReactiveConfig, Record, Subscription,
};
use tracing::Level;

#[derive(Debug, Clone, Default)]
struct Mix {
    name: String,
    ingredients: Vec<String>,
}

impl Mix {
    const NAME: Field<Mix, String> = Field::new("name", |m| &m.name, |m| &mut m.name);
    const INGREDIENTS: Field<Mix, Vec<String>> =
        Field::new("ingredients", |m| &m.ingredients, |m| &mut m.ingredients);
}

impl Record for Mix {
    const TYPE_NAME: &'static str = "Mix";
    const FIELDS: &'static [&'static str] = &["name", "ingredients"];

    fn describe_field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "ingredients" => Some(self.ingredients.join(", ")),
            _ => None,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .try_init();
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Observer that logs every name it sees.
fn name_logger(record: &ObservableRecord<Mix>) -> (Rc<RefCell<Vec<String>>>, Subscription) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_clone = Rc::clone(&log);
    let weak = record.downgrade();
    let sub = record.subscribe(move || {
        if let Some(record) = weak.upgrade() {
            log_clone.borrow_mut().push(record.get(&Mix::NAME));
        }
    });
    (log, sub)
}

#[test]
fn load_mix_reaches_every_view() {
    init_tracing();
    let record = ObservableRecord::new(Mix::default());

    let (a, sub_a) = name_logger(&record);
    assert_eq!(*a.borrow(), strings(&[""]));

    record.set(&Mix::NAME, "Rum and coke".to_string());
    assert_eq!(a.borrow().len(), 2);
    assert_eq!(record.get(&Mix::NAME), "Rum and coke");

    let (b, _sub_b) = name_logger(&record);
    assert_eq!(*b.borrow(), strings(&["Rum and coke"]));

    record.set(&Mix::INGREDIENTS, strings(&["Rum", "Coke", "Ice"]));
    assert_eq!(a.borrow().len(), 3);
    assert_eq!(b.borrow().len(), 2);
    assert_eq!(record.get(&Mix::INGREDIENTS), strings(&["Rum", "Coke", "Ice"]));

    sub_a.unsubscribe();
    record.set(&Mix::NAME, "Cuba libre".to_string());
    assert_eq!(a.borrow().len(), 3);
    assert_eq!(b.borrow().len(), 3);
    assert_eq!(b.borrow().last().map(String::as_str), Some("Cuba libre"));

    sub_a.unsubscribe();
    assert_eq!(record.subscriber_count(), 1);
}

#[test]
fn navigation_push_and_pop() {
    init_tracing();
    // The root owns the record; a pushed detail view observes it while
    // mounted, and the root keeps observing after the detail view pops.
    let record = ObservableRecord::new(Mix::default());
    let (root_log, _root) = name_logger(&record);

    let mut detail = BindingScope::new();
    let detail_log = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&detail_log);
    let weak = record.downgrade();
    detail.observe(&record, move || {
        if let Some(record) = weak.upgrade() {
            log.borrow_mut().push(record.get(&Mix::INGREDIENTS).len());
        }
    });

    record.set(&Mix::INGREDIENTS, strings(&["Rum", "Coke", "Ice"]));
    assert_eq!(*detail_log.borrow(), vec![0, 3]);

    detail.unmount();
    record.set(&Mix::NAME, "Rum and coke".into());
    assert_eq!(*detail_log.borrow(), vec![0, 3]);
    assert_eq!(root_log.borrow().len(), 3);
}

#[test]
fn re_entrant_normalizer_settles_deterministically() {
    init_tracing();
    let record = ObservableRecord::new(Mix::default());

    // Trims surrounding whitespace by writing back into the same field.
    let weak = record.downgrade();
    let _normalizer = record.subscribe(move || {
        let Some(record) = weak.upgrade() else { return };
        let name = record.get(&Mix::NAME);
        let trimmed = name.trim();
        if trimmed.len() != name.len() {
            record.set(&Mix::NAME, trimmed.to_string());
        }
    });
    let (log, _view) = name_logger(&record);

    record.set(&Mix::NAME, "  Mojito  ".into());
    assert_eq!(record.get(&Mix::NAME), "Mojito");
    assert_eq!(record.version(), 2);
    // Pass 1 sees the normalized value already; the queued pass 2 follows.
    assert_eq!(*log.borrow(), strings(&["", "Mojito", "Mojito"]));
}

#[test]
#[should_panic(expected = "notification did not settle")]
fn ping_pong_observers_hit_the_pass_limit() {
    let config = ReactiveConfig::default().with_max_notify_passes(32);
    let record = ObservableRecord::with_config(Mix::default(), config);

    let weak = record.downgrade();
    let _ping = record.subscribe(move || {
        let Some(record) = weak.upgrade() else { return };
        match record.get(&Mix::NAME).as_str() {
            "ping" => record.set(&Mix::NAME, "pong".into()),
            "pong" => record.set(&Mix::NAME, "ping".into()),
            _ => {}
        }
    });

    record.set(&Mix::NAME, "ping".into());
}

#[test]
fn form_state_drives_text_field() {
    init_tracing();
    let locations = ["Portland", "Seattle", "Austin"];
    let location_index = Observable::new(0usize);
    let rendered = Rc::new(RefCell::new(Vec::new()));

    let rendered_clone = Rc::clone(&rendered);
    let _picker = location_index.subscribe(move |index| {
        rendered_clone.borrow_mut().push(locations[*index]);
    });

    let selection = location_index.binding();
    selection.set(2);
    selection.set(1);
    assert_eq!(*rendered.borrow(), vec!["Portland", "Austin", "Seattle"]);
}
