//! Behavior subscriptions and ReactiveModel disposal through the public API.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use plateview::reactive::{Behavior, Lifecycle, Mounted, ReactiveModel};

type Log = Rc<RefCell<Vec<String>>>;

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_listeners_run_in_subscription_order_with_new_value() {
    let value = Behavior::new(0);
    let seen = log();
    for name in ["first", "second", "third"] {
        let seen = Rc::clone(&seen);
        value.subscribe_changes(move |v| seen.borrow_mut().push(format!("{name}:{v}")));
    }

    value.set(7);
    assert_eq!(*seen.borrow(), vec!["first:7", "second:7", "third:7"]);
}

#[test]
fn test_every_listener_sees_the_same_snapshot() {
    let value = Behavior::new(String::from("a"));
    let reader = value.clone();
    let seen = log();
    {
        let seen = Rc::clone(&seen);
        value.subscribe_changes(move |v| {
            // The stored value is already replaced when listeners run.
            assert_eq!(*reader.get(), *v);
            seen.borrow_mut().push(v.clone());
        });
    }
    value.set("b".into());
    value.set("c".into());
    assert_eq!(*seen.borrow(), vec!["b", "c"]);
}

#[test]
fn test_listener_may_set_reentrantly() {
    let value = Behavior::new(1);
    let setter = value.clone();
    value.subscribe_changes(move |v| {
        if *v < 3 {
            setter.set(v + 1);
        }
    });
    value.set(2);
    assert_eq!(*value.get(), 3);
}

#[test]
fn test_unsubscribe_inside_dispose_list() {
    let value = Behavior::new(0);
    let seen = log();
    let mut model = ReactiveModel::new();
    {
        let seen = Rc::clone(&seen);
        model.subscribe(&value, move |v| seen.borrow_mut().push(v.to_string()));
    }
    value.set(1);
    model.dispose();
    value.set(2);

    assert_eq!(*seen.borrow(), vec!["0", "1"]);
    assert_eq!(value.listener_count(), 0);
}

#[test]
fn test_distinct_subscription_skips_equal_projection() {
    let value = Behavior::new((1, "x"));
    let seen = log();
    let mut model = ReactiveModel::new();
    {
        let seen = Rc::clone(&seen);
        model.subscribe_distinct(
            &value,
            |a, b| a.0 == b.0,
            move |v| seen.borrow_mut().push(v.1.to_string()),
        );
    }
    value.set((1, "y"));
    value.set((2, "z"));
    value.set((2, "w"));
    assert_eq!(*seen.borrow(), vec!["x", "z"]);
}

struct Counter {
    reactive: ReactiveModel,
    source: Behavior<u32>,
    seen: Rc<RefCell<Vec<u32>>>,
}

impl Lifecycle for Counter {
    type Target = ();

    fn reactive(&mut self) -> &mut ReactiveModel {
        &mut self.reactive
    }

    fn mount(&mut self, (): ()) {
        let seen = Rc::clone(&self.seen);
        let subscription = self
            .source
            .subscribe_changes(move |v| seen.borrow_mut().push(*v));
        self.reactive
            .custom_dispose(move || subscription.unsubscribe());
    }
}

#[test]
fn test_mounted_model_stops_observing_after_drop() {
    let source = Behavior::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let counter = Counter {
            reactive: ReactiveModel::new(),
            source: source.clone(),
            seen: Rc::clone(&seen),
        };
        let _mounted = Mounted::new(counter, ());
        source.set(1);
        source.set(2);
    }
    source.set(3);
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(source.listener_count(), 0);
}
