use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&Rc<T>)>;

struct Inner<T> {
    value: Rc<T>,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

/// A value that can be read at any time and observed for replacement.
///
/// Cloning yields another handle to the same value. Listeners run
/// synchronously inside [`Behavior::set`], in subscription order, and see the
/// new snapshot; no internal borrow is held while they run.
pub struct Behavior<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Behavior<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Behavior<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: Rc::new(value),
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.inner.borrow().value)
    }

    /// Replace the value and notify every listener.
    pub fn set(&self, value: T) {
        let value = Rc::new(value);
        let listeners: Vec<Listener<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = Rc::clone(&value);
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };
        for listener in listeners {
            listener(&value);
        }
    }

    /// Observe the current value immediately and every later value.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let subscription = self.register(Rc::new(move |value: &Rc<T>| listener(&**value)));
        deliver_current(self, &subscription);
        subscription
    }

    /// Observe later values only; the current one is skipped.
    pub fn subscribe_changes(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.register(Rc::new(move |value: &Rc<T>| listener(&**value)))
    }

    /// Observe values, skipping any for which `same(previous, next)` holds.
    /// The current value is always delivered first.
    pub fn subscribe_distinct(
        &self,
        same: impl Fn(&T, &T) -> bool + 'static,
        listener: impl Fn(&T) + 'static,
    ) -> Subscription {
        let previous: RefCell<Option<Rc<T>>> = RefCell::new(None);
        let subscription = self.register(Rc::new(move |value: &Rc<T>| {
            let changed = previous
                .borrow()
                .as_ref()
                .map_or(true, |prev| !same(&**prev, &**value));
            if changed {
                previous.replace(Some(Rc::clone(value)));
                listener(&**value);
            }
        }));
        deliver_current(self, &subscription);
        subscription
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn register(&self, listener: Listener<T>) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            remove: Rc::new(move |id| {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .borrow_mut()
                        .listeners
                        .retain(|(existing, _)| *existing != id);
                }
            }),
            active: Rc::new(Cell::new(true)),
        }
    }
}

/// Deliver the current value to a freshly registered listener only.
fn deliver_current<T: 'static>(behavior: &Behavior<T>, subscription: &Subscription) {
    let (value, listener) = {
        let inner = behavior.inner.borrow();
        let listener = inner
            .listeners
            .iter()
            .find(|(id, _)| *id == subscription.id)
            .map(|(_, listener)| Rc::clone(listener));
        (Rc::clone(&inner.value), listener)
    };
    if let Some(listener) = listener {
        listener(&value);
    }
}

/// Handle to a registered listener. Dropping it does not unsubscribe.
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    remove: Rc<dyn Fn(u64)>,
    active: Rc<Cell<bool>>,
}

impl Subscription {
    /// Stop receiving values. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        if self.active.replace(false) {
            (self.remove)(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, impl Fn(&i32) + Clone + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &i32| sink.borrow_mut().push(*v))
    }

    #[test]
    fn test_subscribe_delivers_current_then_changes() {
        let b = Behavior::new(1);
        let (seen, listener) = recorder();
        let _sub = b.subscribe(listener);
        b.set(2);
        b.set(3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(*b.get(), 3);
    }

    #[test]
    fn test_subscribe_changes_skips_current() {
        let b = Behavior::new(1);
        let (seen, listener) = recorder();
        let _sub = b.subscribe_changes(listener);
        b.set(5);
        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_listeners_fire_in_subscription_order() {
        let b = Behavior::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            let _ = b.subscribe_changes(move |_| order.borrow_mut().push(tag));
        }
        b.set(1);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_distinct_skips_equal_values() {
        let b = Behavior::new(1);
        let (seen, listener) = recorder();
        let _sub = b.subscribe_distinct(|a, b| a == b, listener);
        b.set(1);
        b.set(2);
        b.set(2);
        b.set(1);
        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let b = Behavior::new(0);
        let (seen, listener) = recorder();
        let sub = b.subscribe(listener);
        assert_eq!(b.listener_count(), 1);
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(b.listener_count(), 0);
        b.set(9);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_listener_may_read_and_set_reentrantly() {
        let b = Behavior::new(0);
        let handle = b.clone();
        let _sub = b.subscribe_changes(move |v| {
            if *v < 3 {
                handle.set(*handle.get() + 1);
            }
        });
        b.set(1);
        assert_eq!(*b.get(), 3);
    }
}
