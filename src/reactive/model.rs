use std::ops::{Deref, DerefMut};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use super::{Behavior, Subscription};
use crate::error::{PlateError, Result};

type DisposeAction = Box<dyn FnOnce()>;

/// Options for [`ReactiveModel::event`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: Option<bool>,
    pub once: bool,
}

/// Owner of every external attachment a model makes.
///
/// Each subscription, DOM listener or custom action registers its release
/// here; [`ReactiveModel::dispose`] runs them once, in registration order,
/// and empties the list.
#[derive(Default)]
pub struct ReactiveModel {
    dispose_actions: Vec<DisposeAction>,
}

impl ReactiveModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `source`; released on dispose.
    pub fn subscribe<T: 'static>(
        &mut self,
        source: &Behavior<T>,
        action: impl Fn(&T) + 'static,
    ) -> Subscription {
        let subscription = source.subscribe(action);
        self.own(&subscription);
        subscription
    }

    /// Subscribe to distinct values of `source`; released on dispose.
    pub fn subscribe_distinct<T: 'static>(
        &mut self,
        source: &Behavior<T>,
        same: impl Fn(&T, &T) -> bool + 'static,
        action: impl Fn(&T) + 'static,
    ) -> Subscription {
        let subscription = source.subscribe_distinct(same, action);
        self.own(&subscription);
        subscription
    }

    /// Attach a DOM listener. The closure lives until dispose removes it.
    pub fn event(
        &mut self,
        target: &EventTarget,
        event_type: &str,
        listener: impl FnMut(Event) + 'static,
        options: Option<ListenerOptions>,
    ) -> Result<()> {
        let closure = Closure::wrap(Box::new(listener) as Box<dyn FnMut(Event)>);
        let options = options.unwrap_or_default();

        let add = AddEventListenerOptions::new();
        add.set_capture(options.capture);
        add.set_once(options.once);
        if let Some(passive) = options.passive {
            add.set_passive(passive);
        }
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_type,
                closure.as_ref().unchecked_ref(),
                &add,
            )
            .map_err(|e| PlateError::dom(&e))?;

        let target = target.clone();
        let event_type = event_type.to_string();
        self.custom_dispose(move || {
            let _ = target.remove_event_listener_with_callback_and_bool(
                &event_type,
                closure.as_ref().unchecked_ref(),
                options.capture,
            );
            drop(closure);
        });
        Ok(())
    }

    /// Register an arbitrary teardown action.
    pub fn custom_dispose(&mut self, action: impl FnOnce() + 'static) {
        self.dispose_actions.push(Box::new(action));
    }

    /// Run every registered teardown once. Calling again is a no-op.
    pub fn dispose(&mut self) {
        let actions = std::mem::take(&mut self.dispose_actions);
        if !actions.is_empty() {
            log::debug!("disposing {} reactive attachments", actions.len());
        }
        for action in actions {
            action();
        }
    }

    /// Number of teardown actions waiting for dispose.
    pub fn pending_disposals(&self) -> usize {
        self.dispose_actions.len()
    }

    fn own(&mut self, subscription: &Subscription) {
        let subscription = subscription.clone();
        self.custom_dispose(move || subscription.unsubscribe());
    }
}

impl std::fmt::Debug for ReactiveModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveModel")
            .field("pending_disposals", &self.dispose_actions.len())
            .finish()
    }
}

/// A model built on a [`ReactiveModel`].
///
/// `mount` runs once after construction, when the target is live; the
/// default is a no-op. `dispose` releases everything the model registered.
pub trait Lifecycle {
    /// What the model attaches to.
    type Target;

    fn reactive(&mut self) -> &mut ReactiveModel;

    fn mount(&mut self, _target: Self::Target) {}

    fn dispose(&mut self) {
        self.reactive().dispose();
    }
}

/// Mounts a model on construction and disposes it when dropped.
pub struct Mounted<M: Lifecycle> {
    model: M,
}

impl<M: Lifecycle> Mounted<M> {
    pub fn new(mut model: M, target: M::Target) -> Self {
        model.mount(target);
        Self { model }
    }
}

impl<M: Lifecycle> Deref for Mounted<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.model
    }
}

impl<M: Lifecycle> DerefMut for Mounted<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.model
    }
}

impl<M: Lifecycle> Drop for Mounted<M> {
    fn drop(&mut self) {
        self.model.dispose();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_dispose_runs_actions_once_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut model = ReactiveModel::new();
        for i in 0..3 {
            let order = Rc::clone(&order);
            model.custom_dispose(move || order.borrow_mut().push(i));
        }
        assert_eq!(model.pending_disposals(), 3);
        model.dispose();
        model.dispose();
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(model.pending_disposals(), 0);
    }

    #[test]
    fn test_subscribe_released_on_dispose() {
        let source = Behavior::new(0);
        let hits = Rc::new(Cell::new(0));
        let mut model = ReactiveModel::new();
        let counter = Rc::clone(&hits);
        let sub = model.subscribe(&source, move |_| counter.set(counter.get() + 1));
        source.set(1);
        assert_eq!(hits.get(), 2);

        model.dispose();
        assert!(!sub.is_active());
        assert_eq!(source.listener_count(), 0);
        source.set(2);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_early_unsubscribe_then_dispose() {
        let source = Behavior::new(0);
        let mut model = ReactiveModel::new();
        let sub = model.subscribe(&source, |_| {});
        sub.unsubscribe();
        model.dispose();
        assert_eq!(source.listener_count(), 0);
    }

    struct Probe {
        reactive: ReactiveModel,
        mounted_with: Rc<Cell<Option<u8>>>,
        disposed: Rc<Cell<u32>>,
    }

    impl Lifecycle for Probe {
        type Target = u8;

        fn reactive(&mut self) -> &mut ReactiveModel {
            &mut self.reactive
        }

        fn mount(&mut self, target: u8) {
            self.mounted_with.set(Some(target));
            let disposed = Rc::clone(&self.disposed);
            self.reactive
                .custom_dispose(move || disposed.set(disposed.get() + 1));
        }
    }

    #[test]
    fn test_mounted_guard_mounts_and_disposes_on_drop() {
        let mounted_with = Rc::new(Cell::new(None));
        let disposed = Rc::new(Cell::new(0));
        {
            let guard = Mounted::new(
                Probe {
                    reactive: ReactiveModel::new(),
                    mounted_with: Rc::clone(&mounted_with),
                    disposed: Rc::clone(&disposed),
                },
                7,
            );
            assert_eq!(guard.mounted_with.get(), Some(7));
            assert_eq!(disposed.get(), 0);
        }
        assert_eq!(disposed.get(), 1);
    }
}
