//! Hand-rolled observable state and disposal-list lifecycle.
//!
//! - [`Behavior`]: current value plus synchronous, ordered subscriptions
//! - [`ReactiveModel`]: owns teardown actions for subscriptions and DOM listeners
//! - [`Lifecycle`] / [`Mounted`]: mount-then-dispose for models that need a live target

mod behavior;
mod model;

pub use behavior::{Behavior, Subscription};
pub use model::{Lifecycle, ListenerOptions, Mounted, ReactiveModel};
