//! Transition rules: trigger, origin, and the one-time destination binding.

use super::state::{State, StateId, StateRef};
use super::trigger::{Datum, Trigger};
use crate::effects::{Activity, ActivityRef};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

/// Shared handle to a registered rule.
pub type RuleRef<D, T> = Arc<TransitionRule<D, T>>;

/// Binds a trigger to an originating state and, once bound, a destination
/// plus an optional post-transition activity.
///
/// A rule is immutable apart from its binding, which can be set once. A
/// rule without a binding is dangling: it matches its trigger but never
/// moves the machine.
///
/// The origin is held weakly, since the origin already owns the rule. The
/// destination is held strongly, so a state reachable only through a rule
/// stays alive. Rules that form a cycle (A to B and B back to A) keep every
/// state on the cycle alive, even after the application drops its handles.
pub struct TransitionRule<D, T> {
    trigger: T,
    origin: Weak<State<D, T>>,
    origin_id: StateId,
    binding: OnceLock<RuleBinding<D, T>>,
}

struct RuleBinding<D, T> {
    destination: StateRef<D, T>,
    activity: RwLock<Option<ActivityRef<D, T>>>,
}

impl<D: Datum, T: Trigger> TransitionRule<D, T> {
    /// Create an unregistered rule for `origin`.
    ///
    /// Register it with [`State::register`]; [`State::when`] does both steps
    /// at once.
    pub fn new(trigger: T, origin: &StateRef<D, T>) -> Self {
        Self {
            trigger,
            origin: Arc::downgrade(origin),
            origin_id: origin.id(),
            binding: OnceLock::new(),
        }
    }

    /// Bind the destination while building a rule by value.
    ///
    /// Has no effect when a destination is already bound.
    pub fn to(self, destination: &StateRef<D, T>) -> Self {
        self.bind(destination);
        self
    }

    /// Attach a post-transition activity while building a rule by value.
    ///
    /// Ignored on a rule without a destination, since a dangling rule never
    /// reaches a state the activity could run on.
    pub fn with_activity<A: Activity<D, T> + 'static>(self, activity: A) -> Self {
        self.set_activity(Some(Arc::new(activity)));
        self
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn matches(&self, trigger: &T) -> bool {
        self.trigger == *trigger
    }

    pub fn origin(&self) -> Option<StateRef<D, T>> {
        self.origin.upgrade()
    }

    pub fn origin_id(&self) -> StateId {
        self.origin_id
    }

    /// The state this rule leads to, if bound.
    pub fn destination(&self) -> Option<StateRef<D, T>> {
        self.binding.get().map(|b| Arc::clone(&b.destination))
    }

    pub fn destination_name(&self) -> Option<&str> {
        self.binding.get().map(|b| b.destination.name())
    }

    pub fn is_dangling(&self) -> bool {
        self.destination().is_none()
    }

    /// Activity to attach to the destination when this rule fires.
    pub fn after_transition_activity(&self) -> Option<ActivityRef<D, T>> {
        self.binding.get()?.activity.read().clone()
    }

    /// Set the destination. Returns `false` when one was already bound.
    pub(crate) fn bind(&self, destination: &StateRef<D, T>) -> bool {
        self.binding
            .set(RuleBinding {
                destination: Arc::clone(destination),
                activity: RwLock::new(None),
            })
            .is_ok()
    }

    pub(crate) fn set_activity(&self, activity: Option<ActivityRef<D, T>>) {
        if let Some(binding) = self.binding.get() {
            *binding.activity.write() = activity;
        }
    }
}

impl<D: Datum, T: Trigger> fmt::Debug for TransitionRule<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = self.binding.get();
        f.debug_struct("TransitionRule")
            .field("trigger", &self.trigger)
            .field("origin", &self.origin_id)
            .field(
                "destination",
                &binding.map(|b| b.destination.name()),
            )
            .field(
                "has_activity",
                &binding.is_some_and(|b| b.activity.read().is_some()),
            )
            .finish()
    }
}
