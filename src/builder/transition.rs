//! Fluent continuation used while declaring a transition.

use crate::core::{Datum, RuleRef, StateRef, Trigger, TransitionRule};
use crate::effects::{Activity, ActivityRef};
use std::sync::Arc;
use tracing::warn;

impl<D: Datum, T: Trigger> TransitionRule<D, T> {
    /// Bind the destination of a registered rule.
    ///
    /// Returns a [`TransitionBuilder`] for attaching an activity, or `None`
    /// when `target` is `None` (the rule stays dangling) or the rule already
    /// has a destination (the first binding is kept).
    ///
    /// # Example
    ///
    /// ```rust
    /// use instate::core::State;
    ///
    /// let start = State::<String, u8>::new("Start");
    /// let finish = State::new("Finish");
    ///
    /// assert!(start.when(1).transition_to(&finish).is_some());
    /// assert!(start.when(2).transition_to(None).is_none());
    /// ```
    pub fn transition_to<'a>(
        self: &Arc<Self>,
        target: impl Into<Option<&'a StateRef<D, T>>>,
    ) -> Option<TransitionBuilder<D, T>> {
        let target = target.into()?;
        if !self.bind(target) {
            warn!(
                trigger = ?self.trigger(),
                kept = ?self.destination_name(),
                ignored = %target.name(),
                "transition already has a destination"
            );
            return None;
        }
        Some(TransitionBuilder {
            rule: Arc::clone(self),
            destination: Arc::clone(target),
        })
    }
}

/// Continuation returned by [`TransitionRule::transition_to`].
///
/// Attaching an activity is optional; the rule is complete either way.
pub struct TransitionBuilder<D, T> {
    rule: RuleRef<D, T>,
    destination: StateRef<D, T>,
}

impl<D: Datum, T: Trigger> TransitionBuilder<D, T> {
    /// Run `activity` after this transition completes, and continue with
    /// the destination state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use instate::core::State;
    /// use instate::effects::AppendArgs;
    ///
    /// let start = State::<String, &'static str>::new("Start");
    /// let middle = State::new("Middle");
    /// let finish = State::new("Finish");
    ///
    /// start
    ///     .when("next")
    ///     .transition_to(&middle)
    ///     .map(|b| b.then(AppendArgs))
    ///     .map(|middle| middle.when("next").transition_to(&finish));
    ///
    /// assert_eq!(middle.transition_count(), 1);
    /// ```
    pub fn then<A: Activity<D, T> + 'static>(&self, activity: A) -> StateRef<D, T> {
        self.then_shared(Some(Arc::new(activity)))
    }

    /// Alias of [`then`](Self::then).
    pub fn after_transition<A: Activity<D, T> + 'static>(&self, activity: A) -> StateRef<D, T> {
        self.then(activity)
    }

    /// Store an already shared activity, or `None` for no activity.
    pub fn then_shared(&self, activity: Option<ActivityRef<D, T>>) -> StateRef<D, T> {
        self.rule.set_activity(activity);
        Arc::clone(&self.destination)
    }

    /// Declare another transition out of the originating state.
    ///
    /// Returns `None` when the originating state has been dropped.
    pub fn when(&self, trigger: T) -> Option<RuleRef<D, T>> {
        self.rule.origin().map(|origin| origin.when(trigger))
    }

    /// Activity currently stored for this transition.
    pub fn activity(&self) -> Option<ActivityRef<D, T>> {
        self.rule.after_transition_activity()
    }

    pub fn rule(&self) -> &RuleRef<D, T> {
        &self.rule
    }

    pub fn destination(&self) -> &StateRef<D, T> {
        &self.destination
    }
}
