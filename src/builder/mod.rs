//! Builder API for declaring transitions and assembling machines.
//!
//! Transitions are declared on states with the fluent chain
//! `state.when(trigger).transition_to(&target)`, optionally followed by
//! `.then(activity)`. Rules can also be built by value with
//! [`TransitionRule::new`](crate::core::TransitionRule::new) and registered
//! with [`State::register`](crate::core::State::register).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Datum, RuleRef, StateRef, Trigger};
use crate::effects::Activity;

/// Declare a transition from `from` to `to` on `trigger`, without an
/// activity.
///
/// # Example
///
/// ```
/// use instate::builder::connect;
/// use instate::core::State;
///
/// let start = State::<String, u8>::new("Start");
/// let finish = State::new("Finish");
///
/// let rule = connect(&start, 1, &finish);
/// assert_eq!(rule.destination().unwrap().name(), "Finish");
/// ```
pub fn connect<D: Datum, T: Trigger>(
    from: &StateRef<D, T>,
    trigger: T,
    to: &StateRef<D, T>,
) -> RuleRef<D, T> {
    let rule = from.when(trigger);
    rule.transition_to(to);
    rule
}

/// Declare a transition that runs `activity` once it reaches `to`.
///
/// # Example
///
/// ```
/// use instate::builder::connect_with;
/// use instate::core::State;
/// use instate::effects::AppendArgs;
///
/// let start = State::<String, u8>::new("Start");
/// let finish = State::new("Finish");
///
/// let rule = connect_with(&start, 1, &finish, AppendArgs);
/// assert!(rule.after_transition_activity().is_some());
/// ```
pub fn connect_with<D, T, A>(
    from: &StateRef<D, T>,
    trigger: T,
    to: &StateRef<D, T>,
    activity: A,
) -> RuleRef<D, T>
where
    D: Datum,
    T: Trigger,
    A: Activity<D, T> + 'static,
{
    let rule = from.when(trigger);
    if let Some(builder) = rule.transition_to(to) {
        builder.then(activity);
    }
    rule
}
