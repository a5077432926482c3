//! Validation rules for states and their transitions.

use crate::core::{describe, Datum, StateRef, Trigger};
use crate::effects::StateMachine;
use crate::validation::violations::ConfigViolation;
use std::collections::BTreeMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of validation: success, or every violation found.
pub type ValidationOutcome = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Check `states` and the machine's `current` state, accumulating ALL
/// violations.
pub fn validate_states<D: Datum, T: Trigger>(
    states: &[StateRef<D, T>],
    current: Option<&StateRef<D, T>>,
) -> ValidationOutcome {
    let mut checks: Vec<ValidationOutcome> = Vec::new();

    if states.is_empty() {
        checks.push(Validation::fail(ConfigViolation::NoStates));
    }

    if let Some(current) = current {
        if !is_registered(states, current) {
            checks.push(Validation::fail(
                ConfigViolation::InitialStateNotRegistered {
                    name: current.name().to_string(),
                },
            ));
        }
    }

    let mut names: BTreeMap<&str, usize> = BTreeMap::new();
    for state in states {
        *names.entry(state.name()).or_default() += 1;
    }
    for (name, count) in names {
        if count > 1 {
            checks.push(Validation::fail(ConfigViolation::DuplicateStateName {
                name: name.to_string(),
                count,
            }));
        }
    }

    for state in states {
        checks.extend(check_rules(states, state));
    }

    if checks.is_empty() {
        return Validation::success(());
    }
    Validation::all_vec(checks).map(|_| ())
}

fn check_rules<D: Datum, T: Trigger>(
    states: &[StateRef<D, T>],
    state: &StateRef<D, T>,
) -> Vec<ValidationOutcome> {
    let rules = state.permitted_transitions();
    let mut checks = Vec::new();

    for (position, rule) in rules.iter().enumerate() {
        let trigger = describe(rule.trigger());

        if rules[..position]
            .iter()
            .any(|earlier| earlier.trigger() == rule.trigger())
        {
            checks.push(Validation::fail(ConfigViolation::ShadowedTrigger {
                state: state.name().to_string(),
                trigger: trigger.clone(),
                position,
            }));
        }

        match rule.destination() {
            None => checks.push(Validation::fail(ConfigViolation::DanglingTransition {
                state: state.name().to_string(),
                trigger,
            })),
            Some(destination) if !is_registered(states, &destination) => {
                checks.push(Validation::fail(ConfigViolation::UnregisteredDestination {
                    state: state.name().to_string(),
                    trigger,
                    destination: destination.name().to_string(),
                }))
            }
            Some(_) => {}
        }
    }

    checks
}

fn is_registered<D, T>(states: &[StateRef<D, T>], state: &StateRef<D, T>) -> bool {
    states.iter().any(|s| Arc::ptr_eq(s, state))
}

impl<D: Datum, T: Trigger> StateMachine<D, T> {
    /// Validate the machine's states, rules and current state.
    ///
    /// Purely diagnostic: the outcome never changes how `fire` behaves.
    pub fn validate(&self) -> ValidationOutcome {
        validate_states(self.states(), self.current_state())
    }
}
