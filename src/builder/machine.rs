//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Datum, StateRef, Trigger};
use crate::effects::StateMachine;
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::warn;

/// Builder for constructing state machines with a fluent API.
///
/// Unlike assembling a [`StateMachine`] by hand, `build` validates the
/// result: fatal findings reject the machine, warnings are logged.
///
/// # Example
///
/// ```rust
/// use instate::builder::StateMachineBuilder;
/// use instate::core::State;
///
/// let start = State::<String, &'static str>::new("Start");
/// let finish = State::new("Finish");
/// start.when("finish").transition_to(&finish);
///
/// let machine = StateMachineBuilder::new()
///     .state(start.clone())
///     .state(finish)
///     .initial(&start)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state().unwrap().name(), "Start");
/// ```
pub struct StateMachineBuilder<D, T> {
    states: Vec<StateRef<D, T>>,
    initial: Option<StateRef<D, T>>,
    config: MachineConfig,
}

impl<D: Datum, T: Trigger> StateMachineBuilder<D, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            config: MachineConfig::default(),
        }
    }

    /// Register a state. Registration order is kept.
    pub fn state(mut self, state: StateRef<D, T>) -> Self {
        self.states.push(state);
        self
    }

    /// Register several states at once.
    pub fn states<I: IntoIterator<Item = StateRef<D, T>>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the initial state (optional). Without one, the first fire
    /// starts the machine at the first registered state.
    pub fn initial(mut self, state: &StateRef<D, T>) -> Self {
        self.initial = Some(Arc::clone(state));
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state machine.
    /// Returns an error if there are no states or validation finds a fatal
    /// violation.
    pub fn build(self) -> Result<StateMachine<D, T>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = StateMachine::with_config(self.config);
        for state in self.states {
            machine.add_state(state);
        }
        if let Some(initial) = &self.initial {
            machine.initial_state(initial);
        }

        if let Validation::Failure(violations) = machine.validate() {
            let (fatal, warnings): (Vec<_>, Vec<_>) =
                violations.iter().cloned().partition(|v| v.is_fatal());
            for violation in &warnings {
                warn!(%violation, "state machine configuration warning");
            }
            if !fatal.is_empty() {
                return Err(BuildError::Rejected { violations: fatal });
            }
        }

        Ok(machine)
    }
}

impl<D: Datum, T: Trigger> Default for StateMachineBuilder<D, T> {
    fn default() -> Self {
        Self::new()
    }
}
