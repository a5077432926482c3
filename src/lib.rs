//! InState: a small embeddable finite state machine
//!
//! States are declared up front, wired together with a fluent grammar, and
//! then driven one trigger at a time. Every state carries a data log that
//! is handed on from state to state, so the machine accumulates a trail of
//! the values it has processed.
//!
//! # Core Concepts
//!
//! - **Trigger**: any equality-comparable value that names an event
//! - **State**: a named node with a shared data log and outgoing rules
//! - **Transition rule**: trigger + origin + destination + optional activity
//! - **Activity**: behavior run after a transition, given zero, one or two
//!   arguments, choosing the state the machine ends up in
//! - **Fire**: resolve a trigger against the current state and move
//!
//! Misconfiguration never makes `fire` fail. A machine without states stays
//! inert, an unstarted machine starts at its first state, and an unknown or
//! unwired trigger leaves the machine where it is. [`StateMachine::resolve`]
//! and [`StateMachine::validate`] tell these cases apart.
//!
//! # Example
//!
//! ```rust
//! use instate::core::State;
//! use instate::effects::{AppendArgs, StateMachine};
//! use instate::trigger_enum;
//!
//! trigger_enum! {
//!     enum Bell {
//!         Start,
//!         Finish,
//!     }
//! }
//!
//! let start = State::<Option<String>, Bell>::with_data(
//!     "Start",
//!     vec![Some("math".to_string()), Some("science".to_string())],
//! );
//! let finish = State::new("Finish");
//!
//! start
//!     .when(Bell::Finish)
//!     .transition_to(&finish)
//!     .map(|b| b.then(AppendArgs));
//!
//! let mut machine = StateMachine::new();
//! machine.add_state(start.clone());
//! machine.add_state(finish.clone());
//! machine.initial_state(&start);
//!
//! machine.fire_with(Bell::Finish, Some("history".to_string()));
//!
//! assert_eq!(machine.current_state().unwrap().name(), "Finish");
//! assert_eq!(finish.data().len(), 3);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use config::{ConfigError, MachineConfig};
pub use core::{DataLog, State, StateRef, StateView, TransitionRule, Trigger};
pub use effects::{
    Activity, ActivityArgs, ActivityContext, ActivityHandle, FireError, Resolution, StateMachine,
};
pub use validation::ConfigViolation;
