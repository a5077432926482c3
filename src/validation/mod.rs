//! Validation of a machine's configuration.
//!
//! `fire` never fails: an unknown trigger and a transition without a
//! destination both leave the machine where it is. Validation is how a
//! caller finds out about such rules up front. It uses Stillwater's
//! `Validation` type to report every violation in one pass instead of
//! stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use instate::core::State;
//! use instate::effects::StateMachine;
//! use instate::validation::ConfigViolation;
//! use stillwater::validation::Validation;
//!
//! let start = State::<String, &'static str>::new("Start");
//! start.when("finish");
//!
//! let mut machine = StateMachine::new();
//! machine.add_state(start);
//!
//! match machine.validate() {
//!     Validation::Failure(violations) => {
//!         assert!(violations
//!             .iter()
//!             .any(|v| matches!(v, ConfigViolation::DanglingTransition { .. })));
//!     }
//!     Validation::Success(_) => panic!("expected a dangling transition"),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::{validate_states, ValidationOutcome};
pub use violations::ConfigViolation;
