//! Core machine types.
//!
//! This module contains the building blocks the machine runs over:
//! - Trigger and data bounds via the `Trigger` and `Datum` traits
//! - States and their shared data logs
//! - Transition rules declared on states
//! - History of completed transitions

mod data;
mod history;
mod rule;
mod state;
mod trigger;

pub use data::DataLog;
pub use history::{StateHistory, StateTransition};
pub use rule::{RuleRef, TransitionRule};
pub use state::{State, StateId, StateRef, StateView};
pub use trigger::{Datum, Trigger};

pub(crate) use trigger::describe;
