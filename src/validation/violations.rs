//! Misconfigurations found by machine validation.

use thiserror::Error;

/// A single problem found while validating a machine.
///
/// Fatal violations make [`StateMachineBuilder::build`](crate::builder::StateMachineBuilder::build)
/// fail. The others describe rules that can never move the machine and are
/// only logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("No states registered")]
    NoStates,

    #[error("Initial state '{name}' is not registered with the machine")]
    InitialStateNotRegistered { name: String },

    #[error("State name '{name}' is registered {count} times")]
    DuplicateStateName { name: String, count: usize },

    #[error("Transition from '{state}' on {trigger} has no destination")]
    DanglingTransition { state: String, trigger: String },

    #[error("Transition #{position} from '{state}' on {trigger} is shadowed by an earlier rule")]
    ShadowedTrigger {
        state: String,
        trigger: String,
        position: usize,
    },

    #[error("Transition from '{state}' on {trigger} leads to unregistered state '{destination}'")]
    UnregisteredDestination {
        state: String,
        trigger: String,
        destination: String,
    },
}

impl ConfigViolation {
    /// Whether the machine should be rejected outright.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoStates | Self::InitialStateNotRegistered { .. } | Self::DuplicateStateName { .. }
        )
    }
}
