//! Build errors for machines and transition rules.

use crate::validation::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building machines and registering rules.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No states defined. Add at least one state with .state(state)")]
    NoStates,

    #[error("Rule for trigger {trigger} was created for another state, not '{state}'")]
    ForeignRule { state: String, trigger: String },

    #[error("Machine rejected with {} violation(s)", .violations.len())]
    Rejected { violations: Vec<ConfigViolation> },
}
