//! State transition history tracking.
//!
//! The machine appends one record per completed transition, so a test or a
//! host can read back the path a run took.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use instate::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "Start".to_string(),
///     to: "Finish".to_string(),
///     trigger: "Finish".to_string(),
///     via_activity: false,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "Finish");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Name of the state being left
    pub from: String,
    /// Name of the state being entered
    pub to: String,
    /// Debug rendering of the trigger that was fired
    pub trigger: String,
    /// True when an activity, not a rule, chose the new state
    pub via_activity: bool,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions, optionally bounded.
///
/// # Example
///
/// ```rust
/// use instate::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// for (from, to) in [("Start", "Middle"), ("Middle", "End")] {
///     history.record(StateTransition {
///         from: from.to_string(),
///         to: to.to_string(),
///         trigger: "Next".to_string(),
///         via_activity: false,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec!["Start", "Middle", "End"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    limit: Option<usize>,
}

impl StateHistory {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps only the `limit` most recent records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Append a transition, evicting the oldest record when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    /// Names of the states traversed: the first origin, then the
    /// destination of each record.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Time between the first and the last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
