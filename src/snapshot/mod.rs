//! Serializable snapshots of a running machine.
//!
//! A snapshot is an inspection aid: it captures state names, data logs,
//! rules and history at one instant so they can be logged, diffed or
//! asserted on. Activities are not captured and a snapshot cannot be turned
//! back into a machine.

use crate::core::{describe, Datum, StateHistory, StateId, StateRef, TransitionRule, Trigger};
use crate::effects::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One declared rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    /// Debug rendering of the trigger
    pub trigger: String,

    /// Destination name; `None` for a dangling rule
    pub destination: Option<String>,

    /// Whether the rule carries a post-transition activity
    pub has_activity: bool,
}

/// One state, with a copy of its data log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateSnapshot<D> {
    pub id: StateId,
    pub name: String,
    pub data: Vec<D>,
    pub transitions: Vec<RuleSnapshot>,

    /// Whether an activity is currently bound to the state
    pub has_activity: bool,
}

/// Point-in-time view of a machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineSnapshot<D> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Name of the current state, `None` before the machine started
    pub current_state: Option<String>,

    /// Every registered state, in registration order
    pub states: Vec<StateSnapshot<D>>,

    /// Transition history at the time of the snapshot
    pub history: StateHistory,
}

impl RuleSnapshot {
    /// Capture one rule.
    pub fn of<D: Datum, T: Trigger>(rule: &TransitionRule<D, T>) -> Self {
        Self {
            trigger: describe(rule.trigger()),
            destination: rule.destination_name().map(str::to_string),
            has_activity: rule.after_transition_activity().is_some(),
        }
    }
}

impl<D: Serialize> MachineSnapshot<D> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<D> MachineSnapshot<D> {
    pub fn state(&self, name: &str) -> Option<&StateSnapshot<D>> {
        self.states.iter().find(|s| s.name == name)
    }
}

fn capture_state<D: Datum, T: Trigger>(state: &StateRef<D, T>) -> StateSnapshot<D> {
    StateSnapshot {
        id: state.id(),
        name: state.name().to_string(),
        data: state.data().to_vec(),
        transitions: state
            .permitted_transitions()
            .iter()
            .map(|rule| RuleSnapshot::of(rule))
            .collect(),
        has_activity: state.associated_activity().is_some(),
    }
}

impl<D: Datum, T: Trigger> StateMachine<D, T> {
    /// Capture every registered state and the current-state pointer.
    pub fn snapshot(&self) -> MachineSnapshot<D> {
        MachineSnapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            current_state: self.current_state().map(|s| s.name().to_string()),
            states: self.states().iter().map(capture_state).collect(),
            history: self.history().clone(),
        }
    }
}
