//! Machine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`MachineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for a [`StateMachine`](crate::effects::StateMachine).
///
/// Every field has a default, so a partial document is enough.
///
/// # Example
///
/// ```rust
/// use instate::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();
///
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(16));
/// assert!(!config.clear_stale_activity);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Record completed transitions in the machine's history.
    pub record_history: bool,

    /// Keep only this many history records, dropping the oldest.
    pub history_limit: Option<usize>,

    /// When a rule without an activity reaches a state, clear the activity
    /// an earlier transition left on it.
    pub clear_stale_activity: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
            clear_stale_activity: false,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn with_clear_stale_activity(mut self, enabled: bool) -> Self {
        self.clear_stale_activity = enabled;
        self
    }
}
