//! Named states holding a data log, their permitted transitions and the
//! activity bound by the transition that last reached them.

use super::data::DataLog;
use super::rule::{RuleRef, TransitionRule};
use super::trigger::{describe, Datum, Trigger};
use crate::builder::BuildError;
use crate::effects::ActivityRef;
use crate::snapshot::RuleSnapshot;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

/// Stable identity of a state, independent of its name.
pub type StateId = Uuid;

/// Shared handle to a state. The application and the machine both hold one.
pub type StateRef<D, T> = Arc<State<D, T>>;

/// Read-only view of a state.
///
/// Runtime inspection code can be handed `Arc<dyn StateView<D>>` so that it
/// sees names and data but cannot declare transitions.
///
/// # Example
///
/// ```rust
/// use instate::core::{State, StateView};
/// use std::sync::Arc;
///
/// let start = State::<String, &'static str>::new("Start");
/// let view: Arc<dyn StateView<String>> = start.clone();
///
/// assert_eq!(view.name(), "Start");
/// assert!(view.is_terminal());
/// ```
pub trait StateView<D>: Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    fn id(&self) -> StateId;

    /// Handle to the data log currently attached to this state.
    fn data(&self) -> DataLog<D>;

    /// Whether an activity is bound to this state.
    fn has_activity(&self) -> bool;

    /// Declared transitions in declaration order, dangling ones included.
    fn permitted_transitions(&self) -> Vec<RuleSnapshot>;

    /// Number of declared transitions, dangling ones included.
    fn transition_count(&self) -> usize;

    /// A state without outgoing transitions ends every path through it.
    ///
    /// Default implementation checks `transition_count() == 0`.
    fn is_terminal(&self) -> bool {
        self.transition_count() == 0
    }
}

/// A node of the machine.
///
/// States are created by the application, wired with [`State::when`] and
/// then handed to a [`StateMachine`](crate::effects::StateMachine). The
/// machine mutates two things while it runs: the data handle (replaced by
/// the predecessor's on arrival) and the associated activity.
pub struct State<D, T> {
    id: StateId,
    name: String,
    data: RwLock<DataLog<D>>,
    permitted_transitions: RwLock<Vec<RuleRef<D, T>>>,
    associated_activity: RwLock<Option<ActivityRef<D, T>>>,
}

impl<D: Datum, T: Trigger> State<D, T> {
    /// Create a state with an empty data log.
    pub fn new(name: impl Into<String>) -> StateRef<D, T> {
        Self::with_data(name, DataLog::new())
    }

    /// Create a state whose log starts with `data`.
    pub fn with_data(name: impl Into<String>, data: impl Into<DataLog<D>>) -> StateRef<D, T> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            data: RwLock::new(data.into()),
            permitted_transitions: RwLock::new(Vec::new()),
            associated_activity: RwLock::new(None),
        })
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the current data log. Appends through it are visible to
    /// every state sharing the same log.
    pub fn data(&self) -> DataLog<D> {
        self.data.read().clone()
    }

    /// Attach `log` to this state, returning the handle it replaces.
    pub fn replace_data(&self, log: DataLog<D>) -> DataLog<D> {
        std::mem::replace(&mut *self.data.write(), log)
    }

    /// Rules declared on this state, in declaration order.
    pub fn permitted_transitions(&self) -> Vec<RuleRef<D, T>> {
        self.permitted_transitions.read().clone()
    }

    pub fn transition_count(&self) -> usize {
        self.permitted_transitions.read().len()
    }

    pub fn associated_activity(&self) -> Option<ActivityRef<D, T>> {
        self.associated_activity.read().clone()
    }

    pub(crate) fn set_associated_activity(&self, activity: Option<ActivityRef<D, T>>) {
        *self.associated_activity.write() = activity;
    }

    /// Declare a transition out of this state, activated by `trigger`.
    ///
    /// The rule is registered immediately, so a state that only calls
    /// `when` ends up with a dangling rule. Declaring the same trigger twice
    /// creates two rules; only the first one ever matches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use instate::core::State;
    ///
    /// let start = State::<String, &'static str>::new("Start");
    /// let finish = State::new("Finish");
    ///
    /// start.when("finish").transition_to(&finish);
    ///
    /// assert_eq!(start.transition_count(), 1);
    /// ```
    pub fn when(self: &Arc<Self>, trigger: T) -> RuleRef<D, T> {
        let rule = Arc::new(TransitionRule::new(trigger, self));
        self.attach(Arc::clone(&rule));
        rule
    }

    /// Register a rule built separately with [`TransitionRule::new`].
    ///
    /// Fails with [`BuildError::ForeignRule`] when the rule was created for
    /// another state.
    pub fn register(&self, rule: TransitionRule<D, T>) -> Result<RuleRef<D, T>, BuildError> {
        if rule.origin_id() != self.id {
            return Err(BuildError::ForeignRule {
                state: self.name.clone(),
                trigger: describe(rule.trigger()),
            });
        }
        let rule = Arc::new(rule);
        self.attach(Arc::clone(&rule));
        Ok(rule)
    }

    fn attach(&self, rule: RuleRef<D, T>) {
        trace!(
            state = %self.name,
            trigger = %describe(rule.trigger()),
            "registered transition rule"
        );
        self.permitted_transitions.write().push(rule);
    }

    /// First rule, in declaration order, activated by `trigger`.
    pub fn rule_for(&self, trigger: &T) -> Option<RuleRef<D, T>> {
        self.permitted_transitions
            .read()
            .iter()
            .find(|rule| rule.matches(trigger))
            .cloned()
    }
}

impl<D: Datum, T: Trigger> StateView<D> for State<D, T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> StateId {
        self.id
    }

    fn data(&self) -> DataLog<D> {
        State::data(self)
    }

    fn has_activity(&self) -> bool {
        self.associated_activity.read().is_some()
    }

    fn permitted_transitions(&self) -> Vec<RuleSnapshot> {
        self.permitted_transitions
            .read()
            .iter()
            .map(|rule| RuleSnapshot::of(rule))
            .collect()
    }

    fn transition_count(&self) -> usize {
        State::transition_count(self)
    }
}

impl<D, T> PartialEq for State<D, T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<D, T> Eq for State<D, T> {}

impl<D, T> fmt::Debug for State<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("transitions", &self.permitted_transitions.read().len())
            .field("has_activity", &self.associated_activity.read().is_some())
            .finish()
    }
}
