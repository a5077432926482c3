//! State machine that resolves triggers and runs post-transition activities.

use crate::config::MachineConfig;
use crate::core::{describe, Datum, StateHistory, StateRef, StateTransition, StateView, Trigger};
use crate::effects::activity::{ActivityArgs, ActivityContext};
use crate::effects::handle::ActivityHandle;
use chrono::Utc;
use std::borrow::Borrow;
use std::sync::Arc;
use tracing::debug;

/// Which branch of trigger resolution ran.
///
/// [`StateMachine::fire`] collapses this into the resulting state; callers
/// that need to tell an unknown trigger from an unwired one use
/// [`StateMachine::resolve`] instead.
#[derive(Debug)]
pub enum Resolution<D, T> {
    /// The machine has no states.
    Inert,
    /// No state was current; the first registered state was adopted and
    /// the trigger was not evaluated.
    Started(StateRef<D, T>),
    /// No rule on the current state matches the trigger.
    Unmatched(StateRef<D, T>),
    /// The first matching rule has no destination.
    Dangling(StateRef<D, T>),
    /// The machine moved along a rule.
    Transitioned {
        from: StateRef<D, T>,
        to: StateRef<D, T>,
    },
}

impl<D, T> Resolution<D, T> {
    /// State the machine is in after resolution.
    pub fn state(&self) -> Option<&StateRef<D, T>> {
        match self {
            Self::Inert => None,
            Self::Started(state) | Self::Unmatched(state) | Self::Dangling(state) => Some(state),
            Self::Transitioned { to, .. } => Some(to),
        }
    }

    pub fn into_state(self) -> Option<StateRef<D, T>> {
        match self {
            Self::Inert => None,
            Self::Started(state) | Self::Unmatched(state) | Self::Dangling(state) => Some(state),
            Self::Transitioned { to, .. } => Some(to),
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Finite state machine over shared states.
///
/// The machine owns the ordered list of states and the current-state
/// pointer. It holds no lock: concurrent `fire` calls must be serialized by
/// the embedding application, which `&mut self` enforces for a single
/// owner. Note that states, and the data logs they share, may be shared
/// between several machines; appends through one are visible to all.
///
/// # Example
///
/// ```rust
/// use instate::core::State;
/// use instate::effects::{AppendArgs, StateMachine};
///
/// let start = State::<String, &'static str>::with_data("Start", vec!["math".to_string()]);
/// let finish = State::new("Finish");
/// start.when("finish").transition_to(&finish).map(|b| b.then(AppendArgs));
///
/// let mut machine = StateMachine::new();
/// machine.add_state(start.clone());
/// machine.add_state(finish.clone());
/// machine.initial_state(&start);
///
/// let current = machine.fire_with("finish", "history".to_string()).unwrap();
/// assert_eq!(current.name(), "Finish");
/// assert_eq!(finish.data().to_vec(), vec!["math", "history"]);
/// ```
pub struct StateMachine<D, T> {
    states: Vec<StateRef<D, T>>,
    current: Option<StateRef<D, T>>,
    history: StateHistory,
    config: MachineConfig,
}

impl<D: Datum, T: Trigger> StateMachine<D, T> {
    /// Create an empty machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => StateHistory::bounded(limit),
            None => StateHistory::new(),
        };
        Self {
            states: Vec::new(),
            current: None,
            history,
            config,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Register a state. The first registered state is where an
    /// unconfigured machine starts.
    pub fn add_state(&mut self, state: StateRef<D, T>) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[StateRef<D, T>] {
        &self.states
    }

    /// First registered state named `name`.
    pub fn state_named(&self, name: &str) -> Option<&StateRef<D, T>> {
        self.states.iter().find(|s| s.name() == name)
    }

    /// Make `state` current. Membership in [`states`](Self::states) is not
    /// checked; see [`validate`](Self::validate).
    pub fn initial_state(&mut self, state: &StateRef<D, T>) {
        self.current = Some(Arc::clone(state));
    }

    pub fn current_state(&self) -> Option<&StateRef<D, T>> {
        self.current.as_ref()
    }

    /// Read-only view of the current state.
    pub fn current_view(&self) -> Option<Arc<dyn StateView<D>>> {
        self.current
            .as_ref()
            .map(|state| Arc::clone(state) as Arc<dyn StateView<D>>)
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Resolve `trigger` against the current state and move the machine.
    ///
    /// 1. No states: nothing happens ([`Resolution::Inert`]).
    /// 2. No current state: the first registered state becomes current and
    ///    the trigger is ignored.
    /// 3. Otherwise the first rule on the current state matching `trigger`
    ///    is taken. Without a match, or with a dangling match, the machine
    ///    stays put. With a destination, the rule's activity (if any) is
    ///    bound to the destination, the destination takes over the current
    ///    state's data log and becomes current.
    pub fn resolve(&mut self, trigger: &T) -> Resolution<D, T> {
        let Some(first) = self.states.first() else {
            debug!(trigger = ?trigger, "fire ignored, machine has no states");
            return Resolution::Inert;
        };

        let Some(current) = self.current.clone() else {
            let first = Arc::clone(first);
            debug!(state = %first.name(), "machine started at first registered state");
            self.current = Some(Arc::clone(&first));
            return Resolution::Started(first);
        };

        let Some(rule) = current.rule_for(trigger) else {
            debug!(state = %current.name(), trigger = ?trigger, "no transition for trigger");
            return Resolution::Unmatched(current);
        };

        let Some(destination) = rule.destination() else {
            debug!(state = %current.name(), trigger = ?trigger, "transition has no destination");
            return Resolution::Dangling(current);
        };

        match rule.after_transition_activity() {
            Some(activity) => destination.set_associated_activity(Some(activity)),
            None if self.config.clear_stale_activity => destination.set_associated_activity(None),
            None => {}
        }
        destination.replace_data(current.data());
        self.current = Some(Arc::clone(&destination));

        debug!(
            from = %current.name(),
            to = %destination.name(),
            trigger = ?trigger,
            "transitioned"
        );
        self.record(&current, &destination, describe(trigger), false);

        Resolution::Transitioned {
            from: current,
            to: destination,
        }
    }

    /// Fire `trigger` without running any activity.
    ///
    /// Returns the state the machine is in afterwards, or `None` when it
    /// has no states.
    pub fn fire(&mut self, trigger: impl Borrow<T>) -> Option<StateRef<D, T>> {
        self.resolve(trigger.borrow()).into_state()
    }

    /// Fire `trigger`, then run the resulting state's activity with `data`.
    pub fn fire_with(&mut self, trigger: impl Borrow<T>, data: D) -> Option<StateRef<D, T>> {
        self.fire_args(trigger, ActivityArgs::One(data))
    }

    /// Fire `trigger`, then run the resulting state's activity with two
    /// arguments, in order.
    pub fn fire_with_pair(
        &mut self,
        trigger: impl Borrow<T>,
        first: D,
        second: D,
    ) -> Option<StateRef<D, T>> {
        self.fire_args(trigger, ActivityArgs::Two(first, second))
    }

    /// Fire `trigger`, then run the resulting state's activity with `args`.
    ///
    /// The state the activity returns becomes current and is returned.
    /// Without an activity the resolved state is returned unchanged.
    pub fn fire_args(
        &mut self,
        trigger: impl Borrow<T>,
        args: ActivityArgs<D>,
    ) -> Option<StateRef<D, T>> {
        let trigger = trigger.borrow();
        let origin = self.current.clone();
        let resolved = self.resolve(trigger).into_state()?;

        let Some(activity) = resolved.associated_activity() else {
            return Some(resolved);
        };

        debug!(
            state = %resolved.name(),
            activity = %activity.label(),
            arity = args.arity(),
            "running activity"
        );
        let ctx = ActivityContext::new(origin, Arc::clone(&resolved));
        let next = activity.execute(&ctx, args);
        self.settle(&resolved, &next, describe(trigger));
        Some(next)
    }

    /// Like [`fire_with`](Self::fire_with), with the activity run on Tokio's
    /// blocking pool.
    ///
    /// Resolution happens before this returns. The handle borrows the
    /// machine until it is awaited or dropped.
    pub fn fire_async(&mut self, trigger: impl Borrow<T>, data: D) -> ActivityHandle<'_, D, T> {
        self.fire_async_args(trigger, ActivityArgs::One(data))
    }

    pub fn fire_async_pair(
        &mut self,
        trigger: impl Borrow<T>,
        first: D,
        second: D,
    ) -> ActivityHandle<'_, D, T> {
        self.fire_async_args(trigger, ActivityArgs::Two(first, second))
    }

    pub fn fire_async_args(
        &mut self,
        trigger: impl Borrow<T>,
        args: ActivityArgs<D>,
    ) -> ActivityHandle<'_, D, T> {
        let trigger = trigger.borrow();
        let origin = self.current.clone();
        let Some(resolved) = self.resolve(trigger).into_state() else {
            return ActivityHandle::ready(self, None);
        };

        let Some(activity) = resolved.associated_activity() else {
            return ActivityHandle::ready(self, Some(resolved));
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => return ActivityHandle::no_runtime(self, resolved),
        };

        debug!(
            state = %resolved.name(),
            activity = %activity.label(),
            arity = args.arity(),
            "spawning activity"
        );
        let ctx = ActivityContext::new(origin, Arc::clone(&resolved));
        let task = runtime.spawn_blocking(move || activity.execute(&ctx, args));
        ActivityHandle::running(self, resolved, describe(trigger), task)
    }

    /// Make the state an activity returned current.
    pub(crate) fn settle(&mut self, ran_on: &StateRef<D, T>, next: &StateRef<D, T>, trigger: String) {
        if !Arc::ptr_eq(ran_on, next) {
            debug!(from = %ran_on.name(), to = %next.name(), "activity redirected machine");
            self.record(ran_on, next, trigger, true);
        }
        self.current = Some(Arc::clone(next));
    }

    fn record(
        &mut self,
        from: &StateRef<D, T>,
        to: &StateRef<D, T>,
        trigger: String,
        via_activity: bool,
    ) {
        if !self.config.record_history {
            return;
        }
        self.history.record(StateTransition {
            from: from.name().to_string(),
            to: to.name().to_string(),
            trigger,
            via_activity,
            timestamp: Utc::now(),
        });
    }
}

impl<D: Datum, T: Trigger> Default for StateMachine<D, T> {
    fn default() -> Self {
        Self::new()
    }
}
