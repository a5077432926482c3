//! Handle for an activity running off the caller's thread.

use crate::core::{Datum, StateRef, Trigger};
use crate::effects::machine::StateMachine;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Errors surfaced by the asynchronous activity stage.
///
/// The synchronous `fire*` methods never fail.
#[derive(Debug, thiserror::Error)]
pub enum FireError {
    #[error("No Tokio runtime available to run the activity on state '{state}'")]
    NoRuntime { state: String },

    #[error("Activity task failed: {0}")]
    ActivityJoin(#[from] tokio::task::JoinError),

    #[error("Activity handle polled after completion")]
    Completed,
}

enum Stage<D, T> {
    Ready(Option<StateRef<D, T>>),
    Failed(FireError),
    Running {
        ran_on: StateRef<D, T>,
        trigger: String,
        task: JoinHandle<StateRef<D, T>>,
    },
    Done,
}

/// Future resolving to the state an asynchronously run activity returned.
///
/// The handle mutably borrows its machine, so the machine cannot be fired
/// again until the handle is awaited or dropped. Dropping it detaches the
/// activity: it still runs to completion, but its result is discarded and
/// the machine stays on the state resolution reached.
///
/// There is no cancellation. Wrap the handle in `tokio::time::timeout` to
/// stop waiting for it.
#[must_use = "an activity handle does nothing to the machine unless awaited"]
pub struct ActivityHandle<'m, D, T> {
    machine: &'m mut StateMachine<D, T>,
    resolved: Option<StateRef<D, T>>,
    stage: Stage<D, T>,
}

impl<'m, D: Datum, T: Trigger> ActivityHandle<'m, D, T> {
    pub(crate) fn ready(machine: &'m mut StateMachine<D, T>, state: Option<StateRef<D, T>>) -> Self {
        Self {
            machine,
            resolved: state.clone(),
            stage: Stage::Ready(state),
        }
    }

    pub(crate) fn no_runtime(machine: &'m mut StateMachine<D, T>, resolved: StateRef<D, T>) -> Self {
        let error = FireError::NoRuntime {
            state: resolved.name().to_string(),
        };
        Self {
            machine,
            resolved: Some(resolved),
            stage: Stage::Failed(error),
        }
    }

    pub(crate) fn running(
        machine: &'m mut StateMachine<D, T>,
        ran_on: StateRef<D, T>,
        trigger: String,
        task: JoinHandle<StateRef<D, T>>,
    ) -> Self {
        Self {
            machine,
            resolved: Some(ran_on.clone()),
            stage: Stage::Running {
                ran_on,
                trigger,
                task,
            },
        }
    }

    /// State the synchronous resolution landed on.
    pub fn resolved_state(&self) -> Option<&StateRef<D, T>> {
        self.resolved.as_ref()
    }

    /// Whether an activity was spawned.
    pub fn is_running(&self) -> bool {
        matches!(self.stage, Stage::Running { .. })
    }

    /// Stop waiting for the activity and release the machine.
    pub fn detach(self) {}
}

impl<D: Datum, T: Trigger> Future for ActivityHandle<'_, D, T> {
    type Output = Result<Option<StateRef<D, T>>, FireError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.stage, Stage::Done) {
            Stage::Ready(state) => Poll::Ready(Ok(state)),
            Stage::Failed(error) => Poll::Ready(Err(error)),
            Stage::Running {
                ran_on,
                trigger,
                mut task,
            } => match Pin::new(&mut task).poll(cx) {
                Poll::Pending => {
                    this.stage = Stage::Running {
                        ran_on,
                        trigger,
                        task,
                    };
                    Poll::Pending
                }
                Poll::Ready(Ok(next)) => {
                    this.machine.settle(&ran_on, &next, trigger);
                    Poll::Ready(Ok(Some(next)))
                }
                Poll::Ready(Err(error)) => Poll::Ready(Err(FireError::ActivityJoin(error))),
            },
            Stage::Done => Poll::Ready(Err(FireError::Completed)),
        }
    }
}
