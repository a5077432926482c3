//! Activities run after a transition lands on the state they are bound to.

use crate::core::{Datum, StateRef, Trigger};
use std::sync::Arc;

/// Shared handle to an activity, as stored on rules and states.
pub type ActivityRef<D, T> = Arc<dyn Activity<D, T>>;

/// Arguments supplied to an activity by a fire call.
#[derive(Clone, Debug, PartialEq)]
pub enum ActivityArgs<D> {
    None,
    One(D),
    Two(D, D),
}

impl<D> ActivityArgs<D> {
    /// Number of arguments carried.
    pub fn arity(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
        }
    }

    pub fn first(&self) -> Option<&D> {
        match self {
            Self::None => None,
            Self::One(first) | Self::Two(first, _) => Some(first),
        }
    }

    pub fn second(&self) -> Option<&D> {
        match self {
            Self::Two(_, second) => Some(second),
            _ => None,
        }
    }

    /// Arguments in call order.
    pub fn into_vec(self) -> Vec<D> {
        match self {
            Self::None => Vec::new(),
            Self::One(first) => vec![first],
            Self::Two(first, second) => vec![first, second],
        }
    }
}

/// The state pair an activity invocation is bound to.
pub struct ActivityContext<D, T> {
    origin: Option<StateRef<D, T>>,
    destination: StateRef<D, T>,
}

impl<D, T> ActivityContext<D, T> {
    pub fn new(origin: Option<StateRef<D, T>>, destination: StateRef<D, T>) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// State that was current before the fire, if the machine had started.
    pub fn origin(&self) -> Option<&StateRef<D, T>> {
        self.origin.as_ref()
    }

    /// State the activity is attached to.
    pub fn destination(&self) -> &StateRef<D, T> {
        &self.destination
    }
}

impl<D, T> Clone for ActivityContext<D, T> {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin.clone(),
            destination: Arc::clone(&self.destination),
        }
    }
}

/// Behavior attached to a transition's destination.
///
/// The machine calls [`execute`](Activity::execute) with whatever the fire
/// call supplied, and the returned state becomes current. Without an
/// override the activity is the identity: it returns its destination.
///
/// # Example
///
/// ```rust
/// use instate::core::StateRef;
/// use instate::effects::{Activity, ActivityArgs, ActivityContext};
///
/// struct Record;
///
/// impl Activity<Option<String>, &'static str> for Record {
///     fn execute(
///         &self,
///         ctx: &ActivityContext<Option<String>, &'static str>,
///         args: ActivityArgs<Option<String>>,
///     ) -> StateRef<Option<String>, &'static str> {
///         ctx.destination().data().extend(args.into_vec());
///         ctx.destination().clone()
///     }
/// }
/// ```
pub trait Activity<D, T>: Send + Sync {
    fn execute(&self, ctx: &ActivityContext<D, T>, args: ActivityArgs<D>) -> StateRef<D, T> {
        let _ = args;
        Arc::clone(ctx.destination())
    }

    /// Label used in log lines.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Activity that leaves the machine where the transition put it.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityActivity;

impl<D, T> Activity<D, T> for IdentityActivity {}

/// Activity that appends every argument to the destination's data log.
///
/// `None` values in an `Option` log are appended like any other value.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppendArgs;

impl<D: Datum, T: Trigger> Activity<D, T> for AppendArgs {
    fn execute(&self, ctx: &ActivityContext<D, T>, args: ActivityArgs<D>) -> StateRef<D, T> {
        ctx.destination().data().extend(args.into_vec());
        Arc::clone(ctx.destination())
    }
}

/// Adapts a closure into an [`Activity`].
pub struct FnActivity<F> {
    label: String,
    f: F,
}

impl<F> FnActivity<F> {
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }
}

impl<D, T, F> Activity<D, T> for FnActivity<F>
where
    F: Fn(&ActivityContext<D, T>, ActivityArgs<D>) -> StateRef<D, T> + Send + Sync,
{
    fn execute(&self, ctx: &ActivityContext<D, T>, args: ActivityArgs<D>) -> StateRef<D, T> {
        (self.f)(ctx, args)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Build an activity from a closure.
///
/// # Example
///
/// ```rust
/// use instate::effects::{activity_fn, Activity, ActivityContext};
/// use std::sync::Arc;
///
/// let log_only = activity_fn("log_only", |ctx: &ActivityContext<String, u8>, _args| {
///     println!("arrived at {}", ctx.destination().name());
///     Arc::clone(ctx.destination())
/// });
/// assert_eq!(Activity::<String, u8>::label(&log_only), "log_only");
/// ```
pub fn activity_fn<D, T, F>(label: impl Into<String>, f: F) -> FnActivity<F>
where
    F: Fn(&ActivityContext<D, T>, ActivityArgs<D>) -> StateRef<D, T> + Send + Sync,
{
    FnActivity::new(label, f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    type TestState = State<Option<String>, u8>;

    fn context() -> ActivityContext<Option<String>, u8> {
        let start = TestState::with_data("Start", vec![Some("math".to_string())]);
        let finish = TestState::new("Finish");
        finish.replace_data(start.data());
        ActivityContext::new(Some(start), finish)
    }

    #[test]
    fn args_report_arity_and_order() {
        let args = ActivityArgs::Two("history", "lunch");

        assert_eq!(args.arity(), 2);
        assert_eq!(args.first(), Some(&"history"));
        assert_eq!(args.second(), Some(&"lunch"));
        assert_eq!(args.into_vec(), vec!["history", "lunch"]);
        assert_eq!(ActivityArgs::<u8>::None.arity(), 0);
        assert_eq!(ActivityArgs::One(1).second(), None);
    }

    #[test]
    fn identity_returns_destination() {
        let ctx = context();
        let result =
            Activity::<Option<String>, u8>::execute(&IdentityActivity, &ctx, ActivityArgs::None);

        assert!(Arc::ptr_eq(&result, ctx.destination()));
        assert_eq!(result.data().len(), 1);
    }

    #[test]
    fn append_args_extends_shared_log() {
        let ctx = context();
        AppendArgs.execute(
            &ctx,
            ActivityArgs::Two(Some("history".to_string()), None),
        );

        let origin = ctx.origin().unwrap();
        assert_eq!(origin.data().len(), 3);
        assert_eq!(ctx.destination().data().last(), Some(None));
    }

    #[test]
    fn closure_activity_can_redirect() {
        let ctx = context();
        let back = activity_fn("back", |ctx: &ActivityContext<Option<String>, u8>, _| {
            Arc::clone(ctx.origin().unwrap())
        });

        let result = back.execute(&ctx, ActivityArgs::None);

        assert_eq!(result.name(), "Start");
        assert_eq!(Activity::<Option<String>, u8>::label(&back), "back");
    }
}
