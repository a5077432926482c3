//! Marker traits for the caller-supplied trigger and data types.

use std::fmt::Debug;

/// Event identifier that activates a transition.
///
/// The machine only ever compares triggers with `==`. `Debug` is used to
/// render triggers in log lines, history records and snapshots.
///
/// Implemented automatically for every qualifying type.
///
/// # Example
///
/// ```rust
/// use instate::core::Trigger;
///
/// #[derive(PartialEq, Debug)]
/// enum Bell {
///     Start,
///     Finish,
/// }
///
/// fn accepts<T: Trigger>(_: T) {}
/// accepts(Bell::Finish);
/// accepts("strings work too");
/// ```
pub trait Trigger: PartialEq + Debug + Send + Sync + 'static {}

impl<T> Trigger for T where T: PartialEq + Debug + Send + Sync + 'static {}

/// Element type of a state's data log and of activity arguments.
///
/// Use `Option<_>` when a fire may carry "no data this round"; `None`
/// values are passed to activities unchanged.
pub trait Datum: Clone + Debug + Send + Sync + 'static {}

impl<D> Datum for D where D: Clone + Debug + Send + Sync + 'static {}

/// Render a trigger for diagnostics.
pub(crate) fn describe<T: Trigger>(trigger: &T) -> String {
    format!("{trigger:?}")
}
