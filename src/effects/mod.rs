//! Runtime side of the machine: firing triggers and running activities.
//!
//! # Key Concepts
//!
//! - **Activities**: behavior bound to a destination by the transition that
//!   reached it, invoked with zero, one or two arguments
//! - **State Machine**: resolves triggers against the current state and
//!   moves the current-state pointer
//! - **Activity handles**: the asynchronous variant, which resolves the
//!   transition synchronously and runs the activity on Tokio's blocking pool

mod activity;
mod handle;
mod machine;

pub use activity::{
    activity_fn, Activity, ActivityArgs, ActivityContext, ActivityRef, AppendArgs, FnActivity,
    IdentityActivity,
};
pub use handle::{ActivityHandle, FireError};
pub use machine::{Resolution, StateMachine};
