//! Per-process timed state machine.
//!
//! A [`ProcessActor`] is a plain value (descriptor + shared-state handle + event sender +
//! cancellation token) whose [`run`](ProcessActor::run) future is spawned as its own task.

pub mod actor;
pub mod outcome;

pub use actor::*;
pub use outcome::*;
