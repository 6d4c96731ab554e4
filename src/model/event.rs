//! Event stream emitted by process actors.
//!
//! Actors never print. They push a [`ProcessEvent`] for every phase transition and the
//! reporting layer decides how (or whether) to render it.

use crate::model::{ProcessId, Role};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

/// Lifecycle phase of a process actor.
///
/// ```text
/// WaitingArrival -> RequestingAccess -> InService -> Releasing -> Finished
///       |                  |
///       +------------------+--> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    WaitingArrival,
    RequestingAccess,
    InService,
    Releasing,
    Finished,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished | Phase::Cancelled)
    }
}

/// The suspension that a cancellation interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterruptPoint {
    Arrival,
    Acquire,
    Service,
}

impl Display for InterruptPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterruptPoint::Arrival => f.write_str("arrival"),
            InterruptPoint::Acquire => f.write_str("acquire"),
            InterruptPoint::Service => f.write_str("service"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Arrival time elapsed; the process starts executing.
    Arrived,
    WaitingForLock,
    Acquired,
    /// Admitted and using the resource for `burst` time units.
    InService { burst: u64 },
    /// Service finished. Emitted while access is still held.
    ServiceDone,
    /// The exclusive resource lock was dropped by this process.
    Released,
    Finished,
    Interrupted(InterruptPoint),
}

/// A single observable step of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEvent {
    pub id: ProcessId,
    pub role: Role,
    pub phase: Phase,
    pub kind: EventKind,
    /// Simulated time since the run started.
    pub at: Duration,
}

impl ProcessEvent {
    /// Human readable message for this event, without the process prefix.
    pub fn message(&self) -> String {
        let verb = match self.role {
            Role::Reader => "reading",
            Role::Writer => "writing",
        };
        match self.kind {
            EventKind::Arrived => "Starting execution".to_string(),
            EventKind::WaitingForLock => "Waiting to acquire resource lock".to_string(),
            EventKind::Acquired => "Acquired resource lock".to_string(),
            EventKind::InService { burst } => match self.role {
                Role::Reader => format!("Reading (CPU burst {burst})"),
                Role::Writer => format!("Writing (CPU burst {burst})"),
            },
            EventKind::ServiceDone => format!("Done {verb}"),
            EventKind::Released => "Released resource lock".to_string(),
            EventKind::Finished => "Finished execution".to_string(),
            EventKind::Interrupted(InterruptPoint::Arrival) => {
                "Interrupted while waiting to arrive".to_string()
            }
            EventKind::Interrupted(InterruptPoint::Acquire) => {
                "Interrupted while waiting to acquire resource lock".to_string()
            }
            EventKind::Interrupted(InterruptPoint::Service) => format!("Interrupted during {verb}"),
        }
    }
}

impl Display for ProcessEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ">>> [{} {}] {}", self.role, self.id, self.message())
    }
}
