//! # Service Timeline
//!
//! Rebuilds, from an event log, the interval each process spent in service and checks the
//! readers-writers exclusion rules against it:
//!
//! - a writer in service overlaps nobody;
//! - any number of readers may overlap each other.
//!
//! An interval opens on [`EventKind::InService`] and closes on [`EventKind::ServiceDone`] or
//! an interrupted service. Both are emitted while access is held, so log order is enough to
//! detect overlap.

use crate::model::{EventKind, InterruptPoint, ProcessEvent, ProcessId, Role};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInterval {
    pub id: ProcessId,
    pub role: Role,
    pub start: Duration,
    /// `None` if the log ended while the process was still in service.
    pub end: Option<Duration>,
}

/// Two processes in service at the same time when at least one of them is a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub entering: ProcessId,
    pub holding: ProcessId,
    pub at: Duration,
}

#[derive(Debug, Default)]
pub struct ServiceTimeline {
    intervals: Vec<ServiceInterval>,
    violations: Vec<Overlap>,
    peak_readers: usize,
}

impl ServiceTimeline {
    pub fn from_events(events: &[ProcessEvent]) -> Self {
        let mut timeline = Self::default();
        // (process, role, index into intervals)
        let mut active: Vec<(ProcessId, Role, usize)> = Vec::new();

        for event in events {
            match event.kind {
                EventKind::InService { .. } => {
                    for &(holder, holder_role, _) in &active {
                        if event.role == Role::Writer || holder_role == Role::Writer {
                            timeline.violations.push(Overlap {
                                entering: event.id,
                                holding: holder,
                                at: event.at,
                            });
                        }
                    }
                    timeline.intervals.push(ServiceInterval {
                        id: event.id,
                        role: event.role,
                        start: event.at,
                        end: None,
                    });
                    active.push((event.id, event.role, timeline.intervals.len() - 1));

                    let readers = active.iter().filter(|(_, r, _)| *r == Role::Reader).count();
                    timeline.peak_readers = timeline.peak_readers.max(readers);
                }
                EventKind::ServiceDone | EventKind::Interrupted(InterruptPoint::Service) => {
                    if let Some(pos) = active.iter().position(|(id, _, _)| *id == event.id) {
                        let (_, _, index) = active.remove(pos);
                        timeline.intervals[index].end = Some(event.at);
                    }
                }
                _ => {}
            }
        }
        timeline
    }

    pub fn intervals(&self) -> &[ServiceInterval] {
        &self.intervals
    }

    pub fn interval(&self, id: ProcessId) -> Option<&ServiceInterval> {
        self.intervals.iter().find(|i| i.id == id)
    }

    pub fn violations(&self) -> &[Overlap] {
        &self.violations
    }

    /// True when no writer ever shared the resource.
    pub fn is_exclusive(&self) -> bool {
        self.violations.is_empty()
    }

    /// Largest number of readers observed in service at once.
    pub fn peak_readers(&self) -> usize {
        self.peak_readers
    }
}
