use crate::clock::SimClock;
use crate::lifecycle::config::SimulationConfig;
use crate::model::{ProcessDescriptor, ProcessEvent, ProcessId};
use crate::process_actor::{ActorOutcome, ProcessActor};
use crate::reporting::{
    ConsoleRenderer, EventCollector, EventRenderer, ServiceTimeline, SilentRenderer,
};
use crate::sync::{EngineStats, SharedResourceState};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};

/// The simulation driver.
///
/// `Simulation` is responsible for:
/// - **Ordering**: processes are launched by arrival time, stable on ties
/// - **Wiring**: one [`SharedResourceState`] per run, shared with every actor
/// - **Lifecycle**: spawning one task per process and joining all of them
///
/// Launch order only affects reporting; admission order is decided by the engine.
pub struct Simulation {
    config: SimulationConfig,
    descriptors: Vec<ProcessDescriptor>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, mut descriptors: Vec<ProcessDescriptor>) -> Self {
        descriptors.sort_by_key(|d| d.arrival);
        Self {
            config,
            descriptors,
        }
    }

    /// Descriptors in launch order.
    pub fn descriptors(&self) -> &[ProcessDescriptor] {
        &self.descriptors
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Spawns the event collector and one actor task per descriptor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> RunningSimulation {
        let state = Arc::new(SharedResourceState::new());
        let clock = SimClock::start(self.config.time_unit);
        let root = CancellationToken::new();

        let renderer: Box<dyn EventRenderer> = if self.config.echo_events {
            Box::new(ConsoleRenderer)
        } else {
            Box::new(SilentRenderer)
        };
        let (collector, events) = EventCollector::new();
        let collector = tokio::spawn(collector.run(renderer));

        let mut actors = Vec::with_capacity(self.descriptors.len());
        for descriptor in self.descriptors {
            let cancel = root.child_token();
            let span = info_span!("process", id = %descriptor.id, role = %descriptor.role);
            let actor = ProcessActor::new(
                descriptor.clone(),
                Arc::clone(&state),
                events.clone(),
                cancel.clone(),
                clock,
            );
            let handle = tokio::spawn(actor.run().instrument(span));
            actors.push(ActorHandle {
                descriptor,
                cancel,
                handle,
            });
        }
        drop(events);

        info!(
            processes = actors.len(),
            time_unit = ?self.config.time_unit,
            "Simulation started"
        );
        RunningSimulation {
            state,
            clock,
            root,
            actors,
            collector,
        }
    }

    /// Runs to completion: `start().wait()`.
    pub async fn run(self) -> SimulationReport {
        self.start().wait().await
    }
}

struct ActorHandle {
    descriptor: ProcessDescriptor,
    cancel: CancellationToken,
    handle: JoinHandle<ActorOutcome>,
}

/// A simulation whose actors are running.
pub struct RunningSimulation {
    state: Arc<SharedResourceState>,
    clock: SimClock,
    root: CancellationToken,
    actors: Vec<ActorHandle>,
    collector: JoinHandle<Vec<ProcessEvent>>,
}

impl RunningSimulation {
    /// Interrupts one process. Other processes are unaffected.
    ///
    /// Returns `false` if no process has this id.
    pub fn cancel(&self, id: ProcessId) -> bool {
        match self.actors.iter().find(|a| a.descriptor.id == id) {
            Some(actor) => {
                info!(%id, "Cancelling process");
                actor.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Interrupts every process.
    pub fn cancel_all(&self) {
        info!("Cancelling all processes");
        self.root.cancel();
    }

    /// Token that cancels every process when fired; suitable for signal handlers.
    pub fn cancel_token(&self) -> CancellationToken {
        self.root.clone()
    }

    pub fn shared_state(&self) -> &Arc<SharedResourceState> {
        &self.state
    }

    /// Waits for every process to reach a terminal state and collects the report.
    ///
    /// A failed actor task is logged and recorded as [`ActorOutcome::Aborted`]; it never
    /// fails the run.
    pub async fn wait(self) -> SimulationReport {
        let mut outcomes = Vec::with_capacity(self.actors.len());
        for actor in self.actors {
            let outcome = match actor.handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(id = %actor.descriptor.id, error = %e, "Process task failed");
                    ActorOutcome::Aborted
                }
            };
            outcomes.push(ProcessOutcome {
                descriptor: actor.descriptor,
                outcome,
            });
        }
        let elapsed = self.clock.elapsed();

        let events = match self.collector.await {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "Event collector failed");
                Vec::new()
            }
        };

        let report = SimulationReport {
            outcomes,
            events,
            stats: self.state.stats(),
            elapsed,
            lock_free_at_end: self.state.is_resource_free(),
            readers_at_end: self.state.active_readers().await,
        };
        info!(
            finished = report.finished_count(),
            cancelled = report.cancelled_count(),
            elapsed = ?report.elapsed,
            "Simulation complete"
        );
        report
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub descriptor: ProcessDescriptor,
    pub outcome: ActorOutcome,
}

/// Everything observed during one run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// One entry per process, in launch order.
    pub outcomes: Vec<ProcessOutcome>,
    /// All events in happening order.
    pub events: Vec<ProcessEvent>,
    pub stats: EngineStats,
    /// Time from start until the last actor finished.
    pub elapsed: Duration,
    pub lock_free_at_end: bool,
    pub readers_at_end: usize,
}

impl SimulationReport {
    pub fn outcome(&self, id: ProcessId) -> Option<ActorOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.descriptor.id == id)
            .map(|o| o.outcome)
    }

    pub fn events_for(&self, id: ProcessId) -> impl Iterator<Item = &ProcessEvent> {
        self.events.iter().filter(move |e| e.id == id)
    }

    /// Position in the log of the first event matching `id` and `pred`.
    pub fn position(&self, id: ProcessId, pred: impl Fn(&ProcessEvent) -> bool) -> Option<usize> {
        self.events.iter().position(|e| e.id == id && pred(e))
    }

    pub fn timeline(&self) -> ServiceTimeline {
        ServiceTimeline::from_events(&self.events)
    }

    pub fn finished_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_finished()).count()
    }

    pub fn cancelled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_cancelled()).count()
    }

    /// No lock held, no reader counted and every acquisition matched by a release.
    pub fn is_clean(&self) -> bool {
        self.lock_free_at_end && self.readers_at_end == 0 && self.stats.is_balanced()
    }
}
