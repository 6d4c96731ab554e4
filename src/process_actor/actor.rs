use crate::clock::SimClock;
use crate::model::{EventKind, InterruptPoint, Phase, ProcessDescriptor, ProcessEvent};
use crate::process_actor::outcome::ActorOutcome;
use crate::reporting::EventSender;
use crate::sync::{SharedResourceState, SyncError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One simulated process.
///
/// # Phases
///
/// 1. **WaitingArrival** - sleep for `arrival` time units.
/// 2. **RequestingAccess** - enter through the engine with the role's protocol.
/// 3. **InService** - hold access for `burst` time units.
/// 4. **Releasing** - give access back. Runs even if service was interrupted.
/// 5. **Finished**.
///
/// A cancellation during 1 or 2 ends the actor in **Cancelled** without holding anything.
pub struct ProcessActor {
    descriptor: ProcessDescriptor,
    state: Arc<SharedResourceState>,
    events: EventSender,
    cancel: CancellationToken,
    clock: SimClock,
    phase: Phase,
}

impl ProcessActor {
    pub fn new(
        descriptor: ProcessDescriptor,
        state: Arc<SharedResourceState>,
        events: EventSender,
        cancel: CancellationToken,
        clock: SimClock,
    ) -> Self {
        Self {
            descriptor,
            state,
            events,
            cancel,
            clock,
            phase: Phase::WaitingArrival,
        }
    }

    /// Drives the process through its phases and reports how it ended.
    pub async fn run(mut self) -> ActorOutcome {
        debug!(
            arrival = self.descriptor.arrival,
            burst = self.descriptor.burst,
            "Process waiting to arrive"
        );

        if self.suspend(self.clock.units(self.descriptor.arrival)).await.is_err() {
            return self.cancelled(InterruptPoint::Arrival);
        }

        self.phase = Phase::RequestingAccess;
        self.emit(EventKind::Arrived);
        self.emit(EventKind::WaitingForLock);
        let access = match self.state.enter(self.descriptor.role, &self.cancel).await {
            Ok(access) => access,
            Err(SyncError::Cancelled) => return self.cancelled(InterruptPoint::Acquire),
            Err(e) => {
                warn!(error = %e, "Entry failed");
                return self.cancelled(InterruptPoint::Acquire);
            }
        };
        self.emit(EventKind::Acquired);

        self.phase = Phase::InService;
        self.emit(EventKind::InService {
            burst: self.descriptor.burst,
        });
        let service_interrupted = self
            .suspend(self.clock.units(self.descriptor.burst))
            .await
            .is_err();
        if service_interrupted {
            info!("Interrupted during service");
            self.emit(EventKind::Interrupted(InterruptPoint::Service));
        } else {
            self.emit(EventKind::ServiceDone);
        }

        self.phase = Phase::Releasing;
        // Logged before the lock is handed on, so it precedes the next holder's Acquired.
        access
            .release_with(|| self.emit(EventKind::Released))
            .await;

        self.phase = Phase::Finished;
        self.emit(EventKind::Finished);
        info!(service_interrupted, "Process finished");
        ActorOutcome::Finished {
            service_interrupted,
        }
    }

    /// Sleeps for `span` unless cancelled first. A zero span only checks the token.
    async fn suspend(&self, span: Duration) -> Result<(), SyncError> {
        if span.is_zero() {
            return if self.cancel.is_cancelled() {
                Err(SyncError::Cancelled)
            } else {
                Ok(())
            };
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SyncError::Cancelled),
            _ = tokio::time::sleep(span) => Ok(()),
        }
    }

    fn cancelled(&mut self, during: InterruptPoint) -> ActorOutcome {
        self.phase = Phase::Cancelled;
        self.emit(EventKind::Interrupted(during));
        info!(%during, "Process cancelled");
        ActorOutcome::Cancelled { during }
    }

    fn emit(&self, kind: EventKind) {
        self.events.emit(ProcessEvent {
            id: self.descriptor.id,
            role: self.descriptor.role,
            phase: self.phase,
            kind,
            at: self.clock.elapsed(),
        });
    }
}
