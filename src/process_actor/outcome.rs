use crate::model::InterruptPoint;

/// Terminal state reached by a process actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorOutcome {
    /// Ran to completion. `service_interrupted` is set when the service interval was cut
    /// short; access was still released.
    Finished { service_interrupted: bool },
    /// Interrupted before admission. Nothing was acquired.
    Cancelled { during: InterruptPoint },
    /// The actor task panicked or was aborted.
    Aborted,
}

impl ActorOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, ActorOutcome::Finished { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ActorOutcome::Cancelled { .. })
    }
}
