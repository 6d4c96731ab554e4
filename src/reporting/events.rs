use crate::reporting::render::EventRenderer;
use crate::model::ProcessEvent;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Cloneable handle actors use to publish events.
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::UnboundedSender<ProcessEvent>,
}

impl EventSender {
    /// Publishes an event. Never blocks; if the collector is gone the event is dropped.
    pub fn emit(&self, event: ProcessEvent) {
        if self.sender.send(event).is_err() {
            debug!("Event collector closed, event dropped");
        }
    }
}

/// Receiving half of the event channel.
///
/// Send order is preserved, so an event published while a process holds the resource
/// (including the `Released` event, which is published before the lock is handed on) is
/// always logged before any event published by a process admitted after it.
pub struct EventCollector {
    receiver: mpsc::UnboundedReceiver<ProcessEvent>,
}

impl EventCollector {
    pub fn new() -> (Self, EventSender) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { receiver }, EventSender { sender })
    }

    /// Renders and records events until every [`EventSender`] is dropped, then returns the
    /// log in happening order.
    pub async fn run(mut self, mut renderer: Box<dyn EventRenderer>) -> Vec<ProcessEvent> {
        info!("Event collector started");
        let mut log = Vec::new();
        while let Some(event) = self.receiver.recv().await {
            renderer.render(&event);
            log.push(event);
        }
        info!(events = log.len(), "Event collector shutdown");
        log
    }
}
