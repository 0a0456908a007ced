use tokio::sync::mpsc;
use tracing::debug;

use crate::types::DraftEvent;

/// Receives store notifications. Implementations must not block.
pub trait DraftObserver: Send + Sync {
    fn notify(&self, event: DraftEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl DraftObserver for NullObserver {
    fn notify(&self, _event: DraftEvent) {}
}

impl DraftObserver for mpsc::UnboundedSender<DraftEvent> {
    fn notify(&self, event: DraftEvent) {
        let kind = event.as_str();
        if self.send(event).is_err() {
            debug!(kind, "observer channel closed, event dropped");
        }
    }
}
