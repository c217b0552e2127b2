//! Runtime that owns the conversation and executes effects

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;

use crate::state_machine::Event;
use crate::store::Conversation;
use tokio::sync::{mpsc, watch};

/// Handle to interact with a running chat
#[derive(Clone)]
pub struct ChatHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub state_rx: watch::Receiver<Conversation>,
}

impl ChatHandle {
    /// Send an event to the runtime task
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Snapshot of the current conversation
    pub fn conversation(&self) -> Conversation {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to conversation updates. The receiver starts at the current
    /// value, so subscribers never miss the state they joined on.
    pub fn subscribe(&self) -> watch::Receiver<Conversation> {
        self.state_rx.clone()
    }
}
