//! Chat runtime executor

use super::ChatHandle;
use crate::client::AnswerService;
use crate::state_machine::{transition, Effect, Event};
use crate::store::Conversation;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Capacity of the event queue feeding the runtime task
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Runtime that owns the conversation state for one session
///
/// All mutation happens here, one event at a time. Handlers send events in
/// through the handle; every new state is published on the watch channel; the
/// one network effect runs as a background task that reports its outcome back
/// through the same event queue.
pub struct ChatRuntime<S: AnswerService + 'static> {
    conversation: Conversation,
    service: Arc<S>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    state_tx: watch::Sender<Conversation>,
}

impl<S: AnswerService + 'static> ChatRuntime<S> {
    /// Create a runtime and the handle used to talk to it
    pub fn new(conversation: Conversation, service: S) -> (Self, ChatHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(conversation.clone());

        let runtime = Self {
            conversation,
            service: Arc::new(service),
            event_rx,
            event_tx: event_tx.clone(),
            state_tx,
        };

        (runtime, ChatHandle { event_tx, state_rx })
    }

    pub async fn run(mut self) {
        tracing::info!("Starting chat runtime");

        // Process events in a loop - no recursion
        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.process_event(event);
                }
                else => break,
            }
        }

        tracing::info!("Chat runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        tracing::debug!(event = ?event, "Processing event");

        let result = transition(&self.conversation, event);

        // Silent no-ops produce an identical state; skip the publish so
        // subscribers only wake for real changes
        if result.conversation != self.conversation {
            self.conversation = result.conversation;
            let _ = self.state_tx.send(self.conversation.clone());
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::FetchAnswer {
                question_id,
                question,
            } => {
                let service = Arc::clone(&self.service);
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    let event = match service.ask(&question).await {
                        Ok(text) => Event::AnswerReceived { question_id, text },
                        Err(e) => {
                            tracing::error!(
                                question_id = %question_id,
                                error = %e,
                                "Answer request failed"
                            );
                            Event::AnswerFailed { question_id }
                        }
                    };
                    let _ = event_tx.send(event).await;
                });
            }
        }
    }
}
