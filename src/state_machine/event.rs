//! Events that drive the chat state machine

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    DraftChanged { text: String },
    Submitted,
    ModalOpened { question_id: String },
    ModalClosed,

    // Answer request outcomes, reported by the background request task
    AnswerReceived { question_id: String, text: String },
    AnswerFailed { question_id: String },
}
