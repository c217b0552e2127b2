//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to update the draft input
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

/// Request to open the revisit modal for a question
#[derive(Debug, Deserialize)]
pub struct ModalOpenRequest {
    pub question_id: String,
}

/// Response for queued actions
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub queued: bool,
}

/// Response with the conversation snapshot and widget configuration
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub document_name: String,
    pub conversation: crate::store::Conversation,
}

/// Response for an answer lookup
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
