//! Conversation state for one widget session
//!
//! The store is plain data plus the operations that mutate it. Message and
//! question histories are append-only; nothing here performs I/O.

use serde::{Deserialize, Serialize};

/// Placeholder returned by answer lookups when no answer has arrived
pub const NO_ANSWER_TEXT: &str = "No response available.";

// ============================================================================
// Types
// ============================================================================

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Question this entry belongs to. The seeded greeting has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
}

/// A question the user has asked, kept so it can be revisited later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
}

/// Everything the widget UI renders for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub questions: Vec<Question>,
    /// Text currently in the input box
    pub draft: String,
    /// True while an answer request is outstanding
    pub is_loading: bool,
    /// Question shown in the revisit modal, if any
    pub selected_question: Option<Question>,
    pub is_modal_open: bool,
}

// ============================================================================
// Operations
// ============================================================================

impl Conversation {
    /// Create session state seeded with the assistant greeting
    pub fn new(document_name: &str) -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            questions: Vec::new(),
            draft: String::new(),
            is_loading: false,
            selected_question: None,
            is_modal_open: false,
        };
        conversation.append_message(Role::Assistant, greeting(document_name), None);
        conversation
    }

    /// Append a transcript entry with a fresh id
    pub fn append_message(
        &mut self,
        role: Role,
        text: impl Into<String>,
        question_id: Option<String>,
    ) {
        self.messages.push(Message {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            question_id,
        });
    }

    /// Record an asked question and return its id
    pub fn append_question(&mut self, text: impl Into<String>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.questions.push(Question {
            id: id.clone(),
            question: text.into(),
        });
        id
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Look up a recorded question by id
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Answer text for a question, or the placeholder when none has arrived.
    /// Matches the first assistant message linked to the question; the paired
    /// user message carries the same id and must not shadow the answer.
    pub fn find_answer_for(&self, question_id: &str) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == Role::Assistant && m.question_id.as_deref() == Some(question_id))
            .map_or(NO_ANSWER_TEXT, |m| m.text.as_str())
    }

    /// Select a question for the revisit modal. Unknown ids leave the state
    /// untouched.
    pub fn open_modal(&mut self, question_id: &str) {
        if let Some(question) = self.question(question_id).cloned() {
            self.selected_question = Some(question);
            self.is_modal_open = true;
        }
    }

    /// Clear the selection and the open flag together
    pub fn close_modal(&mut self) {
        self.selected_question = None;
        self.is_modal_open = false;
    }
}

/// Opening message shown before any question is asked
fn greeting(document_name: &str) -> String {
    format!(
        "Hello! I am an AI language model that has been given information about {document_name}. \
         If you ask me a question, I will do my best to answer based on only the information in \
         the document, while citing the pages I am referencing for my answer. Please remember \
         that I am not perfect and I might make mistakes. Use me as a reference but check my \
         sources in the document by downloading it yourself using the top menu link. What's on \
         your mind?"
    )
}

// ============================================================================
// Tests
// ============================================================================
