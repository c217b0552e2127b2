//! Pure state transition function

use super::{Effect, Event};
use crate::store::{Conversation, Role};

/// Appended in place of an answer when the request fails
pub const ANSWER_FAILED_TEXT: &str =
    "Sorry, something went wrong while answering your question. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub conversation: Conversation,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same inputs this always produces the same outputs, with no I/O
/// side effects. There are no rejected transitions: inputs that cannot apply
/// (a blank submit, an unknown question id) return the state unchanged.
pub fn transition(conversation: &Conversation, event: Event) -> TransitionResult {
    let mut next = conversation.clone();

    match event {
        // ============================================================
        // Input Handling
        // ============================================================
        Event::DraftChanged { text } => {
            next.set_draft(text);
            TransitionResult::new(next)
        }

        // Validation and submission happen in one step. Blank input is a
        // silent no-op; anything else records the question and its paired
        // user message before the request effect is issued, so lookups that
        // race the network already see the submission.
        Event::Submitted => {
            let text = next.draft.trim().to_string();
            if text.is_empty() {
                return TransitionResult::new(next);
            }

            let question_id = next.append_question(text.clone());
            next.append_message(Role::User, text.clone(), Some(question_id.clone()));
            next.clear_draft();
            next.set_loading(true);

            TransitionResult::new(next).with_effect(Effect::FetchAnswer {
                question_id,
                question: text,
            })
        }

        // ============================================================
        // Answer Outcomes
        // ============================================================
        Event::AnswerReceived { question_id, text } => {
            next.append_message(Role::Assistant, text, Some(question_id));
            next.set_loading(false);
            TransitionResult::new(next)
        }

        // The failure is terminal for this request. The apology is linked to
        // the question so a later lookup still resolves to readable text.
        Event::AnswerFailed { question_id } => {
            next.append_message(Role::Assistant, ANSWER_FAILED_TEXT, Some(question_id));
            next.set_loading(false);
            TransitionResult::new(next)
        }

        // ============================================================
        // Revisit Modal
        // ============================================================
        Event::ModalOpened { question_id } => {
            next.open_modal(&question_id);
            TransitionResult::new(next)
        }

        Event::ModalClosed => {
            next.close_modal();
            TransitionResult::new(next)
        }
    }
}
