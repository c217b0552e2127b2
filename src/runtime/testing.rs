//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::{ChatHandle, ChatRuntime};
use crate::client::{AnswerError, AnswerService};
use crate::state_machine::Event;
use crate::store::Conversation;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Answer Service
// ============================================================================

/// Mock answering service that returns queued results
pub struct MockAnswerService {
    results: Mutex<VecDeque<Result<String, AnswerError>>>,
    /// Record of all questions asked
    pub questions: Mutex<Vec<String>>,
}

impl MockAnswerService {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful answer
    pub fn queue_answer(&self, text: impl Into<String>) {
        self.results.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: AnswerError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded questions
    pub fn recorded_questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerService for MockAnswerService {
    async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnswerError::Request("no mock answer queued".to_string())))
    }
}

// ============================================================================
// Gated Mock Answer Service (for in-flight testing)
// ============================================================================

/// Mock answering service that holds each request until released, so tests
/// can observe in-flight state deterministically
pub struct GatedMockAnswerService {
    inner: MockAnswerService,
    /// Notified when a request has started
    pub request_started: Arc<Notify>,
    /// Signalled by the test to let the request complete
    pub release: Arc<Notify>,
}

impl GatedMockAnswerService {
    pub fn new() -> Self {
        Self {
            inner: MockAnswerService::new(),
            request_started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    pub fn queue_answer(&self, text: impl Into<String>) {
        self.inner.queue_answer(text);
    }
}

#[async_trait]
impl AnswerService for GatedMockAnswerService {
    async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.ask(question).await
    }
}

// ============================================================================
// Test Chat Harness
// ============================================================================

/// Drives a runtime in tests with minimal boilerplate
pub struct TestChat {
    pub handle: ChatHandle,
}

impl TestChat {
    /// Spawn a runtime over the given service with a fresh conversation
    pub fn spawn<S: AnswerService + 'static>(service: S) -> Self {
        let conversation = Conversation::new("the test document");
        let (runtime, handle) = ChatRuntime::new(conversation, service);
        tokio::spawn(runtime.run());
        Self { handle }
    }

    /// Type into the draft and submit it
    pub async fn submit(&self, text: &str) {
        self.handle
            .send(Event::DraftChanged {
                text: text.to_string(),
            })
            .await
            .expect("send draft");
        self.handle.send(Event::Submitted).await.expect("send submit");
    }

    /// Wait until the published conversation satisfies the predicate
    pub async fn wait_for(&self, predicate: impl FnMut(&Conversation) -> bool) -> Conversation {
        let mut rx = self.handle.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate))
            .await
            .expect("timed out waiting for conversation state")
            .expect("runtime dropped the state channel");
        snapshot.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpAnswerService;
    use crate::state_machine::ANSWER_FAILED_TEXT;
    use crate::store::{Role, NO_ANSWER_TEXT};

    #[tokio::test]
    async fn mock_returns_queued_results_in_order() {
        let mock = MockAnswerService::new();
        mock.queue_answer("first");
        mock.queue_error(AnswerError::Request("boom".to_string()));

        assert_eq!(mock.ask("one").await.unwrap(), "first");
        assert!(mock.ask("two").await.is_err());
        // An exhausted queue also fails
        assert!(mock.ask("three").await.is_err());
        assert_eq!(mock.recorded_questions(), ["one", "two", "three"]);
    }

    /// Full happy path: question in, linked answer out
    #[tokio::test]
    async fn submitted_question_gets_a_linked_answer() {
        let service = Arc::new(MockAnswerService::new());
        service.queue_answer("12 months");

        let chat = TestChat::spawn(Arc::clone(&service));
        chat.submit("What is the warranty period?").await;

        let done = chat
            .wait_for(|c| !c.is_loading && c.messages.len() == 3)
            .await;

        assert_eq!(done.questions.len(), 1);
        let question = &done.questions[0];
        assert_eq!(question.question, "What is the warranty period?");

        let user = &done.messages[1];
        assert_eq!(user.role, Role::User);
        assert_eq!(user.question_id.as_deref(), Some(question.id.as_str()));

        let answer = &done.messages[2];
        assert_eq!(answer.role, Role::Assistant);
        assert_eq!(answer.text, "12 months");
        assert_eq!(answer.question_id.as_deref(), Some(question.id.as_str()));

        assert!(done.draft.is_empty());
        assert_eq!(service.recorded_questions(), ["What is the warranty period?"]);
    }

    /// Blank input is dropped before it reaches the service
    #[tokio::test]
    async fn blank_submit_reaches_neither_store_nor_service() {
        let service = Arc::new(MockAnswerService::new());
        let chat = TestChat::spawn(Arc::clone(&service));
        chat.submit("   ").await;

        // A draft marker proves the submit was already processed
        chat.handle
            .send(Event::DraftChanged {
                text: "marker".to_string(),
            })
            .await
            .unwrap();
        let settled = chat.wait_for(|c| c.draft == "marker").await;

        assert_eq!(settled.messages.len(), 1);
        assert!(settled.questions.is_empty());
        assert!(!settled.is_loading);
        assert!(service.recorded_questions().is_empty());
    }

    /// Failure path: the apology message lands, linked to the question
    #[tokio::test]
    async fn failed_answer_appends_error_message() {
        let service = MockAnswerService::new();
        service.queue_error(AnswerError::Request(
            "HTTP 500 Internal Server Error: upstream".to_string(),
        ));

        let chat = TestChat::spawn(service);
        chat.submit("Does it blend?").await;

        let done = chat
            .wait_for(|c| !c.is_loading && c.messages.len() == 3)
            .await;

        let question_id = done.questions[0].id.clone();
        let answer = done.messages.last().unwrap();
        assert_eq!(answer.role, Role::Assistant);
        assert_eq!(answer.text, ANSWER_FAILED_TEXT);
        assert_eq!(answer.question_id.as_deref(), Some(question_id.as_str()));
        assert_eq!(done.find_answer_for(&question_id), ANSWER_FAILED_TEXT);
    }

    /// A missing backend behaves like any other failed request
    #[tokio::test]
    async fn unconfigured_backend_fails_gracefully() {
        let chat = TestChat::spawn(HttpAnswerService::new(None));
        chat.submit("anything").await;

        let done = chat
            .wait_for(|c| !c.is_loading && c.messages.len() == 3)
            .await;
        assert_eq!(done.messages[2].text, ANSWER_FAILED_TEXT);
    }

    /// Opening the modal for an id that was never asked is ignored
    #[tokio::test]
    async fn modal_open_with_unknown_id_is_ignored() {
        let chat = TestChat::spawn(MockAnswerService::new());
        chat.handle
            .send(Event::ModalOpened {
                question_id: "never-asked".to_string(),
            })
            .await
            .unwrap();
        chat.handle
            .send(Event::DraftChanged {
                text: "marker".to_string(),
            })
            .await
            .unwrap();

        let settled = chat.wait_for(|c| c.draft == "marker").await;
        assert!(!settled.is_modal_open);
        assert!(settled.selected_question.is_none());
    }

    /// A lookup while the request is in flight finds the question with the
    /// placeholder answer; the real answer lands after release
    #[tokio::test]
    async fn modal_lookup_during_inflight_request() {
        let service = GatedMockAnswerService::new();
        service.queue_answer("It blends");
        let request_started = Arc::clone(&service.request_started);
        let release = Arc::clone(&service.release);

        let chat = TestChat::spawn(service);
        chat.submit("Does it blend?").await;
        tokio::time::timeout(Duration::from_secs(2), request_started.notified())
            .await
            .expect("request never started");

        // The submission is already visible while the request is outstanding
        let inflight = chat.wait_for(|c| c.is_loading).await;
        let question_id = inflight.questions[0].id.clone();
        assert_eq!(inflight.find_answer_for(&question_id), NO_ANSWER_TEXT);

        chat.handle
            .send(Event::ModalOpened {
                question_id: question_id.clone(),
            })
            .await
            .unwrap();
        let opened = chat.wait_for(|c| c.is_modal_open).await;
        assert!(opened.is_loading);
        assert_eq!(
            opened.selected_question.as_ref().map(|q| q.id.as_str()),
            Some(question_id.as_str())
        );

        release.notify_one();
        let done = chat.wait_for(|c| !c.is_loading).await;
        assert_eq!(done.find_answer_for(&question_id), "It blends");
    }

    /// Close clears the selection together with the flag
    #[tokio::test]
    async fn modal_close_clears_selection() {
        let service = MockAnswerService::new();
        service.queue_answer("Sure, within 30 days");

        let chat = TestChat::spawn(service);
        chat.submit("Can I return it?").await;
        let done = chat
            .wait_for(|c| !c.is_loading && c.messages.len() == 3)
            .await;
        let question_id = done.questions[0].id.clone();

        chat.handle
            .send(Event::ModalOpened { question_id })
            .await
            .unwrap();
        chat.wait_for(|c| c.is_modal_open).await;

        chat.handle.send(Event::ModalClosed).await.unwrap();
        let closed = chat.wait_for(|c| !c.is_modal_open).await;
        assert!(closed.selected_question.is_none());
    }

    /// Consecutive questions keep their own answers in submission order
    #[tokio::test]
    async fn sequential_questions_stay_linked() {
        let service = Arc::new(MockAnswerService::new());
        service.queue_answer("12 months");
        service.queue_answer("Yes, worldwide");

        let chat = TestChat::spawn(Arc::clone(&service));
        chat.submit("What is the warranty period?").await;
        chat.wait_for(|c| !c.is_loading && c.messages.len() == 3)
            .await;
        chat.submit("Is the warranty international?").await;
        let done = chat
            .wait_for(|c| !c.is_loading && c.messages.len() == 5)
            .await;

        assert_eq!(done.questions.len(), 2);
        assert_eq!(done.find_answer_for(&done.questions[0].id), "12 months");
        assert_eq!(done.find_answer_for(&done.questions[1].id), "Yes, worldwide");
        assert_eq!(
            service.recorded_questions(),
            ["What is the warranty period?", "Is the warranty international?"]
        );
    }
}
