//! Client for the remote answering service
//!
//! The service exposes a single endpoint, `POST {origin}/api/query`, that
//! takes a question and returns an answer about the configured document.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Interface to the service that answers document questions
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Fetch the answer for one question. One attempt, no retries.
    async fn ask(&self, question: &str) -> Result<String, AnswerError>;
}

#[async_trait]
impl<T: AnswerService + ?Sized> AnswerService for Arc<T> {
    async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        (**self).ask(question).await
    }
}

/// Errors from the answering service
#[derive(Debug, Error)]
pub enum AnswerError {
    /// No backend origin was configured at startup
    #[error("no answering backend configured")]
    Configuration,
    /// The request could not be sent or came back non-2xx
    #[error("request failed: {0}")]
    Request(String),
    /// The response body was not the expected shape
    #[error("malformed response: {0}")]
    ResponseFormat(String),
}

// ============================================================================
// HTTP Implementation
// ============================================================================

/// HTTP client for the answering service
pub struct HttpAnswerService {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpAnswerService {
    /// Build a client for the given backend origin. A missing origin is
    /// allowed here and surfaces as `AnswerError::Configuration` on first use.
    pub fn new(backend: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: backend.map(query_endpoint),
        }
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        let endpoint = self.endpoint.as_ref().ok_or(AnswerError::Configuration)?;

        tracing::debug!(endpoint = %endpoint, "Sending answer request");
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(endpoint)
            .json(&QueryRequest { query: question })
            .send()
            .await
            .map_err(|e| AnswerError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnswerError::Request(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(AnswerError::Request(format!("HTTP {status}: {body}")));
        }

        let answer = parse_answer(&body)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            "Answer request completed"
        );

        Ok(answer)
    }
}

/// Full endpoint URL for a backend origin
fn query_endpoint(origin: &str) -> String {
    format!("{}/api/query", origin.trim_end_matches('/'))
}

/// Extract the answer from a response body and convert newlines to the break
/// markup the widget renders
fn parse_answer(body: &str) -> Result<String, AnswerError> {
    let payload: QueryResponse =
        serde_json::from_str(body).map_err(|e| AnswerError::ResponseFormat(e.to_string()))?;
    Ok(payload.response.replace('\n', "<br>"))
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    response: String,
}

// ============================================================================
// Tests
// ============================================================================
