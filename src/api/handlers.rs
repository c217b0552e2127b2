//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ActionResponse, AnswerResponse, ConversationResponse, DraftRequest, ErrorResponse,
    ModalOpenRequest,
};
use super::AppState;
use crate::state_machine::Event;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation snapshot
        .route("/api/conversation", get(get_conversation))
        // SSE streaming
        .route("/api/conversation/stream", get(stream_conversation))
        // User actions
        .route("/api/draft", post(update_draft))
        .route("/api/send", post(send_question))
        // Revisit modal
        .route("/api/modal/open", post(open_modal))
        .route("/api/modal/close", post(close_modal))
        .route("/api/questions/:id/answer", get(get_answer))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation Access
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<ConversationResponse> {
    Json(ConversationResponse {
        document_name: state.document_name.clone(),
        conversation: state.chat.conversation(),
    })
}

async fn stream_conversation(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.chat.subscribe())
}

/// Answer lookup for the revisit modal. Unknown or unanswered questions get
/// the placeholder text rather than an error.
async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<AnswerResponse> {
    let conversation = state.chat.conversation();
    Json(AnswerResponse {
        answer: conversation.find_answer_for(&id).to_string(),
    })
}

// ============================================================
// User Actions
// ============================================================

async fn update_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    state
        .chat
        .send(Event::DraftChanged { text: req.text })
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(ActionResponse { queued: true }))
}

/// Queue a submit. Blank drafts are accepted here and dropped by the state
/// machine, so this reports queued either way.
async fn send_question(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    state
        .chat
        .send(Event::Submitted)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(ActionResponse { queued: true }))
}

async fn open_modal(
    State(state): State<AppState>,
    Json(req): Json<ModalOpenRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    state
        .chat
        .send(Event::ModalOpened {
            question_id: req.question_id,
        })
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(ActionResponse { queued: true }))
}

async fn close_modal(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    state
        .chat
        .send(Event::ModalClosed)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(ActionResponse { queued: true }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("askdoc ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
