//! HTTP API for the widget UI

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::ChatHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatHandle,
    pub document_name: String,
}

impl AppState {
    pub fn new(chat: ChatHandle, document_name: impl Into<String>) -> Self {
        Self {
            chat,
            document_name: document_name.into(),
        }
    }
}
