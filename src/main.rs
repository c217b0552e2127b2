//! Chat engine for a document Q&A widget
//!
//! Owns the conversation state for one session and exposes it to the widget
//! UI over HTTP and SSE. Answers come from a remote answering service that
//! has been given the document contents.

mod api;
mod client;
mod config;
mod runtime;
mod state_machine;
mod store;

use api::{create_router, AppState};
use client::HttpAnswerService;
use config::Config;
use runtime::ChatRuntime;
use std::net::SocketAddr;
use store::Conversation;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdoc=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(document = %config.document_name, "Starting chat engine");

    if config.backend.is_none() {
        tracing::warn!(
            "No answering backend configured; questions will fail until BACKEND is set"
        );
    }

    // One conversation per process, owned by the runtime task
    let conversation = Conversation::new(&config.document_name);
    let service = HttpAnswerService::new(config.backend.as_deref());
    let (chat_runtime, handle) = ChatRuntime::new(conversation, service);
    tokio::spawn(chat_runtime.run());

    let state = AppState::new(handle, config.document_name);

    // CORS for the embedding page during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
