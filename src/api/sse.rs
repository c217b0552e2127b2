//! Server-Sent Events support

use crate::store::Conversation;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Convert the conversation watch channel to an SSE stream
///
/// The watch stream yields the current value first, so a connecting client
/// renders immediately without a separate init round trip.
pub fn sse_stream(
    state_rx: tokio::sync::watch::Receiver<Conversation>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let snapshots =
        WatchStream::new(state_rx).map(|conversation| Ok(snapshot_to_axum(&conversation)));

    Sse::new(snapshots).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn snapshot_to_axum(conversation: &Conversation) -> Event {
    let data = serde_json::to_string(conversation).unwrap_or_else(|_| "{}".to_string());
    Event::default().event("conversation").data(data)
}
