//! Server-sent timer events for the display page

use std::{convert::Infallible, sync::Arc, time::Duration};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{
    wrappers::{BroadcastStream, WatchStream},
    Stream, StreamExt,
};
use tracing::{debug, warn};

use crate::state::AppState;

/// Handle GET /api/timer/events - Stream `timer` views and `completed` signals
pub async fn timer_events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Display connected to timer events");

    // Starts with the current view
    let views = WatchStream::new(state.subscribe_views())
        .map(|view| Event::default().event("timer").json_data(&view));

    let completions = BroadcastStream::new(state.subscribe_events())
        .filter_map(|received| match received {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Timer event stream lagged: {}", e);
                None
            }
        })
        .map(|event| Event::default().event("completed").json_data(&event));

    let stream = views.merge(completions).filter_map(|event| match event {
        Ok(event) => Some(Ok(event)),
        Err(e) => {
            warn!("Failed to encode timer event: {}", e);
            None
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
