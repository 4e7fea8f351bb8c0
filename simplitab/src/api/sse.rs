//! Server-Sent Events (SSE) for view updates

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /events - SSE event stream
///
/// Streams:
/// - ConnectionStatus (once, on connect)
/// - ViewChanged (any view-state change; the page re-fetches the results fragment)
/// - SubmissionStarted / SubmissionFinished / SubmissionDiscarded
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    simplitab_common::sse::create_event_sse_stream(&state.event_bus, "simplitab")
}
