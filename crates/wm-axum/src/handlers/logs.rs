//! Live log stream handler.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;

use crate::state::AppState;

/// SSE stream of relay output and status annotations.
///
/// Each event's `data` is one line. The subscriber is registered on connect
/// and released when the client goes away.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    state.logs.subscribe().into_sse()
}
