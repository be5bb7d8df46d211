//! Transfer handlers - send and receive through the wormhole tool.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::debug;

use crate::dto::{ReceiveRequest, ReceiveResponse, SendRequest, SendResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// Read a JSON body, treating anything unparsable as an empty request.
///
/// A malformed body then fails with the same "missing" message as a body
/// without the field.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(error = %rejection, "Ignoring unreadable request body");
            T::default()
        }
    }
}

/// Offer a file from the files directory.
pub async fn send(
    State(state): State<AppState>,
    body: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, HttpError> {
    let req = body_or_default(body);
    let outcome = state.relay.send(req.filename.as_deref()).await?;
    Ok(Json(outcome.into()))
}

/// Receive a transfer by code; responds once the tool has exited.
pub async fn receive(
    State(state): State<AppState>,
    body: Result<Json<ReceiveRequest>, JsonRejection>,
) -> Result<Json<ReceiveResponse>, HttpError> {
    let req = body_or_default(body);
    let outcome = state.relay.receive(req.code.as_deref()).await?;
    Ok(Json(outcome.into()))
}
