//! Axum-specific error types and mappings.
//!
//! Every relay failure is reported with the same body shape,
//! `{ "ok": false, "error": "<message>" }`, so clients only ever inspect
//! `ok`. Problems with the request itself keep status 200; failures of the
//! tool or the server use 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use wm_core::TransferError;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request was understood but cannot be served (missing or unknown input).
    #[error("{0}")]
    Rejected(String),

    /// The transfer tool misbehaved (exited early or unsuccessfully).
    #[error("{0}")]
    BadGateway(String),

    /// The transfer tool could not be started.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The transfer tool did not finish in time.
    #[error("{0}")]
    Timeout(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(_) => StatusCode::OK,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON failure body.
#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Relay request failed");
        }

        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<TransferError> for HttpError {
    fn from(err: TransferError) -> Self {
        let message = err.to_string();
        match err {
            TransferError::MissingFilename
            | TransferError::MissingCode
            | TransferError::InvalidFilename(_)
            | TransferError::FileNotFound(_) => Self::Rejected(message),
            TransferError::SpawnFailed { .. } => Self::ServiceUnavailable(message),
            TransferError::ExitedWithoutCode { .. } | TransferError::NonZeroExit { .. } => {
                Self::BadGateway(message)
            }
            TransferError::Timeout { .. } => Self::Timeout(message),
            TransferError::Io(_) => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_status_ok() {
        let err = HttpError::from(TransferError::FileNotFound("a.bin".to_string()));
        assert_eq!(err.status(), StatusCode::OK);
        assert_eq!(err.to_string(), "file not found: a.bin");
    }

    #[test]
    fn test_tool_failures_are_server_errors() {
        let spawn = HttpError::from(TransferError::SpawnFailed {
            tool: "wormhole".to_string(),
            reason: "No such file or directory".to_string(),
        });
        assert_eq!(spawn.status(), StatusCode::SERVICE_UNAVAILABLE);

        let timeout = HttpError::from(TransferError::Timeout {
            mode: wm_core::TransferMode::Receive,
            secs: 5,
        });
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
