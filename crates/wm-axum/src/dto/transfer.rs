//! Request and response bodies of the `/wormhole` endpoints.

use serde::{Deserialize, Serialize};
use wm_core::{ReceiveOutcome, SendOutcome};

/// Body of `POST /wormhole/send`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SendRequest {
    #[serde(default)]
    pub filename: Option<String>,
}

/// Body of `POST /wormhole/receive`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReceiveRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Successful send: the code the receiver must enter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub ok: bool,
    pub code: String,
}

impl From<SendOutcome> for SendResponse {
    fn from(outcome: SendOutcome) -> Self {
        Self {
            ok: true,
            code: outcome.code,
        }
    }
}

/// Finished receive.
///
/// `ok` is true regardless of the exit code unless the relay runs with the
/// `fail` exit policy; the remaining fields are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveResponse {
    pub ok: bool,
    pub exit_code: Option<i32>,
    pub confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<String>,
}

impl From<ReceiveOutcome> for ReceiveResponse {
    fn from(outcome: ReceiveOutcome) -> Self {
        Self {
            ok: true,
            exit_code: outcome.exit_code,
            confirmed: outcome.confirmed,
            saved_path: outcome.saved_path,
        }
    }
}
