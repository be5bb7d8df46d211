//! HTTP client for the transfer relay.
//!
//! The relay answers every `/wormhole` request with `{ "ok": ... }` and an
//! `error` message on failure, whatever the status code, so replies are
//! decoded without `error_for_status`.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum RelayClientError {
    /// The relay could not be reached or answered garbage.
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered `ok: false`.
    #[error("relay refused: {0}")]
    Refused(String),
}

/// Decoded relay reply; fields not relevant to the endpoint stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayReply {
    pub ok: bool,
    pub code: Option<String>,
    pub error: Option<String>,
    pub exit_code: Option<i32>,
    pub confirmed: Option<bool>,
    pub saved_path: Option<String>,
}

impl RelayReply {
    fn into_result(self) -> Result<Self, RelayClientError> {
        if self.ok {
            Ok(self)
        } else {
            Err(RelayClientError::Refused(
                self.error.unwrap_or_else(|| "unspecified error".to_string()),
            ))
        }
    }
}

/// Client for one relay server.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http: Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RelayClientError> {
        let http = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<RelayReply, RelayClientError> {
        let reply: RelayReply = self
            .http
            .post(self.url(path))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        reply.into_result()
    }

    /// Ask the relay to offer `filename`; returns the tool's transfer code.
    pub async fn send(&self, filename: &str) -> Result<String, RelayClientError> {
        let reply = self
            .post("/wormhole/send", json!({ "filename": filename }))
            .await?;
        reply
            .code
            .ok_or_else(|| RelayClientError::Refused("relay returned no code".to_string()))
    }

    /// Ask the relay to receive `code`; resolves once the tool has exited.
    pub async fn receive(&self, code: &str) -> Result<RelayReply, RelayClientError> {
        self.post("/wormhole/receive", json!({ "code": code })).await
    }

    /// Open the live log stream.
    pub async fn open_logs(&self) -> Result<reqwest::Response, RelayClientError> {
        Ok(self
            .http
            .get(self.url("/wormhole/logs"))
            .send()
            .await?
            .error_for_status()?)
    }

    /// Whether the relay answers its health check.
    pub async fn is_healthy(&self) -> bool {
        self.http
            .get(self.url("/health"))
            .timeout(CONNECT_TIMEOUT)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}
