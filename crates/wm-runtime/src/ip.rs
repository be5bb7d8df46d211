//! Public IP lookup for the status report.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Address reported when the lookup fails.
pub const FALLBACK_IP: &str = "127.0.0.1";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum IpLookupError {
    #[error("IP lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IP lookup returned an empty address")]
    Empty,
}

#[derive(Deserialize)]
struct IpResponse {
    ip: String,
}

/// Query `url` for this machine's public address.
///
/// The service must answer with a JSON object carrying an `ip` field.
pub async fn fetch_public_ip(url: &str) -> Result<String, IpLookupError> {
    let client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;
    let body: IpResponse = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let ip = body.ip.trim();
    if ip.is_empty() {
        return Err(IpLookupError::Empty);
    }
    Ok(ip.to_string())
}

/// Like [`fetch_public_ip`] but never fails; errors yield [`FALLBACK_IP`].
pub async fn lookup_public_ip(url: &str) -> String {
    match fetch_public_ip(url).await {
        Ok(ip) => ip,
        Err(e) => {
            debug!(url, error = %e, "Public IP lookup failed, using fallback");
            FALLBACK_IP.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        // Port 9 (discard) on localhost is not an HTTP server
        let ip = lookup_public_ip("http://127.0.0.1:9/").await;
        assert_eq!(ip, FALLBACK_IP);
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        assert!(fetch_public_ip("not a url").await.is_err());
    }
}
