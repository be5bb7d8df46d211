//! Logs command handler.
//!
//! Follows the relay's event stream and prints each event as
//! `[HH:MM:SS] <line>`. A relay that cannot be reached prints nothing.

use anyhow::Result;
use chrono::Local;
use futures_util::StreamExt;
use tracing::debug;
use wm_runtime::LineScanner;

use crate::bootstrap::CliContext;

/// Payload of an SSE `data:` field line; comments and other fields yield `None`.
pub fn sse_data(line: &str) -> Option<&str> {
    let value = line.strip_prefix("data:")?;
    Some(value.strip_prefix(' ').unwrap_or(value))
}

pub fn format_event(line: &str) -> String {
    format!("[{}] {line}", Local::now().format("%H:%M:%S"))
}

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let response = match ctx.relay.open_logs().await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "Log stream unavailable");
            return Ok(());
        }
    };

    let mut scanner = LineScanner::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                debug!(error = %e, "Log stream interrupted");
                break;
            }
        };
        for line in scanner.feed(&chunk).lines {
            if let Some(data) = sse_data(&line) {
                println!("{}", format_event(data));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_data() {
        assert_eq!(sse_data("data: sending a.bin"), Some("sending a.bin"));
        assert_eq!(sse_data("data:x"), Some("x"));
        assert_eq!(sse_data("data:  two"), Some(" two"));
        assert_eq!(sse_data(":ping"), None);
        assert_eq!(sse_data(""), None);
        assert_eq!(sse_data("event: message"), None);
    }

    #[test]
    fn test_format_event() {
        let line = format_event("code captured: 7-crypto-delta");
        assert!(line.starts_with('['));
        assert_eq!(&line[9..], "] code captured: 7-crypto-delta");
    }
}
