//! Log fan-out to connected SSE clients.
//!
//! The relay publishes every line of tool output through the
//! [`TransferLogSink`] port; [`LogBroadcaster`] is the HTTP-side
//! implementation that delivers those lines to whoever is subscribed to
//! `/wormhole/logs` at that moment. There is no backlog: late subscribers
//! only see lines published after they connected.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::Stream;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use wm_core::TransferLogSink;

/// Interval between keep-alive comments on idle streams.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Fan-out of published log lines to live subscribers.
#[derive(Debug)]
pub struct LogBroadcaster {
    sender: broadcast::Sender<String>,
    /// Flipped once on server shutdown so open SSE streams end.
    closed: watch::Sender<bool>,
}

impl LogBroadcaster {
    /// Create a broadcaster buffering up to `capacity` lines per subscriber.
    ///
    /// Subscribers that fall further behind skip the missed lines.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        let (closed, _) = watch::channel(false);
        Self { sender, closed }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Register a subscriber. Dropping the returned handle unregisters it.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            closed: self.closed.subscribe(),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Deliver `line` to every live subscriber with line breaks removed.
    ///
    /// Returns how many subscribers it was queued for.
    pub fn broadcast(&self, line: &str) -> usize {
        let flat: String = line.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        // No subscribers is fine
        self.sender.send(flat).unwrap_or(0)
    }

    /// End every open SSE stream.
    ///
    /// Graceful shutdown waits for in-flight responses, and an event stream
    /// never finishes on its own.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TransferLogSink for LogBroadcaster {
    fn publish(&self, line: &str) {
        self.broadcast(line);
    }
}

/// One registered log subscriber.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<String>,
    closed: watch::Receiver<bool>,
}

impl Subscription {
    /// Next published line, or `None` once the broadcaster is gone.
    pub async fn recv(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(line) => return Some(line),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Log subscriber lagged, skipping lines");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Turn the subscription into an SSE response, one event per line.
    ///
    /// The subscription is released when the client disconnects and axum
    /// drops the stream, or when the broadcaster is closed.
    pub fn into_sse(self) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let mut closed = self.closed;
        let shutdown = async move {
            let _ = closed.wait_for(|closed| *closed).await;
        };

        let events = BroadcastStream::new(self.receiver).filter_map(|result| match result {
            Ok(line) => Some(Ok(Event::default().data(line))),
            Err(e) => {
                tracing::debug!("SSE log stream error: {}", e);
                None
            }
        });
        let stream = futures_util::StreamExt::take_until(events, shutdown);

        Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL).text("ping"))
    }
}
