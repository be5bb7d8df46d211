//! Async output pumps (non-UTF8-safe).
//!
//! The transfer tool can print prompts without a trailing newline and is not
//! guaranteed to emit valid UTF-8, so output is read in raw chunks and split
//! by [`LineScanner`] instead of `BufReader::lines()`.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::scan::LineScanner;

const CHUNK_SIZE: usize = 4096;

/// Which standard stream a piece of output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Output observed on one of the child's streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// A complete line, terminator stripped.
    Line { stream: StreamKind, text: String },
    /// The current unterminated tail after a chunk.
    Partial { stream: StreamKind, text: String },
    /// The stream reached EOF or failed.
    Closed(StreamKind),
}

/// Spawn a task that reads `stream` to EOF and forwards scanned output.
///
/// The final event is always [`OutputEvent::Closed`]. Send failures are
/// ignored; they only mean the session driver has already finished.
pub fn spawn_output_pump(
    stream: impl AsyncRead + Unpin + Send + 'static,
    kind: StreamKind,
    events: mpsc::UnboundedSender<OutputEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = stream;
        let mut scanner = LineScanner::new();
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break, // EOF
                Ok(n) => {
                    let batch = scanner.feed(&buf[..n]);
                    for text in batch.lines {
                        let _ = events.send(OutputEvent::Line { stream: kind, text });
                    }
                    if let Some(text) = batch.partial {
                        let _ = events.send(OutputEvent::Partial { stream: kind, text });
                    }
                }
                Err(e) => {
                    debug!(stream = kind.as_str(), error = %e, "output pump exiting due to read error");
                    break;
                }
            }
        }

        if let Some(text) = scanner.finish() {
            let _ = events.send(OutputEvent::Line { stream: kind, text });
        }
        let _ = events.send(OutputEvent::Closed(kind));
        debug!(stream = kind.as_str(), "output pump task exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pump_emits_lines_partial_and_close() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_output_pump(reader, StreamKind::Stdout, tx);

        tokio::io::AsyncWriteExt::write_all(&mut writer, b"first\nok? (y/N): ")
            .await
            .unwrap();
        drop(writer);
        handle.await.unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(
            events.first(),
            Some(&OutputEvent::Line {
                stream: StreamKind::Stdout,
                text: "first".to_string()
            })
        );
        assert!(events.contains(&OutputEvent::Partial {
            stream: StreamKind::Stdout,
            text: "ok? (y/N): ".to_string()
        }));
        assert_eq!(events.last(), Some(&OutputEvent::Closed(StreamKind::Stdout)));
        // Tail is flushed as a line at EOF
        assert!(events.contains(&OutputEvent::Line {
            stream: StreamKind::Stdout,
            text: "ok? (y/N): ".to_string()
        }));
    }
}
