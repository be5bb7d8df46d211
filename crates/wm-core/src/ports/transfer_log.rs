//! Transfer log sink port.
//!
//! Destination for transfer tool output and relay status annotations. The
//! HTTP adapter implements it with its SSE fan-out.

/// Port for publishing relay log lines.
///
/// Implementations must be thread-safe and non-blocking. Delivery is
/// best-effort: a sink with no listeners simply drops the line.
pub trait TransferLogSink: Send + Sync {
    /// Publish one line of subprocess output or a status annotation.
    fn publish(&self, line: &str);
}
