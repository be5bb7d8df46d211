//! Shared types for transfer session tracking.

use wm_core::TransferMode;

/// Identifier of a live transfer session.
pub type SessionId = u64;

/// Information about a running transfer tool process.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: SessionId,
    pub mode: TransferMode,
    /// Process ID, when the OS reported one.
    pub pid: Option<u32>,
    /// Filename for sends, code for receives.
    pub target: String,
    /// Unix timestamp (seconds) when the process was spawned.
    pub started_at: u64,
}

/// Final state of a session, produced once the process has exited.
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Human-readable exit status.
    pub status: String,
    /// Whether the confirmation prompt was answered.
    pub confirmed: bool,
    /// Destination path reported by the tool.
    pub saved_path: Option<String>,
    /// Stopped by the relay (timeout or shutdown) rather than exiting on its own.
    pub cancelled: bool,
}
