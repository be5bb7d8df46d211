//! Tracking of live transfer sessions.
//!
//! Every spawned tool process is registered here until its driver task has
//! reaped it, so that server shutdown can stop whatever is still running.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::types::{SessionId, SessionInfo};

struct SessionEntry {
    info: SessionInfo,
    cancel: CancellationToken,
    driver: Option<JoinHandle<()>>,
}

/// Registry of running transfer sessions.
#[derive(Default)]
pub struct SessionRegistry {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a session id.
    pub fn next_id(&self) -> SessionId {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Register a session and return the token that stops it.
    pub async fn register(&self, info: SessionInfo) -> CancellationToken {
        let cancel = CancellationToken::new();
        debug!(session = %info.id, mode = %info.mode, pid = ?info.pid, "Registering session");
        self.sessions.lock().await.insert(
            info.id,
            SessionEntry {
                info,
                cancel: cancel.clone(),
                driver: None,
            },
        );
        cancel
    }

    /// Attach the driver task so shutdown can await it.
    ///
    /// No-op if the session has already finished.
    pub async fn attach_driver(&self, id: SessionId, driver: JoinHandle<()>) {
        if let Some(entry) = self.sessions.lock().await.get_mut(&id) {
            entry.driver = Some(driver);
        }
    }

    /// Forget a finished session.
    pub async fn remove(&self, id: SessionId) {
        if self.sessions.lock().await.remove(&id).is_some() {
            debug!(session = %id, "Session removed");
        }
    }

    /// Ask a session to stop. Returns whether it was still registered.
    pub async fn cancel(&self, id: SessionId) -> bool {
        self.sessions.lock().await.get(&id).is_some_and(|entry| {
            entry.cancel.cancel();
            true
        })
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Stop every live session and wait for the processes to be reaped.
    pub async fn shutdown_all(&self) {
        let entries: Vec<SessionEntry> = self.sessions.lock().await.drain().map(|(_, e)| e).collect();
        debug!(count = entries.len(), "Stopping all transfer sessions");

        for entry in &entries {
            let info = &entry.info;
            debug!(
                session = %info.id,
                mode = %info.mode,
                pid = ?info.pid,
                target = %info.target,
                started_at = info.started_at,
                "Stopping session"
            );
            entry.cancel.cancel();
        }
        for entry in entries {
            if let Some(driver) = entry.driver {
                let _ = driver.await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wm_core::TransferMode;

    fn info(id: SessionId) -> SessionInfo {
        SessionInfo {
            id,
            mode: TransferMode::Send,
            pid: None,
            target: "file.bin".to_string(),
            started_at: 0,
        }
    }

    #[tokio::test]
    async fn test_register_and_remove() {
        let registry = SessionRegistry::new();
        let id = registry.next_id();
        registry.register(info(id)).await;
        assert_eq!(registry.count().await, 1);
        assert!(registry.cancel(id).await);

        registry.remove(id).await;
        assert_eq!(registry.count().await, 0);
        assert!(!registry.cancel(id).await);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let registry = SessionRegistry::new();
        assert_ne!(registry.next_id(), registry.next_id());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_and_awaits_drivers() {
        let registry = SessionRegistry::new();
        let id = registry.next_id();
        let token = registry.register(info(id)).await;

        let driver = tokio::spawn({
            let token = token.clone();
            async move { token.cancelled().await }
        });
        registry.attach_driver(id, driver).await;

        registry.shutdown_all().await;
        assert!(token.is_cancelled());
        assert_eq!(registry.count().await, 0);
    }
}
