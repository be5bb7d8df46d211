//! Stopping a tool process: SIGTERM, a grace period, then SIGKILL.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;

/// How long the tool gets to exit after SIGTERM.
pub const TERM_GRACE: Duration = Duration::from_secs(5);

/// Stop `child` and reap it.
///
/// The tool gets SIGTERM and is killed if still alive after [`TERM_GRACE`].
/// Platforms without signals kill straight away. A child that already
/// exited is just reaped.
pub async fn shutdown_child(child: &mut Child) -> io::Result<ExitStatus> {
    match request_exit(child)? {
        Signal::Gone => return child.wait().await,
        Signal::Sent => {
            if let Ok(status) = tokio::time::timeout(TERM_GRACE, child.wait()).await {
                return status;
            }
            tracing::debug!(pid = ?child.id(), "Tool ignored SIGTERM, killing");
        }
        #[cfg(not(unix))]
        Signal::Unsupported => {}
    }

    child.kill().await?;
    child.wait().await
}

enum Signal {
    Sent,
    /// Exited already; only reaping is left.
    Gone,
    #[cfg(not(unix))]
    Unsupported,
}

#[cfg(unix)]
fn request_exit(child: &Child) -> io::Result<Signal> {
    use nix::errno::Errno;
    use nix::sys::signal::{self, kill};
    use nix::unistd::Pid;

    let Some(raw) = child.id() else {
        return Ok(Signal::Gone);
    };
    let pid = Pid::from_raw(i32::try_from(raw).map_err(io::Error::other)?);

    match kill(pid, signal::Signal::SIGTERM) {
        Ok(()) => Ok(Signal::Sent),
        Err(Errno::ESRCH) => Ok(Signal::Gone),
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(not(unix))]
fn request_exit(child: &Child) -> io::Result<Signal> {
    Ok(if child.id().is_some() {
        Signal::Unsupported
    } else {
        Signal::Gone
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tokio::process::Command;

    #[tokio::test]
    async fn test_sigterm_stops_sleeping_tool() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();

        let started = std::time::Instant::now();
        let status = shutdown_child(&mut child).await.unwrap();

        assert!(!status.success());
        assert!(started.elapsed() < TERM_GRACE);
    }

    #[tokio::test]
    async fn test_trapping_tool_is_killed() {
        let mut child = Command::new("sh")
            .args(["-c", "trap '' TERM; sleep 30 & wait"])
            .spawn()
            .unwrap();
        // Let the shell install its trap
        tokio::time::sleep(Duration::from_millis(200)).await;

        let status = shutdown_child(&mut child).await.unwrap();
        assert!(!status.success());
    }

    #[tokio::test]
    async fn test_reaped_child_is_fine() {
        let mut child = Command::new("true").spawn().unwrap();
        child.wait().await.unwrap();

        assert!(shutdown_child(&mut child).await.unwrap().success());
    }
}
