//! Transfer relay: drives the wormhole tool on behalf of HTTP clients.
//!
//! Each send or receive spawns one tool process. A driver task owns the
//! child, feeds its output through the matchers, forwards every line to the
//! log sink and reaps the process when it exits. The request side only waits
//! for the fact it needs: the transfer code for a send, the exit for a
//! receive.

use std::future::Future;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wm_core::{
    ExitPolicy, ReceiveOutcome, RelaySettings, SendOutcome, TransferError, TransferLogSink,
    TransferMode, validate_code, validate_filename,
};

use crate::process::{
    OutputEvent, SessionId, SessionInfo, SessionRegistry, SessionReport, StreamKind,
    shutdown_child, spawn_output_pump,
};
use crate::scan::{CaptureMatcher, OutputMatcher, PromptMatcher};

/// How long to keep reading output after the process has exited.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Spawns and supervises transfer tool sessions.
pub struct TransferRelay {
    settings: RelaySettings,
    sink: Arc<dyn TransferLogSink>,
    sessions: Arc<SessionRegistry>,
}

impl TransferRelay {
    pub fn new(settings: RelaySettings, sink: Arc<dyn TransferLogSink>) -> Self {
        Self {
            settings,
            sink,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    pub const fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Live session registry.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Stop every running tool process and wait for them to be reaped.
    pub async fn shutdown_all(&self) {
        self.sessions.shutdown_all().await;
    }

    /// Offer `filename` from the files directory and return its transfer code.
    ///
    /// Resolves as soon as the tool prints the code. The process keeps
    /// running in the background until the receiver has pulled the file.
    pub async fn send(&self, filename: Option<&str>) -> Result<SendOutcome, TransferError> {
        let name = validate_filename(filename)?;
        let path = self.settings.files_dir.join(name);

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(TransferError::FileNotFound(name.to_string())),
        }

        info!(file = %path.display(), "Starting send");
        self.sink.publish(&format!("sending {name}"));

        let mut cmd = Command::new(&self.settings.tool);
        cmd.arg(TransferMode::Send.as_arg())
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let child = cmd
            .spawn()
            .map_err(|e| self.spawn_failed(TransferMode::Send, &e))?;

        let (code_tx, code_rx) = oneshot::channel();
        let mut driver = self.driver(TransferMode::Send);
        driver.code = Some((CaptureMatcher::receive_code(), code_tx));

        let (id, report_rx) = self.launch(child, name, driver).await;

        let waiting = async {
            tokio::select! {
                biased;
                Ok(code) = code_rx => Ok(SendOutcome { code }),
                report = report_rx => Err(match report {
                    Ok(report) => TransferError::ExitedWithoutCode {
                        mode: TransferMode::Send,
                        status: report.status,
                    },
                    Err(_) => driver_lost(),
                }),
            }
        };

        self.with_deadline(TransferMode::Send, id, self.settings.send_timeout(), waiting)
            .await
    }

    /// Receive the transfer identified by `code` into the files directory.
    ///
    /// The tool's confirmation prompt is answered automatically. Resolves
    /// once the process has exited.
    pub async fn receive(&self, code: Option<&str>) -> Result<ReceiveOutcome, TransferError> {
        let code = validate_code(code)?;

        info!(code = %code, "Starting receive");
        self.sink.publish(&format!("receiving with code {code}"));

        let mut cmd = Command::new(&self.settings.tool);
        cmd.arg(TransferMode::Receive.as_arg())
            .arg(code)
            .current_dir(&self.settings.files_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let mut child = cmd
            .spawn()
            .map_err(|e| self.spawn_failed(TransferMode::Receive, &e))?;

        let mut driver = self.driver(TransferMode::Receive);
        driver.stdin = child.stdin.take();
        driver.prompt = Some(PromptMatcher::new(&self.settings.confirm_pattern));
        driver.saved_path = Some(CaptureMatcher::saved_path());

        let (id, report_rx) = self.launch(child, code, driver).await;

        let waiting = async { report_rx.await.map_err(|_| driver_lost()) };
        let report = self
            .with_deadline(
                TransferMode::Receive,
                id,
                self.settings.receive_timeout(),
                waiting,
            )
            .await?;

        let outcome = ReceiveOutcome {
            exit_code: report.exit_code,
            confirmed: report.confirmed,
            saved_path: report.saved_path,
        };

        if self.settings.exit_policy == ExitPolicy::Fail && !outcome.succeeded() {
            return Err(TransferError::NonZeroExit {
                status: report.status,
            });
        }
        Ok(outcome)
    }

    fn driver(&self, mode: TransferMode) -> SessionDriver {
        SessionDriver {
            mode,
            tool: self.settings.tool.clone(),
            reply: self.settings.confirm_reply.clone(),
            sink: Arc::clone(&self.sink),
            code: None,
            prompt: None,
            saved_path: None,
            stdin: None,
            report: SessionReport::default(),
        }
    }

    async fn launch(
        &self,
        child: Child,
        target: &str,
        driver: SessionDriver,
    ) -> (SessionId, oneshot::Receiver<SessionReport>) {
        let id = self.sessions.next_id();
        let info = SessionInfo {
            id,
            mode: driver.mode,
            pid: child.id(),
            target: target.to_string(),
            started_at: unix_now(),
        };
        let cancel = self.sessions.register(info).await;

        let (report_tx, report_rx) = oneshot::channel();
        let handle = tokio::spawn(driver.run(
            id,
            child,
            cancel,
            report_tx,
            Arc::clone(&self.sessions),
        ));
        self.sessions.attach_driver(id, handle).await;

        (id, report_rx)
    }

    async fn with_deadline<T>(
        &self,
        mode: TransferMode,
        id: SessionId,
        limit: Option<Duration>,
        waiting: impl Future<Output = Result<T, TransferError>>,
    ) -> Result<T, TransferError> {
        let Some(limit) = limit else {
            return waiting.await;
        };

        if let Ok(result) = tokio::time::timeout(limit, waiting).await {
            return result;
        }

        let secs = limit.as_secs();
        warn!(session = %id, %mode, secs, "Transfer timed out, stopping tool");
        self.sink.publish(&format!("{mode} timed out after {secs}s"));
        self.sessions.cancel(id).await;
        Err(TransferError::Timeout { mode, secs })
    }

    fn spawn_failed(&self, mode: TransferMode, error: &std::io::Error) -> TransferError {
        warn!(tool = %self.settings.tool, %mode, error = %error, "Failed to spawn transfer tool");
        self.sink.publish(&format!("spawn failed: {error}"));
        TransferError::SpawnFailed {
            tool: self.settings.tool.clone(),
            reason: error.to_string(),
        }
    }
}

fn driver_lost() -> TransferError {
    TransferError::Io("session driver ended unexpectedly".to_string())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Per-session state owned by the driver task.
struct SessionDriver {
    mode: TransferMode,
    tool: String,
    reply: String,
    sink: Arc<dyn TransferLogSink>,
    /// Code matcher and the channel the first match is reported on.
    code: Option<(CaptureMatcher, oneshot::Sender<String>)>,
    /// Taken on first match so the prompt is answered once.
    prompt: Option<PromptMatcher>,
    saved_path: Option<CaptureMatcher>,
    stdin: Option<ChildStdin>,
    report: SessionReport,
}

impl SessionDriver {
    async fn run(
        mut self,
        id: SessionId,
        mut child: Child,
        cancel: CancellationToken,
        report_tx: oneshot::Sender<SessionReport>,
        registry: Arc<SessionRegistry>,
    ) {
        let (events_tx, mut events) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_output_pump(stdout, StreamKind::Stdout, events_tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_output_pump(stderr, StreamKind::Stderr, events_tx.clone());
        }
        drop(events_tx);

        let status = loop {
            tokio::select! {
                biased;
                Some(event) = events.recv() => self.handle(event).await,
                () = cancel.cancelled() => {
                    debug!(session = %id, "Session cancelled, stopping tool");
                    self.report.cancelled = true;
                    break shutdown_child(&mut child).await;
                }
                status = child.wait() => break status,
            }
        };

        let drain = async {
            while let Some(event) = events.recv().await {
                self.handle(event).await;
            }
        };
        if tokio::time::timeout(DRAIN_GRACE, drain).await.is_err() {
            debug!(session = %id, "Output still open after exit, giving up on it");
        }

        match status {
            Ok(status) => {
                self.report.exit_code = status.code();
                self.report.status = status.to_string();
            }
            Err(e) => {
                warn!(session = %id, error = %e, "Failed to reap transfer tool");
                self.report.status = format!("wait failed: {e}");
            }
        }

        let outcome = if self.report.cancelled { "stopped" } else { "finished" };
        info!(
            session = %id,
            mode = %self.mode,
            status = %self.report.status,
            cancelled = self.report.cancelled,
            "Transfer tool exited"
        );
        self.sink.publish(&format!(
            "{} {} {outcome} ({})",
            self.tool, self.mode, self.report.status
        ));

        registry.remove(id).await;
        let _ = report_tx.send(self.report);
    }

    async fn handle(&mut self, event: OutputEvent) {
        match event {
            OutputEvent::Line { stream, text } => {
                match stream {
                    StreamKind::Stdout => self.sink.publish(&text),
                    StreamKind::Stderr => self.sink.publish(&format!("stderr: {text}")),
                }
                self.scan(&text, false).await;
            }
            OutputEvent::Partial { text, .. } => self.scan(&text, true).await,
            OutputEvent::Closed(stream) => {
                debug!(mode = %self.mode, stream = stream.as_str(), "Tool stream closed");
            }
        }
    }

    async fn scan(&mut self, text: &str, partial: bool) {
        if let Some(code) = self
            .code
            .as_ref()
            .and_then(|(m, _)| match_output(m, text, partial))
        {
            if let Some((_, tx)) = self.code.take() {
                info!(code = %code, "Transfer code captured");
                self.sink.publish(&format!("code captured: {code}"));
                let _ = tx.send(code);
            }
        }

        if let Some(path) = self
            .saved_path
            .as_ref()
            .and_then(|m| match_output(m, text, partial))
        {
            self.report.saved_path = Some(path);
        }

        if self
            .prompt
            .as_ref()
            .and_then(|m| match_output(m, text, partial))
            .is_some()
        {
            self.prompt = None;
            self.confirm().await;
        }
    }

    async fn confirm(&mut self) {
        let Some(stdin) = self.stdin.as_mut() else {
            warn!(mode = %self.mode, "Confirmation prompt seen but stdin is closed");
            return;
        };

        let answer = format!("{}\n", self.reply);
        let written = async {
            stdin.write_all(answer.as_bytes()).await?;
            stdin.flush().await
        }
        .await;

        match written {
            Ok(()) => {
                debug!(mode = %self.mode, "Answered confirmation prompt");
                self.report.confirmed = true;
                self.sink.publish("auto-confirmed transfer");
            }
            Err(e) => {
                warn!(error = %e, "Failed to answer confirmation prompt");
                self.sink.publish(&format!("confirmation failed: {e}"));
            }
        }
    }
}

fn match_output(matcher: &impl OutputMatcher, text: &str, partial: bool) -> Option<String> {
    if partial {
        matcher.find_partial(text)
    } else {
        matcher.find(text)
    }
}
