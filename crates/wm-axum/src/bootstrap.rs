//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the relay server is wired together:
//! the log broadcaster, the transfer relay and the router.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use wm_core::{RelaySettings, TransferLogSink, ensure_directory};
use wm_runtime::TransferRelay;

use crate::routes::create_router;
use crate::sse::LogBroadcaster;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Relay behaviour, bind address and files directory.
    pub relay: RelaySettings,
    /// CORS configuration.
    pub cors: CorsConfig,
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Transfer relay driving the wormhole tool.
    pub relay: Arc<TransferRelay>,
    /// Fan-out of relay output to `/wormhole/logs` subscribers.
    pub logs: Arc<LogBroadcaster>,
}

/// Build the relay and its log broadcaster.
///
/// Creates the files directory if it does not exist yet.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let settings = &config.relay;
    wm_core::validate_relay_settings(settings)?;
    ensure_directory(&settings.files_dir)?;

    info!(
        target: "wmarket.paths",
        files_dir = %settings.files_dir.display(),
        tool = %settings.tool,
        send_timeout = ?settings.send_timeout_secs,
        receive_timeout = ?settings.receive_timeout_secs,
        exit_policy = ?settings.exit_policy,
        "Relay bootstrap resolved settings"
    );

    let logs = Arc::new(LogBroadcaster::with_defaults());
    let relay = Arc::new(TransferRelay::new(
        settings.clone(),
        Arc::clone(&logs) as Arc<dyn TransferLogSink>,
    ));

    Ok(AxumContext { relay, logs })
}

/// Serve `ctx` on `listener` until `shutdown` resolves.
///
/// On shutdown, open log streams are ended and every running tool process
/// is stopped before in-flight requests are drained.
pub async fn serve(
    listener: TcpListener,
    ctx: AxumContext,
    cors: &CorsConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let relay = Arc::clone(&ctx.relay);
    let logs = Arc::clone(&ctx.logs);
    let app = create_router(ctx, cors);

    let stop_relay = Arc::clone(&relay);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown requested, stopping transfer sessions");
            logs.close();
            stop_relay.shutdown_all().await;
        })
        .await?;

    // Sessions started while requests were draining
    relay.shutdown_all().await;
    Ok(())
}

/// Start the relay server and run it until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config)?;

    let addr = config.relay.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("wormhole relay listening on http://{}", addr);

    serve(listener, ctx, &config.cors, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}
